use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, Route},
    domain::{format_inr_opt, AppState, PricingSelection, Product, ProductDescriptor, CATEGORIES},
    infra::estimator::SharedDataSource,
    ui::components::{
        pricing_panel::PricingPanel,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

#[component]
pub fn AddProductPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let source = use_context::<SharedDataSource>();
    let nav = use_navigator();

    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut category = use_signal(|| CATEGORIES[0].to_string());
    let mut materials = use_signal(String::new);
    let mut region = use_signal(String::new);

    // Descriptor of the last "Get pricing suggestion" click; `None` until then.
    let mut request = use_signal(|| None::<ProductDescriptor>);
    let mut refresh_count = use_signal(|| 0u32);
    let language = use_memo(move || state.with(|st| st.language));

    let listing_price = use_signal(|| None::<f64>);
    let mut selection = use_signal(move || {
        let mut selection = PricingSelection::new();
        let mut listing_price = listing_price;
        selection.on_change(move |price| listing_price.set(Some(price)));
        selection
    });

    let estimate = use_resource(move || {
        let source = source.clone();
        let descriptor = request();
        let language = language();
        let _ = refresh_count();
        async move {
            let descriptor = descriptor?;
            Some(source.fetch_estimate(&descriptor, language.code()).await)
        }
    });

    // Every new estimate, including refreshes, resets the selection.
    use_effect(move || {
        if let Some(Some(fetched)) = &*estimate.read() {
            selection.with_mut(|sel| sel.initialize(&fetched.data));
        }
    });

    let loading = request.with(|req| req.is_some()) && !estimate.finished();
    let current = estimate.read().as_ref().and_then(|est| est.clone());
    let selected = listing_price();

    let on_suggest = move |_| match build_descriptor(
        &name(),
        &description(),
        &category(),
        &materials(),
        &region(),
    ) {
        Ok(descriptor) => {
            if request.with(|req| req.as_ref() == Some(&descriptor)) {
                refresh_count += 1;
            } else {
                request.set(Some(descriptor));
            }
        }
        Err(message) => push_toast(toasts, ToastKind::Warning, message),
    };

    let on_save = move |_| {
        let descriptor = match build_descriptor(
            &name(),
            &description(),
            &category(),
            &materials(),
            &region(),
        ) {
            Ok(descriptor) => descriptor,
            Err(message) => {
                push_toast(toasts, ToastKind::Warning, message);
                return;
            }
        };
        let price = selection.with(|sel| sel.current());
        let product = product_from(descriptor, price);
        let label = format!("Saved {} at {}.", product.name, format_inr_opt(product.price));
        state.with_mut(|st| st.add_product(product));
        persist_user_state(&state, toasts);
        selection.with_mut(|sel| sel.clear_subscriber());
        push_toast(toasts, ToastKind::Success, label);
        nav.push(Route::Catalog {});
    };

    rsx! {
        div { class: "kala-stack",
            section { class: "kala-card",
                h2 { "Describe your craft" }
                div { class: "kala-grid-2",
                    div {
                        label { class: "kala-label", "Name" }
                        input {
                            class: "kala-input",
                            placeholder: "Hand-painted Madhubani scroll",
                            value: name(),
                            oninput: move |evt| name.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "kala-label", "Category" }
                        select {
                            class: "kala-input",
                            value: category(),
                            onchange: move |evt| category.set(evt.value()),
                            for cat in CATEGORIES {
                                option { value: cat, "{cat}" }
                            }
                        }
                    }
                    div {
                        label { class: "kala-label", "Materials (comma separated)" }
                        input {
                            class: "kala-input",
                            placeholder: "handmade paper, natural dyes",
                            value: materials(),
                            oninput: move |evt| materials.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "kala-label", "Region" }
                        input {
                            class: "kala-input",
                            placeholder: "Bihar",
                            value: region(),
                            oninput: move |evt| region.set(evt.value()),
                        }
                    }
                }
                div { style: "margin-top: 1rem;",
                    label { class: "kala-label", "Description" }
                    textarea {
                        class: "kala-input",
                        rows: "3",
                        value: description(),
                        oninput: move |evt| description.set(evt.value()),
                    }
                }
                div { class: "kala-row", style: "margin-top: 1rem;",
                    button {
                        class: "kala-btn kala-btn-primary",
                        disabled: loading,
                        onclick: on_suggest,
                        "Get pricing suggestion"
                    }
                    button {
                        class: "kala-btn",
                        disabled: loading,
                        onclick: on_save,
                        "Save product"
                    }
                    span { class: "kala-muted", "Listing price: {format_inr_opt(selected)}" }
                }
            }

            if loading {
                section { class: "kala-card kala-row",
                    span { class: "kala-spinner" }
                    span { class: "kala-muted", "Analysing the market for your product…" }
                }
            } else if let Some(estimate) = current {
                PricingPanel {
                    estimate,
                    selected,
                    on_select: move |price: f64| selection.with_mut(|sel| sel.select(price)),
                    on_refresh: move |_| refresh_count += 1,
                }
            }
        }
    }
}

/// Validates the form into the payload sent to the pricing service.
fn build_descriptor(
    name: &str,
    description: &str,
    category: &str,
    materials: &str,
    region: &str,
) -> Result<ProductDescriptor, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Give the product a name first.".to_string());
    }
    let category = category.trim();
    if category.is_empty() {
        return Err("Pick a category.".to_string());
    }
    let region = region.trim();

    Ok(ProductDescriptor {
        name: name.to_string(),
        description: description.trim().to_string(),
        category: category.to_string(),
        materials: split_materials(materials),
        region: (!region.is_empty()).then(|| region.to_string()),
        extra: serde_json::Map::new(),
    })
}

fn split_materials(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn product_from(descriptor: ProductDescriptor, price: Option<f64>) -> Product {
    let mut product = Product::new(descriptor.name, descriptor.category);
    product.description = descriptor.description;
    product.materials = descriptor.materials;
    product.region = descriptor.region;
    product.price = price;
    product
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_requires_a_name() {
        assert!(build_descriptor("   ", "", "Pottery", "", "").is_err());
    }

    #[test]
    fn descriptor_trims_and_splits_materials() {
        let descriptor =
            build_descriptor(" Blue Pottery Vase ", " glazed ", "Pottery", "quartz, , glass ,", " ")
                .unwrap();
        assert_eq!(descriptor.name, "Blue Pottery Vase");
        assert_eq!(descriptor.description, "glazed");
        assert_eq!(descriptor.materials, vec!["quartz", "glass"]);
        assert_eq!(descriptor.region, None);
    }

    #[test]
    fn saved_product_keeps_selected_price() {
        let descriptor =
            build_descriptor("Pattachitra", "", "Paintings", "cloth", "Odisha").unwrap();
        let product = product_from(descriptor, Some(3500.0));
        assert_eq!(product.price, Some(3500.0));
        assert_eq!(product.region.as_deref(), Some("Odisha"));
        assert_eq!(product.materials, vec!["cloth"]);
    }
}
