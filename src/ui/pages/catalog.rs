use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, Route},
    domain::{categories, filter_products, AppState, CatalogQuery, SortOrder},
    ui::components::{
        product_card::ProductCard,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

#[component]
pub fn CatalogPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut search = use_signal(String::new);
    let mut category = use_signal(|| "all".to_string());
    let mut sort = use_signal(SortOrder::default);

    let products = state.with(|st| st.products.clone());
    let known_categories = categories(&products);
    let query = CatalogQuery {
        search: search(),
        category: Some(category()),
        sort: sort(),
    };
    let visible = filter_products(&products, &query);
    let total = products.len();

    rsx! {
        div { class: "kala-stack",
            section { class: "kala-card",
                div { class: "kala-spread",
                    h2 { style: "margin: 0;", "Your catalog" }
                    span { class: "kala-muted", "{visible.len()} of {total} products" }
                }
                div { class: "kala-grid", style: "margin-top: 1rem;",
                    input {
                        class: "kala-input",
                        placeholder: "Search name, material or category",
                        value: search(),
                        oninput: move |evt| search.set(evt.value()),
                    }
                    select {
                        class: "kala-input",
                        value: category(),
                        onchange: move |evt| category.set(evt.value()),
                        option { value: "all", "All categories" }
                        for cat in known_categories {
                            option { value: "{cat}", "{cat}" }
                        }
                    }
                    select {
                        class: "kala-input",
                        value: sort().key(),
                        onchange: move |evt| sort.set(SortOrder::from_key(&evt.value())),
                        for order in SortOrder::ALL {
                            option { value: order.key(), "{order.label()}" }
                        }
                    }
                }
            }

            if total == 0 {
                section { class: "kala-card",
                    p { class: "kala-muted", "No products yet. Add your first craft to get a price suggestion." }
                    button {
                        class: "kala-btn kala-btn-primary",
                        onclick: move |_| {
                            nav.push(Route::AddProduct {});
                        },
                        "Add product"
                    }
                }
            } else if visible.is_empty() {
                section { class: "kala-card",
                    p { class: "kala-muted", "Nothing matches these filters." }
                }
            } else {
                div { class: "kala-grid",
                    for product in visible {
                        ProductCard {
                            key: "{product.id}",
                            product: product.clone(),
                            on_remove: move |id| {
                                let removed = state.with_mut(|st| st.remove_product(id));
                                if let Some(product) = removed {
                                    persist_user_state(&state, toasts);
                                    push_toast(
                                        toasts,
                                        ToastKind::Info,
                                        format!("Removed {}.", product.name),
                                    );
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}
