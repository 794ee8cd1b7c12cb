use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{format_inr_opt, Product};

#[component]
pub fn ProductCard(product: Product, on_remove: EventHandler<Uuid>) -> Element {
    let id = product.id;
    rsx! {
        article { class: "kala-card product-card",
            div { class: "kala-spread",
                div {
                    h3 { style: "margin: 0;", "{product.name}" }
                    span { class: "kala-muted", "{product.category}" }
                    if let Some(region) = product.region.as_ref() {
                        span { class: "kala-muted", " · {region}" }
                    }
                }
                span { class: "kala-price", "{format_inr_opt(product.price)}" }
            }
            if !product.description.is_empty() {
                p { "{product.description}" }
            }
            if !product.materials.is_empty() {
                div { class: "kala-row",
                    for material in product.materials.iter() {
                        span { class: "chip", "{material}" }
                    }
                }
            }
            div { class: "kala-row", style: "justify-content: flex-end;",
                button {
                    class: "kala-btn kala-btn-danger",
                    onclick: move |_| on_remove.call(id),
                    "Remove"
                }
            }
        }
    }
}
