use dioxus::prelude::*;

#[component]
pub fn StatCard(
    title: String,
    value: String,
    #[props(!optional)] description: Option<String>,
) -> Element {
    rsx! {
        div { class: "kala-card",
            span { class: "kala-label", "{title}" }
            p { class: "kala-price", style: "font-size: 1.4rem; margin: 0.25rem 0 0;", "{value}" }
            if let Some(desc) = description {
                p { class: "kala-muted", style: "margin: 0.25rem 0 0;", "{desc}" }
            }
        }
    }
}
