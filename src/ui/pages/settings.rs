use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, Language},
    ui::{
        components::{
            theme_selector::ThemeSelector,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::{config::AppConfig, persistence::config_file},
};

#[component]
pub fn SettingsPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();
    let mut confirm_clear = use_signal(|| false);

    let current_language = state.with(|st| st.language);
    let product_count = state.with(|st| st.products.len());
    let storage_path = config_file("state.json")
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "unavailable".to_string());
    let timeout_secs = config.api_timeout.as_secs();

    let on_clear = move |_| {
        if !confirm_clear() {
            confirm_clear.set(true);
            return;
        }
        confirm_clear.set(false);
        state.with_mut(|st| st.products.clear());
        persist_user_state(&state, toasts);
        push_toast(toasts, ToastKind::Info, "Catalog cleared.");
    };

    rsx! {
        div { class: "kala-stack",
            section { class: "kala-card",
                h2 { "Theme" }
                p { class: "kala-muted", "Dress the studio in the colours of a region." }
                ThemeSelector {}
            }

            section { class: "kala-card",
                h2 { "Pricing language" }
                p { class: "kala-muted", "Reasoning and tips from the pricing service come back in this language." }
                div { class: "kala-row",
                    for language in Language::ALL {
                        button {
                            class: theme::choice_button(language == current_language),
                            onclick: move |_| {
                                state.with_mut(|st| st.language = language);
                                persist_user_state(&state, toasts);
                            },
                            "{language.native_name()}"
                        }
                    }
                }
            }

            section { class: "kala-card",
                h2 { "Catalog data" }
                p { class: "kala-muted", "{product_count} products saved at {storage_path}" }
                button {
                    class: "kala-btn kala-btn-danger",
                    disabled: product_count == 0,
                    onclick: on_clear,
                    if confirm_clear() { "Click again to delete every product" } else { "Clear catalog" }
                }
            }

            section { class: "kala-card",
                h2 { "Pricing service" }
                table { class: "kala-table",
                    tbody {
                        tr {
                            td { "Base URL" }
                            td { "{config.api_base_url}" }
                        }
                        tr {
                            td { "Timeout" }
                            td { "{timeout_secs} s" }
                        }
                    }
                }
                p { class: "kala-muted",
                    "Set KALA_API_BASE_URL and KALA_API_TIMEOUT_SECS before launch to change these."
                }
            }
        }
    }
}
