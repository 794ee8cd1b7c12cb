use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::AppState,
    ui::{components::language_selector::LanguageSelector, theme},
    util::{APP_NAME, APP_TAGLINE},
};

/// Page frame: header with navigation, palette variables on the root.
#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let palette = state.with(|st| st.theme).palette();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div {
            class: "kala-app",
            "data-theme": palette.key,
            style: palette.css_variables(),
            header { class: "kala-header",
                div { class: "kala-brand",
                    h1 { "{APP_NAME}" }
                    p { class: "kala-muted", "{APP_TAGLINE}" }
                }
                nav { class: "kala-nav",
                    NavButton {
                        active: matches!(current_route, Route::Catalog {}),
                        onclick: move |_| { nav.push(Route::Catalog {}); },
                        label: "Catalog",
                    }
                    NavButton {
                        active: matches!(current_route, Route::AddProduct {}),
                        onclick: move |_| { nav.push(Route::AddProduct {}); },
                        label: "Add product",
                    }
                    NavButton {
                        active: matches!(current_route, Route::Settings {}),
                        onclick: move |_| { nav.push(Route::Settings {}); },
                        label: "Settings",
                    }
                    LanguageSelector {}
                }
            }
            main { class: "kala-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
