use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, Language},
    ui::components::toast::ToastMessage,
};

/// Language the pricing service should answer in.
#[component]
pub fn LanguageSelector() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let current = state.with(|st| st.language);

    rsx! {
        select {
            class: "kala-input",
            title: "Response language",
            value: current.code(),
            onchange: move |evt| {
                let Some(language) = Language::from_code(&evt.value()) else {
                    return;
                };
                state.with_mut(|st| st.language = language);
                persist_user_state(&state, toasts);
            },
            for language in Language::ALL {
                option {
                    value: language.code(),
                    selected: language == current,
                    "{language.native_name()}"
                }
            }
        }
    }
}
