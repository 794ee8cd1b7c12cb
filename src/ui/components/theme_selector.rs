use dioxus::prelude::*;

use crate::{
    domain::{AppState, ThemeId},
    infra::{store::FileStore, theme_store::ThemeStore},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

/// One card per regional palette. Picking a card applies it immediately and
/// saves it for the next launch.
#[component]
pub fn ThemeSelector() -> Element {
    let state = use_context::<Signal<AppState>>();
    let themes = use_context::<Signal<ThemeStore<FileStore>>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let active = state.with(|st| st.theme);

    rsx! {
        div { class: "kala-grid",
            for id in ThemeId::ALL {
                ThemeOption {
                    key: "{id.key()}",
                    id,
                    active: id == active,
                    on_pick: move |picked: ThemeId| {
                        let mut themes = themes;
                        if let Err(err) = themes.with_mut(|store| store.set(picked)) {
                            tracing::warn!(%err, theme = picked.key(), "failed to save theme");
                            push_toast(
                                toasts,
                                ToastKind::Warning,
                                format!("Theme applied but not saved: {err}"),
                            );
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ThemeOption(id: ThemeId, active: bool, on_pick: EventHandler<ThemeId>) -> Element {
    let palette = id.palette();
    rsx! {
        button {
            class: theme::theme_option(active),
            style: "background-image: {palette.pattern.css(palette.accent)};",
            onclick: move |_| on_pick.call(id),
            strong { "{palette.name}" }
            div { class: "swatch-row",
                for color in palette.swatches() {
                    span { class: "swatch", style: "background: {color};" }
                }
            }
            span { class: "kala-muted", "{palette.pattern.key()}" }
        }
    }
}
