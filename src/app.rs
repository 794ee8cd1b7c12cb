use std::sync::Arc;

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::AppState,
    infra::{
        estimator::{
            HttpEstimator, OfflineEstimator, PricingDataSource, PricingEstimator, SharedDataSource,
            DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
        },
        store::FileStore,
        theme_store::ThemeStore,
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{AddProductPage, CatalogPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        config::AppConfig,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Catalog {},
    #[route("/add")]
    AddProduct {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let themes = use_signal(|| ThemeStore::load(FileStore::in_config_dir()));
    let initial_theme = themes.with(|store| store.get());

    let state = use_signal(move || AppState {
        theme: initial_theme,
        ..AppState::default()
    });
    use_hook({
        let mut state = state;
        move || {
            if let Some(saved) = load_persisted_state() {
                tracing::info!(products = saved.products.len(), "restored saved catalog");
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state);

    // The store notifies the app state so every page re-renders with the new palette.
    use_hook({
        let mut themes = themes;
        let mut state = state;
        move || {
            themes.with_mut(|store| {
                store.subscribe(move |theme| state.with_mut(|st| st.theme = theme))
            });
        }
    });
    use_context_provider(|| themes);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let config = use_context_provider(AppConfig::from_env_or_default);
    use_context_provider(move || pricing_source(&config));

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Saves the catalog and language. A failed write is logged and raised as an
/// error toast; the in-memory state is kept either way.
pub fn persist_user_state(state: &Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        tracing::error!(%err, "failed to persist catalog");
        push_toast(toasts, ToastKind::Error, format!("Could not save your catalog: {err}"));
    }
}

/// Builds the estimator from configuration, retrying with the default
/// endpoint and finally going offline so estimates still render.
fn pricing_source(config: &AppConfig) -> SharedDataSource {
    let primary: Arc<dyn PricingEstimator> =
        match HttpEstimator::with_base_url(&config.api_base_url, config.api_timeout) {
            Ok(estimator) => {
                tracing::info!(endpoint = %estimator.endpoint(), "pricing service configured");
                Arc::new(estimator)
            }
            Err(err) => {
                tracing::warn!(%err, base_url = %config.api_base_url, "invalid pricing service; using default");
                match HttpEstimator::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT) {
                    Ok(estimator) => Arc::new(estimator),
                    Err(err) => {
                        tracing::error!(%err, "pricing service unavailable; showing sample data");
                        Arc::new(OfflineEstimator)
                    }
                }
            }
        };
    PricingDataSource::new(primary)
}

#[component]
pub fn Catalog() -> Element {
    rsx! { Shell { CatalogPage {} } }
}

#[component]
pub fn AddProduct() -> Element {
    rsx! { Shell { AddProductPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn routes_resolve_to_pages() {
        assert!(matches!(Route::from_str("/"), Ok(Route::Catalog {})));
        assert!(matches!(Route::from_str("/add"), Ok(Route::AddProduct {})));
        assert!(matches!(Route::from_str("/settings"), Ok(Route::Settings {})));
        assert_eq!(Route::AddProduct {}.to_string(), "/add");
    }
}
