use std::fmt;

use super::store::{KeyValueStore, StoreError};
use crate::domain::ThemeId;

pub const THEME_KEY: &str = "kala.theme";

type Listener = Box<dyn FnMut(ThemeId) + 'static>;

/// Selected cultural theme, persisted through an injected key-value store.
pub struct ThemeStore<S> {
    store: S,
    current: ThemeId,
    listener: Option<Listener>,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Loads the saved theme; unknown or missing values fall back to the default.
    pub fn load(store: S) -> Self {
        let current = store
            .get(THEME_KEY)
            .and_then(|key| {
                let id = ThemeId::from_key(&key);
                if id.is_none() {
                    tracing::warn!(%key, "unknown saved theme; using default");
                }
                id
            })
            .unwrap_or_default();
        Self {
            store,
            current,
            listener: None,
        }
    }

    pub fn get(&self) -> ThemeId {
        self.current
    }

    /// Applies and notifies first; a failed write is reported but the theme
    /// stays applied for this session.
    pub fn set(&mut self, theme: ThemeId) -> Result<(), StoreError> {
        self.current = theme;
        if let Some(listener) = self.listener.as_mut() {
            listener(theme);
        }
        self.store.set(THEME_KEY, theme.key())
    }

    pub fn subscribe(&mut self, callback: impl FnMut(ThemeId) + 'static) {
        self.listener = Some(Box::new(callback));
    }
}

impl<S> fmt::Debug for ThemeStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
