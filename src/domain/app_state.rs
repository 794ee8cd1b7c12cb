use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    product::{Language, Product},
    theme::ThemeId,
};

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub products: Vec<Product>,
    pub language: Language,
    /// Mirrors the theme store so components re-render on change.
    pub theme: ThemeId,
}

impl AppState {
    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn remove_product(&mut self, id: Uuid) -> Option<Product> {
        let idx = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(idx))
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.products = persisted.products;
        self.language = persisted.language;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            products: self.products.clone(),
            language: self.language,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub language: Language,
}
