pub mod add_product;
pub mod catalog;
pub mod settings;

pub use add_product::AddProductPage;
pub use catalog::CatalogPage;
pub use settings::SettingsPage;
