pub mod language_selector;
pub mod pricing_panel;
pub mod product_card;
pub mod stat_card;
pub mod theme_selector;
pub mod toast;
