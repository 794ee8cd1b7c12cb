//! Domain types and logic for listing and pricing handmade products.

pub mod app_state;
pub mod currency;
pub mod pricing;
pub mod product;
pub mod selection;
pub mod theme;

pub use app_state::{AppState, PersistedState};
pub use currency::{format_inr, format_inr_opt};
pub use pricing::{
    CostBreakdown, CostLine, DemandLevel, MarketAnalysis, PriceCandidate, PriceRange,
    PricingRecommendation, Recommendation, RecommendationKind, SeasonalTrend,
};
pub use product::{
    categories, filter_products, CatalogQuery, Language, Product, ProductDescriptor, SortOrder,
    CATEGORIES,
};
pub use selection::PricingSelection;
pub use theme::ThemeId;
