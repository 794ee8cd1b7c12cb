//! Adapters for the pricing service and local storage.

pub mod estimator;
pub mod store;
pub mod theme_store;
