pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::{router, AppState};
pub use config::AppConfig;
pub use error::AppError;
pub use service::{PurchaseForm, PurchaseService, RateFeed, SimulatedRateSource};
pub use store::{InMemoryPurchaseStore, InventoryStore, SalesStore};
