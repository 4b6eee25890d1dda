pub mod inventory;
pub mod purchases;
pub mod sales;

use thiserror::Error;

pub use inventory::InventoryStore;
pub use purchases::{InMemoryPurchaseStore, PurchaseRepository};
pub use sales::SalesStore;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record {0} not found")]
    NotFound(u64),

    #[error("Store is full ({0} records)")]
    CapacityExceeded(usize),
}
