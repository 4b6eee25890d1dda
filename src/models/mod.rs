pub mod inventory;
pub mod purchase;
pub mod rate;
pub mod sale;

pub use inventory::{
    InventoryItem, InventoryPatch, InventoryQuery, NewInventoryItem, Page, SortDirection,
    SortField,
};
pub use purchase::{
    PurchaseDerived, PurchaseDraft, PurchaseField, PurchaseInput, PurchaseRecord, Recompute,
    SettlementMethod,
};
pub use rate::{RateSnapshot, RateState};
pub use sale::{
    sale_total, CatalogItem, DateWindow, NewSale, PaymentMethod, Sale, SaleLine, SaleLineRequest,
    SaleStatus, SalesQuery,
};
