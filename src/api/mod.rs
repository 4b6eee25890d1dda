pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::watch;

use crate::models::RateState;
use crate::service::PurchaseService;
use crate::store::{InventoryStore, SalesStore};

pub use handlers::*;

/// 共享状态: 金价订阅 + 采购服务 + 库存与销售存储
#[derive(Clone)]
pub struct AppState {
    pub rate: watch::Receiver<RateState>,
    pub purchases: Arc<PurchaseService>,
    pub inventory: Arc<InventoryStore>,
    pub sales: Arc<SalesStore>,
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    let purchase_routes = Router::new()
        .route("/api/gold-rate", get(handlers::gold_rate))
        .route(
            "/api/purchases",
            get(handlers::list_purchases).post(handlers::submit_purchase),
        )
        .route("/api/purchases/quote", post(handlers::quote_purchase));

    let inventory_routes = Router::new()
        .route(
            "/api/inventory",
            get(handlers::list_inventory).post(handlers::add_inventory),
        )
        .route("/api/inventory/bulk-delete", post(handlers::bulk_delete_inventory))
        .route(
            "/api/inventory/:id",
            get(handlers::get_inventory)
                .put(handlers::update_inventory)
                .delete(handlers::delete_inventory),
        );

    let sales_routes = Router::new()
        .route(
            "/api/sales",
            get(handlers::list_sales).post(handlers::create_sale),
        )
        .route("/api/sales/catalog", get(handlers::sales_catalog))
        .route("/api/sales/:id", get(handlers::get_sale));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(purchase_routes)
        .merge(inventory_routes)
        .merge(sales_routes)
        .with_state(state)
}
