use crate::error::AppError;
use crate::models::{
    CatalogItem, InventoryItem, InventoryPatch, InventoryQuery, NewInventoryItem, NewSale, Page,
    PurchaseDraft, PurchaseField, PurchaseRecord, RateState, Sale, SalesQuery,
};
use crate::service::{sales, PurchaseForm, SubmitMode};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::AppState;

/// 试算响应: 回放草稿后的派生值
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub fine_weight: Option<BigDecimal>,
    pub purchase_price: Option<BigDecimal>,
    pub todays_rate: String,
    pub rate_advisory: Option<String>,
    pub rejected: Vec<PurchaseField>,
}

/// 提交响应
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub demo_mode: bool,
    pub message: String,
    pub record: PurchaseRecord,
}

/// 请求体: 待删除的库存ID列表
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub removed: usize,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 当前金价状态
pub async fn gold_rate(State(state): State<AppState>) -> Json<RateState> {
    let current = state.rate.borrow().clone();
    Json(current)
}

/// 采购试算: 不保存, 只返回派生的纯重和采购价
pub async fn quote_purchase(
    State(state): State<AppState>,
    Json(draft): Json<PurchaseDraft>,
) -> Json<QuoteResponse> {
    let rate = state.rate.borrow().clone();
    let (form, rejected) = PurchaseForm::from_draft(&draft, &rate);

    Json(QuoteResponse {
        fine_weight: form.derived().fine_weight.clone(),
        purchase_price: form.derived().purchase_price.clone(),
        todays_rate: form.input().todays_rate.clone(),
        rate_advisory: form.rate_advisory().map(str::to_string),
        rejected,
    })
}

/// 提交采购
pub async fn submit_purchase(
    State(state): State<AppState>,
    Json(draft): Json<PurchaseDraft>,
) -> Result<Json<SubmitResponse>, AppError> {
    let rate = state.rate.borrow().clone();
    let (form, rejected) = PurchaseForm::from_draft(&draft, &rate);
    if !rejected.is_empty() {
        return Err(AppError::Validation(
            rejected.iter().map(|f| f.to_string()).collect(),
        ));
    }

    let outcome = state.purchases.submit(&form)?;
    Ok(Json(SubmitResponse {
        success: true,
        demo_mode: outcome.mode == SubmitMode::DemoMode,
        message: outcome.message.to_string(),
        record: outcome.record,
    }))
}

pub async fn list_purchases(State(state): State<AppState>) -> Json<Vec<PurchaseRecord>> {
    Json(state.purchases.list())
}

/// 库存列表 (过滤/排序/分页)
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Json<Page<InventoryItem>> {
    Json(state.inventory.list(&query).await)
}

pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<InventoryItem>, AppError> {
    Ok(Json(state.inventory.get(id).await?))
}

pub async fn add_inventory(
    State(state): State<AppState>,
    Json(item): Json<NewInventoryItem>,
) -> (StatusCode, Json<InventoryItem>) {
    let item = state.inventory.add(item).await;
    (StatusCode::CREATED, Json(item))
}

pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<InventoryPatch>,
) -> Result<Json<InventoryItem>, AppError> {
    Ok(Json(state.inventory.update(id, patch).await?))
}

pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.inventory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bulk_delete_inventory(
    State(state): State<AppState>,
    Json(req): Json<BulkDeleteRequest>,
) -> Json<BulkDeleteResponse> {
    let removed = state.inventory.delete_many(&req.ids).await;
    Json(BulkDeleteResponse { removed })
}

/// 销售列表 (关键字 + 日期范围)
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Json<Vec<Sale>> {
    let today = Utc::now().date_naive();
    Json(state.sales.list(&query, today).await)
}

pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Sale>, AppError> {
    state
        .sales
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Sale {}", id)))
}

/// 新建销售单, 按目录单价计算合计
pub async fn create_sale(
    State(state): State<AppState>,
    Json(request): Json<NewSale>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    let today = Utc::now().date_naive();
    let sale = sales::create_sale(&state.sales, request, today).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn sales_catalog(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(state.sales.catalog().to_vec())
}
