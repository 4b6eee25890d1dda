use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::SettlementMethod;

/// 库存条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u64,
    pub product: String,
    pub category: String,
    pub vendor: String,
    pub gross_weight: BigDecimal, // 克
    pub fine_weight: BigDecimal,  // 克
    pub price: BigDecimal,
    pub quantity: u32,
    pub settlement: SettlementMethod,
}

/// 新增库存 (id 由存储分配)
#[derive(Debug, Clone, Deserialize)]
pub struct NewInventoryItem {
    pub product: String,
    pub category: String,
    pub vendor: String,
    pub gross_weight: BigDecimal,
    pub fine_weight: BigDecimal,
    pub price: BigDecimal,
    pub quantity: u32,
    pub settlement: SettlementMethod,
}

/// 部分更新
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InventoryPatch {
    pub product: Option<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub gross_weight: Option<BigDecimal>,
    pub fine_weight: Option<BigDecimal>,
    pub price: Option<BigDecimal>,
    pub quantity: Option<u32>,
    pub settlement: Option<SettlementMethod>,
}

impl InventoryItem {
    pub fn apply(&mut self, patch: InventoryPatch) {
        if let Some(v) = patch.product {
            self.product = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.vendor {
            self.vendor = v;
        }
        if let Some(v) = patch.gross_weight {
            self.gross_weight = v;
        }
        if let Some(v) = patch.fine_weight {
            self.fine_weight = v;
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.settlement {
            self.settlement = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Product,
    Category,
    Vendor,
    GrossWeight,
    FineWeight,
    Price,
    Quantity,
    Settlement,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    10
}

/// 库存列表查询: 过滤 -> 排序 -> 分页
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryQuery {
    /// 商品名模糊搜索 (不区分大小写)
    pub search: Option<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub settlement: Option<SettlementMethod>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub sort: Option<SortField>,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            vendor: None,
            settlement: None,
            min_price: None,
            max_price: None,
            sort: None,
            direction: SortDirection::Asc,
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}
