use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 销售收款方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    BankTransfer,
    CreditCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
    Pending,
}

/// 可售商品目录条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
    pub price: BigDecimal,
}

impl CatalogItem {
    /// 以目录单价生成明细行
    pub fn line(&self, quantity: u32) -> SaleLine {
        SaleLine {
            item_id: self.id,
            name: self.name.clone(),
            quantity,
            price: self.price.clone(),
        }
    }
}

/// 销售明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_id: u64,
    pub name: String,
    pub quantity: u32,
    pub price: BigDecimal,
}

impl SaleLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

/// 销售单 (发票)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// 例如 "INV-001"
    pub id: String,
    pub date: NaiveDate,
    pub customer: String,
    pub items: Vec<SaleLine>,
    pub total: BigDecimal,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
}

/// 明细合计: Σ 单价 × 数量
pub fn sale_total(lines: &[SaleLine]) -> BigDecimal {
    lines
        .iter()
        .fold(BigDecimal::zero(), |acc, line| acc + line.line_total())
}

/// 日期范围筛选
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    #[default]
    All,
    Last7,
    Last15,
    Last30,
    LastYear,
    /// 自定义范围, 目前固定为最近90天
    Custom,
}

impl DateWindow {
    pub fn max_age_days(&self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Last7 => Some(7),
            Self::Last15 => Some(15),
            Self::Last30 => Some(30),
            Self::LastYear => Some(365),
            Self::Custom => Some(90),
        }
    }

    /// 按相差天数判断 (含边界); 晚于今天的日期也算在内
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.max_age_days() {
            None => true,
            Some(days) => (today - date).num_days() <= days,
        }
    }
}

/// 销售列表查询
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesQuery {
    /// 匹配发票号、客户名或任一明细商品名 (不区分大小写)
    pub search: Option<String>,
    #[serde(default)]
    pub window: DateWindow,
}

/// 新建销售时的一行: 目录商品 + 数量
#[derive(Debug, Clone, Deserialize)]
pub struct SaleLineRequest {
    pub item_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSale {
    pub customer: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleLineRequest>,
}
