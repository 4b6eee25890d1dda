use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 采购表单的所有单元格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseField {
    ProductName,
    Category,
    Vendor,
    GrossWeight,
    Stamp,
    Wastage,
    PurchaseMulti,
    FineWeight,
    TodaysRate,
    Discount,
    PurchasePrice,
    Quantity,
    SettlementMethod,
    RawMaterial,
    Remarks,
}

/// 单元格写入后需要执行的重算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recompute {
    /// 重算纯重, 成功后连带重算采购价
    FineWeight,
    PurchasePrice,
}

impl PurchaseField {
    pub const ALL: [PurchaseField; 15] = [
        Self::ProductName,
        Self::Category,
        Self::Vendor,
        Self::GrossWeight,
        Self::Stamp,
        Self::Wastage,
        Self::PurchaseMulti,
        Self::FineWeight,
        Self::TodaysRate,
        Self::Discount,
        Self::PurchasePrice,
        Self::Quantity,
        Self::SettlementMethod,
        Self::RawMaterial,
        Self::Remarks,
    ];

    /// 提交时不能为空的字段
    pub const REQUIRED: [PurchaseField; 12] = [
        Self::ProductName,
        Self::Category,
        Self::Vendor,
        Self::GrossWeight,
        Self::Stamp,
        Self::Wastage,
        Self::PurchaseMulti,
        Self::FineWeight,
        Self::TodaysRate,
        Self::PurchasePrice,
        Self::Quantity,
        Self::SettlementMethod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductName => "product_name",
            Self::Category => "category",
            Self::Vendor => "vendor",
            Self::GrossWeight => "gross_weight",
            Self::Stamp => "stamp",
            Self::Wastage => "wastage",
            Self::PurchaseMulti => "purchase_multi",
            Self::FineWeight => "fine_weight",
            Self::TodaysRate => "todays_rate",
            Self::Discount => "discount",
            Self::PurchasePrice => "purchase_price",
            Self::Quantity => "quantity",
            Self::SettlementMethod => "settlement_method",
            Self::RawMaterial => "raw_material",
            Self::Remarks => "remarks",
        }
    }

    /// 受数字输入过滤约束的字段
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::GrossWeight
                | Self::Stamp
                | Self::Wastage
                | Self::PurchaseMulti
                | Self::Discount
                | Self::Quantity
                | Self::RawMaterial
        )
    }

    /// 用户不可编辑: 两个派生字段 + 由金价源写入的今日金价
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::FineWeight | Self::PurchasePrice | Self::TodaysRate)
    }

    /// 编辑该字段后触发的重算; 名称、类别等无关字段不触发
    pub fn recompute(&self) -> Option<Recompute> {
        match self {
            Self::GrossWeight | Self::Stamp | Self::Wastage => Some(Recompute::FineWeight),
            Self::PurchaseMulti | Self::Discount | Self::RawMaterial => {
                Some(Recompute::PurchasePrice)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PurchaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 结算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    Cash,
    BankTransfer,
    Credit,
    Other,
}

impl FromStr for SettlementMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "bank_transfer" => Ok(Self::BankTransfer),
            "credit" => Ok(Self::Credit),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown settlement method: {}", other)),
        }
    }
}

/// 用户输入 (数字字段在解析前均为文本)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseInput {
    pub product_name: String,
    pub category: String,
    pub vendor: String,
    pub gross_weight: String,
    pub stamp: String,
    pub wastage: String,
    pub purchase_multi: String,
    pub todays_rate: String,
    pub discount: String,
    pub quantity: String,
    pub settlement_method: String,
    pub raw_material: String,
    pub remarks: String,
}

impl PurchaseInput {
    /// 表单打开时的初始值: 除数量为 "1" 外全部为空
    pub fn blank() -> Self {
        Self {
            quantity: "1".to_string(),
            ..Self::default()
        }
    }

    /// 派生字段不属于输入, 返回 None
    pub fn cell(&self, field: PurchaseField) -> Option<&str> {
        let value = match field {
            PurchaseField::ProductName => &self.product_name,
            PurchaseField::Category => &self.category,
            PurchaseField::Vendor => &self.vendor,
            PurchaseField::GrossWeight => &self.gross_weight,
            PurchaseField::Stamp => &self.stamp,
            PurchaseField::Wastage => &self.wastage,
            PurchaseField::PurchaseMulti => &self.purchase_multi,
            PurchaseField::TodaysRate => &self.todays_rate,
            PurchaseField::Discount => &self.discount,
            PurchaseField::Quantity => &self.quantity,
            PurchaseField::SettlementMethod => &self.settlement_method,
            PurchaseField::RawMaterial => &self.raw_material,
            PurchaseField::Remarks => &self.remarks,
            PurchaseField::FineWeight | PurchaseField::PurchasePrice => return None,
        };
        Some(value.as_str())
    }

    pub fn cell_mut(&mut self, field: PurchaseField) -> Option<&mut String> {
        let value = match field {
            PurchaseField::ProductName => &mut self.product_name,
            PurchaseField::Category => &mut self.category,
            PurchaseField::Vendor => &mut self.vendor,
            PurchaseField::GrossWeight => &mut self.gross_weight,
            PurchaseField::Stamp => &mut self.stamp,
            PurchaseField::Wastage => &mut self.wastage,
            PurchaseField::PurchaseMulti => &mut self.purchase_multi,
            PurchaseField::TodaysRate => &mut self.todays_rate,
            PurchaseField::Discount => &mut self.discount,
            PurchaseField::Quantity => &mut self.quantity,
            PurchaseField::SettlementMethod => &mut self.settlement_method,
            PurchaseField::RawMaterial => &mut self.raw_material,
            PurchaseField::Remarks => &mut self.remarks,
            PurchaseField::FineWeight | PurchaseField::PurchasePrice => return None,
        };
        Some(value)
    }
}

/// 派生结果, 只读; None 表示尚未算出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDerived {
    /// 3 位小数
    pub fine_weight: Option<BigDecimal>,
    /// 2 位小数
    pub purchase_price: Option<BigDecimal>,
}

/// 外部提交的草稿, 会按固定顺序回放进一张新表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PurchaseDraft {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub gross_weight: Option<String>,
    pub stamp: Option<String>,
    pub wastage: Option<String>,
    pub purchase_multi: Option<String>,
    pub discount: Option<String>,
    pub quantity: Option<String>,
    pub settlement_method: Option<String>,
    pub raw_material: Option<String>,
    pub remarks: Option<String>,
    /// 显式指定今日金价; 缺省时使用金价源的最新快照
    pub todays_rate: Option<BigDecimal>,
}

impl PurchaseDraft {
    pub fn value(&self, field: PurchaseField) -> Option<&str> {
        let value = match field {
            PurchaseField::ProductName => &self.product_name,
            PurchaseField::Category => &self.category,
            PurchaseField::Vendor => &self.vendor,
            PurchaseField::GrossWeight => &self.gross_weight,
            PurchaseField::Stamp => &self.stamp,
            PurchaseField::Wastage => &self.wastage,
            PurchaseField::PurchaseMulti => &self.purchase_multi,
            PurchaseField::Discount => &self.discount,
            PurchaseField::Quantity => &self.quantity,
            PurchaseField::SettlementMethod => &self.settlement_method,
            PurchaseField::RawMaterial => &self.raw_material,
            PurchaseField::Remarks => &self.remarks,
            PurchaseField::FineWeight
            | PurchaseField::PurchasePrice
            | PurchaseField::TodaysRate => return None,
        };
        value.as_deref()
    }
}

/// 提交给持久化协作方的采购记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// 由存储分配; 演示模式下为 None
    pub id: Option<u64>,
    pub input: PurchaseInput,
    pub derived: PurchaseDerived,
    pub settlement: SettlementMethod,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
