use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    PurchaseDerived, PurchaseDraft, PurchaseField, PurchaseInput, RateSnapshot, RateState,
    Recompute,
};
use crate::service::pricing;

/// 编辑被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    ReadOnly,
    NotNumeric,
}

/// 单次编辑的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// 未写入, 表单保持原样
    Rejected(RejectReason),
    /// 已写入; 列出本次实际被更新的派生字段
    Applied { recomputed: Vec<PurchaseField> },
}

/// 草稿回放时用户字段的写入顺序
const REPLAY_ORDER: [PurchaseField; 12] = [
    PurchaseField::ProductName,
    PurchaseField::Category,
    PurchaseField::Vendor,
    PurchaseField::SettlementMethod,
    PurchaseField::Remarks,
    PurchaseField::GrossWeight,
    PurchaseField::Stamp,
    PurchaseField::Wastage,
    PurchaseField::PurchaseMulti,
    PurchaseField::Discount,
    PurchaseField::RawMaterial,
    PurchaseField::Quantity,
];

/// 采购表单: 一组命名单元格 + 写入后同步执行的重算规则
///
/// 每个表单实例独占自己的输入与派生值, 不与其他表单共享。
#[derive(Debug, Clone)]
pub struct PurchaseForm {
    input: PurchaseInput,
    derived: PurchaseDerived,
    rate_captured_at: Option<DateTime<Utc>>,
    rate_advisory: Option<String>,
}

impl Default for PurchaseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseForm {
    pub fn new() -> Self {
        Self {
            input: PurchaseInput::blank(),
            derived: PurchaseDerived::default(),
            rate_captured_at: None,
            rate_advisory: None,
        }
    }

    pub fn input(&self) -> &PurchaseInput {
        &self.input
    }

    pub fn derived(&self) -> &PurchaseDerived {
        &self.derived
    }

    pub fn rate_advisory(&self) -> Option<&str> {
        self.rate_advisory.as_deref()
    }

    /// 单元格当前文本 (派生字段按固定小数位输出, 未算出时为空)
    pub fn value(&self, field: PurchaseField) -> String {
        match field {
            PurchaseField::FineWeight => self
                .derived
                .fine_weight
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            PurchaseField::PurchasePrice => self
                .derived
                .purchase_price
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            other => self.input.cell(other).unwrap_or_default().to_string(),
        }
    }

    /// 用户编辑单元格
    pub fn apply_edit(&mut self, field: PurchaseField, text: &str) -> EditOutcome {
        if field.is_read_only() {
            return EditOutcome::Rejected(RejectReason::ReadOnly);
        }
        if field.is_numeric() && !pricing::is_numeric_text(text) {
            tracing::debug!("Rejected non-numeric edit to {}: {:?}", field, text);
            return EditOutcome::Rejected(RejectReason::NotNumeric);
        }

        let Some(cell) = self.input.cell_mut(field) else {
            return EditOutcome::Rejected(RejectReason::ReadOnly);
        };
        cell.clear();
        cell.push_str(text);

        let recomputed = match field.recompute() {
            Some(Recompute::FineWeight) => self.recompute_fine_weight(),
            Some(Recompute::PurchasePrice) => {
                if self.recompute_purchase_price() {
                    vec![PurchaseField::PurchasePrice]
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        };

        EditOutcome::Applied { recomputed }
    }

    /// 重算纯重; 成功后立即重算采购价。返回实际更新的派生字段。
    pub fn recompute_fine_weight(&mut self) -> Vec<PurchaseField> {
        let gross = pricing::parse_decimal(&self.input.gross_weight);
        let stamp = pricing::parse_decimal(&self.input.stamp);
        let wastage = pricing::parse_decimal(&self.input.wastage);

        let Some(fine_weight) = pricing::fine_weight(&gross, &stamp, &wastage) else {
            tracing::debug!("Fine weight skipped: gross={}, stamp={}, wastage={}", gross, stamp, wastage);
            return Vec::new();
        };
        self.derived.fine_weight = Some(fine_weight);

        let mut updated = vec![PurchaseField::FineWeight];
        if self.recompute_purchase_price() {
            updated.push(PurchaseField::PurchasePrice);
        }
        updated
    }

    /// 用当前已存储的纯重重算采购价; 条件不满足时保留旧值并返回 false
    pub fn recompute_purchase_price(&mut self) -> bool {
        let fine_weight = self
            .derived
            .fine_weight
            .clone()
            .unwrap_or_else(BigDecimal::zero);
        let rate = pricing::parse_decimal(&self.input.todays_rate);
        let multi = pricing::parse_decimal(&self.input.purchase_multi);
        let discount = pricing::parse_decimal(&self.input.discount);
        let raw_material = pricing::parse_decimal(&self.input.raw_material);

        match pricing::purchase_price(&fine_weight, &rate, &multi, &discount, &raw_material) {
            Some(price) => {
                self.derived.purchase_price = Some(price);
                true
            }
            None => {
                tracing::debug!(
                    "Purchase price skipped: fine_weight={}, rate={}, multi={}",
                    fine_weight, rate, multi
                );
                false
            }
        }
    }

    /// 金价源推送新状态; 返回今日金价是否被写入
    pub fn apply_rate(&mut self, state: &RateState) -> bool {
        match state.snapshot() {
            Some(snapshot) => self.apply_rate_snapshot(&snapshot, state.error.clone()),
            None => false,
        }
    }

    /// 今日金价为空或比快照旧时写入, 之后若纯重和倍率均已有值则重算采购价
    pub fn apply_rate_snapshot(&mut self, snapshot: &RateSnapshot, advisory: Option<String>) -> bool {
        let stale = self.input.todays_rate.is_empty()
            || self
                .rate_captured_at
                .map_or(true, |captured| snapshot.captured_at > captured);
        if !stale {
            return false;
        }

        self.input.todays_rate = snapshot.rate.to_string();
        self.rate_captured_at = Some(snapshot.captured_at);
        self.rate_advisory = advisory;

        if self.derived.fine_weight.is_some() && !self.input.purchase_multi.is_empty() {
            self.recompute_purchase_price();
        }
        true
    }

    /// 恢复到打开时的状态, 但保留最近一次写入的金价
    pub fn reset(&mut self) {
        let todays_rate = std::mem::take(&mut self.input.todays_rate);
        self.input = PurchaseInput::blank();
        self.input.todays_rate = todays_rate;
        self.derived = PurchaseDerived::default();
    }

    /// 把草稿按固定顺序回放进新表单: 先金价, 再各用户字段。
    /// 显式金价必须为正, 否则记为被拒绝并改用金价源的金价。
    /// 返回表单以及被拒绝的字段。
    pub fn from_draft(draft: &PurchaseDraft, rate: &RateState) -> (Self, Vec<PurchaseField>) {
        let mut form = Self::new();
        let mut rejected = Vec::new();

        match &draft.todays_rate {
            Some(explicit) if *explicit > BigDecimal::zero() => {
                let snapshot = RateSnapshot {
                    rate: explicit.clone(),
                    captured_at: Utc::now(),
                };
                form.apply_rate_snapshot(&snapshot, None);
            }
            Some(explicit) => {
                tracing::debug!("Rejected non-positive explicit rate: {}", explicit);
                rejected.push(PurchaseField::TodaysRate);
                form.apply_rate(rate);
            }
            None => {
                form.apply_rate(rate);
            }
        }

        for field in REPLAY_ORDER {
            let Some(text) = draft.value(field) else {
                continue;
            };
            if let EditOutcome::Rejected(_) = form.apply_edit(field, text) {
                rejected.push(field);
            }
        }

        (form, rejected)
    }
}
