use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{PurchaseField, PurchaseRecord, SettlementMethod};
use crate::service::PurchaseForm;
use crate::store::PurchaseRepository;

pub const SAVED_MESSAGE: &str = "Purchase information saved successfully.";
pub const DEMO_MODE_MESSAGE: &str = "Purchase information saved locally. API integration pending.";

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMode {
    Saved,
    /// 持久化失败, 仍按成功处理 (演示模式)
    DemoMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub mode: SubmitMode,
    pub message: &'static str,
    pub record: PurchaseRecord,
}

/// 采购提交服务
pub struct PurchaseService {
    repository: Arc<dyn PurchaseRepository>,
}

impl PurchaseService {
    pub fn new(repository: Arc<dyn PurchaseRepository>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Vec<PurchaseRecord> {
        self.repository.list()
    }

    /// 校验表单后提交; 只有校验失败会阻断, 持久化失败降级为演示模式
    pub fn submit(&self, form: &PurchaseForm) -> Result<SubmitOutcome, AppError> {
        let record = build_record(form)?;

        match self.repository.create(record.clone()) {
            Ok(saved) => {
                tracing::info!(
                    "Purchase {:?} saved: {} / {}",
                    saved.id,
                    saved.input.product_name,
                    form.value(PurchaseField::PurchasePrice)
                );
                Ok(SubmitOutcome {
                    mode: SubmitMode::Saved,
                    message: SAVED_MESSAGE,
                    record: saved,
                })
            }
            Err(e) => {
                tracing::error!("Error saving purchase, continuing in demo mode: {}", e);
                Ok(SubmitOutcome {
                    mode: SubmitMode::DemoMode,
                    message: DEMO_MODE_MESSAGE,
                    record,
                })
            }
        }
    }
}

/// 检查必填字段并组装记录 (含创建时间和 YYYY-MM-DD 采购日期)
pub fn build_record(form: &PurchaseForm) -> Result<PurchaseRecord, AppError> {
    let mut invalid: Vec<String> = PurchaseField::REQUIRED
        .iter()
        .filter(|field| form.value(**field).trim().is_empty())
        .map(|field| field.to_string())
        .collect();

    let settlement = form.input().settlement_method.parse::<SettlementMethod>();
    if settlement.is_err() && !form.input().settlement_method.is_empty() {
        invalid.push(PurchaseField::SettlementMethod.to_string());
    }

    let settlement = match settlement {
        Ok(settlement) if invalid.is_empty() => settlement,
        _ => return Err(AppError::Validation(invalid)),
    };

    let now = Utc::now();
    Ok(PurchaseRecord {
        id: None,
        input: form.input().clone(),
        derived: form.derived().clone(),
        settlement,
        purchase_date: now.date_naive(),
        created_at: now,
    })
}
