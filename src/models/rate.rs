use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 金价快照, 计算时只读取其副本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub rate: BigDecimal,
    pub captured_at: DateTime<Utc>,
}

/// 金价数据源当前状态 (对外发布的内容)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateState {
    pub rate: Option<BigDecimal>,
    pub currency: String,
    pub loading: bool,
    /// 非阻塞提示, 例如 "Using approximate rate"
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl RateState {
    /// 初始状态: 尚无金价, 正在加载
    pub fn loading(currency: impl Into<String>) -> Self {
        Self {
            rate: None,
            currency: currency.into(),
            loading: true,
            error: None,
            last_updated: None,
        }
    }

    /// 有金价即产生快照; 刷新过程中沿用上一次的金价和时间,
    /// 带降级提示的金价与正常金价同等对待
    pub fn snapshot(&self) -> Option<RateSnapshot> {
        let rate = self.rate.clone()?;
        Some(RateSnapshot {
            rate,
            captured_at: self.last_updated.unwrap_or_else(Utc::now),
        })
    }
}
