use bigdecimal::BigDecimal;
use chrono::Utc;
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::RateConfig;
use crate::models::RateState;

/// 降级时展示给用户的提示
pub const FALLBACK_ADVISORY: &str = "Using approximate rate";

const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;
const PURITY_22K: f64 = 0.9167;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Rate source unavailable: {0}")]
    Unavailable(String),
}

/// 金价数据源: 返回当前每10克金价
pub trait RateSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<BigDecimal, RateError>> + Send;
}

/// 模拟金价源: 国际金价(美元/盎司)随机波动, 换算为每10克22K金的卢比价
#[derive(Debug, Clone)]
pub struct SimulatedRateSource {
    pub base_usd_per_ounce: f64,
    pub usd_to_inr: f64,
    pub delay: Duration,
}

impl SimulatedRateSource {
    pub fn new(delay: Duration) -> Self {
        Self {
            base_usd_per_ounce: 2300.0,
            usd_to_inr: 83.0,
            delay,
        }
    }

    /// 根据两个波动因子计算金价, 四舍五入到整数
    pub fn price_for(&self, gold_factor: f64, fx_factor: f64) -> i64 {
        let usd_per_ounce = self.base_usd_per_ounce * gold_factor;
        let usd_per_gram = usd_per_ounce / GRAMS_PER_TROY_OUNCE * PURITY_22K;
        let inr_per_gram = usd_per_gram * self.usd_to_inr * fx_factor;
        (inr_per_gram * 10.0).round() as i64
    }
}

impl RateSource for SimulatedRateSource {
    async fn fetch(&self) -> Result<BigDecimal, RateError> {
        tokio::time::sleep(self.delay).await;

        let (gold_factor, fx_factor) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(0.98..=1.02), rng.gen_range(0.99..=1.01))
        };
        let price = self.price_for(gold_factor, fx_factor);
        if price <= 0 {
            return Err(RateError::Unavailable(format!("non-positive simulated price {}", price)));
        }

        tracing::debug!(
            "Simulated gold {:.2} USD/oz, fx {:.2}",
            self.base_usd_per_ounce * gold_factor,
            self.usd_to_inr * fx_factor
        );
        Ok(BigDecimal::from(price))
    }
}

/// 周期刷新任务的句柄; 调用 cancel 或 drop 时停止任务
#[derive(Debug)]
pub struct RateFeed {
    receiver: watch::Receiver<RateState>,
    task: JoinHandle<()>,
}

impl RateFeed {
    /// 启动刷新任务: 立即拉取一次, 此后每个间隔拉取一次
    pub fn spawn<S: RateSource>(source: S, config: &RateConfig) -> Self {
        let (sender, receiver) = watch::channel(RateState::loading(config.currency.clone()));
        let source = Arc::new(source);
        let interval = Duration::from_secs(config.refresh_secs.max(1));
        let fallback = BigDecimal::from(config.fallback);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                refresh_once(source.as_ref(), &sender, &fallback).await;
            }
        });

        Self { receiver, task }
    }

    /// 订阅金价状态变化
    pub fn subscribe(&self) -> watch::Receiver<RateState> {
        self.receiver.clone()
    }

    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for RateFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// 拉取一次金价并发布; 失败时发布降级金价和提示, 不留空
pub async fn refresh_once<S: RateSource>(
    source: &S,
    sender: &watch::Sender<RateState>,
    fallback: &BigDecimal,
) {
    // 刷新期间保留上一次的金价和提示
    sender.send_modify(|state| state.loading = true);

    let result = source.fetch().await;
    let now = Utc::now();

    sender.send_modify(|state| {
        state.loading = false;
        state.last_updated = Some(now);
        match result {
            Ok(rate) => {
                tracing::info!("Gold rate refreshed: {} {}", state.currency, rate);
                state.rate = Some(rate);
                state.error = None;
            }
            Err(e) => {
                tracing::warn!("Gold rate fetch failed, using fallback {}: {}", fallback, e);
                state.rate = Some(fallback.clone());
                state.error = Some(FALLBACK_ADVISORY.to_string());
            }
        }
    });
}
