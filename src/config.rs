use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub rate: RateConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 金价刷新配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// 刷新间隔 (秒)
    pub refresh_secs: u64,
    /// 数据源失败时使用的近似金价 (每10克)
    pub fallback: i64,
    pub currency: String,
    /// 模拟数据源的网络延迟 (毫秒)
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub max_purchases: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            rate: RateConfig {
                refresh_secs: 15 * 60,
                fallback: 68500,
                currency: "₹".to_string(),
                simulated_delay_ms: 1500,
            },
            store: StoreConfig {
                max_purchases: 10_000,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置, 例如 JEWEL_SERVER__PORT=9000
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(Self::environment())
    }

    /// 前缀与键之间用 "_", 嵌套键之间用 "__"
    fn environment() -> config::Environment {
        config::Environment::with_prefix("JEWEL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load(env: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("rate.refresh_secs", defaults.rate.refresh_secs)?
            .set_default("rate.fallback", defaults.rate.fallback)?
            .set_default("rate.currency", defaults.rate.currency)?
            .set_default("rate.simulated_delay_ms", defaults.rate.simulated_delay_ms)?
            .set_default("store.max_purchases", defaults.store.max_purchases as u64)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_refresh_every_fifteen_minutes() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.rate.refresh_secs, 900);
        assert_eq!(cfg.rate.fallback, 68500);
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn from_env_without_overrides_matches_defaults() {
        let cfg = AppConfig::from_env().expect("defaults should deserialize");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.store.max_purchases, 10_000);
        assert_eq!(cfg.rate.currency, "₹");
    }

    fn load_with(vars: &[(&str, &str)]) -> AppConfig {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load(AppConfig::environment().source(Some(source))).unwrap()
    }

    #[test]
    fn single_underscore_after_prefix_overrides_nested_keys() {
        let cfg = load_with(&[
            ("JEWEL_SERVER__PORT", "9123"),
            ("JEWEL_RATE__REFRESH_SECS", "60"),
            ("JEWEL_STORE__MAX_PURCHASES", "5"),
        ]);
        assert_eq!(cfg.server.port, 9123);
        assert_eq!(cfg.rate.refresh_secs, 60);
        assert_eq!(cfg.store.max_purchases, 5);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let cfg = load_with(&[("OTHER_SERVER__PORT", "1"), ("JEWELRY", "x")]);
        assert_eq!(cfg.server.port, 8080);
    }
}
