use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::service::pricing::DEFAULT_TAX_RATE;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pricing: PricingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub tax_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/calmar".to_string(),
                max_connections: 20,
            },
            pricing: PricingConfig {
                tax_rate: DEFAULT_TAX_RATE,
            },
            log: LogConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 加载顺序: 默认值 → calmar.toml (可选) → 环境变量 APP__*
    /// DATABASE_URL 存在时覆盖数据库地址
    pub fn load() -> Result<Self, AppError> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("pricing.tax_rate", defaults.pricing.tax_rate)?
            .set_default("log.level", defaults.log.level)?
            .add_source(config::File::with_name("calmar").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
