use calmar_ledger::{api, create_pool, AppConfig, CrmService, PgMovementStore, PricingEngine};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置
    let config = AppConfig::load()?;

    // 初始化日志 - 本地时间格式, RUST_LOG 优先于配置
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    info!(
        "Starting server on {}:{} (tax rate {})",
        config.server.host, config.server.port, config.pricing.tax_rate
    );

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created");

    let pricing = PricingEngine::new(config.pricing.tax_rate);
    let store = Arc::new(PgMovementStore::new(pool));
    let state = api::AppState {
        crm: Arc::new(CrmService::new(store, pricing)),
        pricing,
    };

    let app = api::router(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/pricing/breakdown?gross=&tax_rate=");
    info!("  GET /api/pricing/cost?net=&tax_rate=");
    info!("  GET /api/crm/debts | /api/crm/debts/by-client | /api/crm/debts.csv");
    info!("  GET /api/crm/stats?reference_date=YYYY-MM-DD");
    info!("  GET /api/crm/movements/:id/balance");
    info!("  GET /api/crm/reconciliation");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
