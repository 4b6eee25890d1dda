use jewel_backoffice::{
    router, AppConfig, AppState, InMemoryPurchaseStore, InventoryStore, PurchaseService, RateFeed,
    SalesStore, SimulatedRateSource,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 启动金价刷新任务
    let source = SimulatedRateSource::new(Duration::from_millis(config.rate.simulated_delay_ms));
    let rate_feed = RateFeed::spawn(source, &config.rate);
    info!("Gold rate feed started, refresh every {}s", config.rate.refresh_secs);

    let state = AppState {
        rate: rate_feed.subscribe(),
        purchases: Arc::new(PurchaseService::new(Arc::new(InMemoryPurchaseStore::new(
            config.store.max_purchases,
        )))),
        inventory: Arc::new(InventoryStore::seeded()),
        sales: Arc::new(SalesStore::seeded()),
    };

    let app = router(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/gold-rate        - current 22K rate per 10g");
    info!("  POST /api/purchases/quote  - derive fine weight and purchase price");
    info!("  POST /api/purchases        - submit purchase");
    info!("  GET  /api/inventory        - filtered, sorted, paginated inventory");
    info!("  GET  /api/sales            - sales by search term and date window");
    info!("  POST /api/sales            - create sale from catalog line items");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    rate_feed.cancel();
    info!("Server stopped");

    Ok(())
}
