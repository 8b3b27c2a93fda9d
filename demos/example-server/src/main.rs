use ignitor::lifecycle::ApplicationHealth;
use ignitor::persistence::MemoryDatabase;
use ignitor::prelude::*;
use std::time::Duration;
use tower_http::trace::TraceLayer;

mod modules;

use modules::product::ProductModule;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    ignitor::logging::init(&config.log)?;

    tracing::info!("🚀 Starting {} ({})...", config.app_name, config.environment);

    let addr = config.listen_addr();
    let context = Arc::new(Context::new(config, Arc::new(MemoryDatabase::new())));

    let mut app = Application::builder()
        .context(context)
        .module(ProductModule::default())
        .init_timeout(Duration::from_secs(30))
        .build()
        .await?;

    let health = Arc::new(app.health().await);
    let router = app
        .router()
        .route("/health", axum::routing::get(move || health_report(Arc::clone(&health))))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("✅ Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("🛑 Initiating graceful shutdown...");
    app.shutdown().await?;
    tracing::info!("👋 Server stopped");

    Ok(())
}

/// Module health captured at startup.
async fn health_report(health: Arc<ApplicationHealth>) -> Json<ApplicationHealth> {
    Json(health.as_ref().clone())
}
