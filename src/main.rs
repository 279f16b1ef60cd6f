//! Orders service entry point.

use anyhow::Result;
use orders_service::catalog::HttpCatalogClient;
use orders_service::config::Config;
use orders_service::http::{router, AppState};
use orders_service::service::OrderService;
use orders_service::store::PgOrderStore;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let catalog = HttpCatalogClient::new(&config.product_service_url, config.catalog_timeout())?;
    let orders = OrderService::new(Arc::new(catalog), Arc::new(PgOrderStore::new(db)));

    let app = router(AppState { orders })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("orders service listening on {addr}");
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
