//! Order Engine Binary
//!
//! Starts the marketplace order engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_HTTP_PORT`: HTTP server port (default: 8080)
//! - `ORDER_ENGINE_DB_PATH`: turso database path (default: `:memory:`)
//! - `ORDER_ENGINE_FEED_CAPACITY`: realtime channel capacity (default: 1000)
//! - `ORDER_ENGINE_ADMIN_IDS`: comma-separated admin user ids (default: none)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use order_engine::Settings;
use order_engine::application::ports::StaticDirectory;
use order_engine::application::use_cases::{
    AdvanceOrderStatusUseCase, InProcessSideEffects, ListOrdersUseCase, NotificationInboxUseCase,
    NotifyOrderPlacedUseCase, PlaceOrderUseCase,
};
use order_engine::infrastructure::http::{AppState, create_router};
use order_engine::infrastructure::persistence::TursoStore;
use order_engine::domain::shared::UserId;
use order_engine::infrastructure::realtime::{ChangeFeed, ChangeFeedConfig};
use order_engine::observability;

type Store = TursoStore;
type SideEffects = InProcessSideEffects<Store, StaticDirectory, ChangeFeed>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    observability::init_tracing();
    let _metrics_handle = observability::init_metrics();

    tracing::info!("Starting order engine");

    let settings = Settings::from_env()?;
    tracing::info!(
        http_port = settings.http_port,
        database_path = %settings.database_path,
        "configuration loaded"
    );

    let store = Arc::new(TursoStore::open(&settings.database_path).await?);
    let feed = Arc::new(ChangeFeed::new(ChangeFeedConfig {
        order_events_capacity: settings.change_feed_capacity,
        stock_deltas_capacity: settings.change_feed_capacity,
        notifications_capacity: settings.change_feed_capacity,
    }));
    if settings.admin_user_ids.is_empty() {
        tracing::warn!("no admin ids configured, order fan-out reaches sellers only");
    }
    let mut directory = StaticDirectory::new();
    for admin in &settings.admin_user_ids {
        directory = directory.with_admin(UserId::new(admin.clone()));
    }
    let directory = Arc::new(directory);

    let side_effects: Arc<SideEffects> = Arc::new(InProcessSideEffects::new(
        NotifyOrderPlacedUseCase::new(
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::clone(&feed),
        ),
    ));

    let state: AppState<Store, Store, Store, SideEffects> = AppState {
        place_order: Arc::new(PlaceOrderUseCase::new(
            Arc::clone(&store),
            side_effects,
            Arc::clone(&feed),
        )),
        advance_order: Arc::new(AdvanceOrderStatusUseCase::new(
            Arc::clone(&store),
            Arc::clone(&feed),
        )),
        list_orders: Arc::new(ListOrdersUseCase::new(Arc::clone(&store))),
        inbox: Arc::new(NotificationInboxUseCase::new(Arc::clone(&store))),
        feed,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let router = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.http_port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "order engine ready");

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            signal_token.cancel();
        }
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await?;

    tracing::info!("order engine stopped");
    Ok(())
}
