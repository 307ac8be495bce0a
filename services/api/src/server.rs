use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::advice_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use gummy_mummy::auth::TokenIssuer;
use gummy_mummy::config::AppConfig;
use gummy_mummy::engine::AdviceEngine;
use gummy_mummy::error::AppError;
use gummy_mummy::service::AdviceService;
use gummy_mummy::store::SqliteStore;
use gummy_mummy::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(SqliteStore::open(&config.database.path)?);
    let tokens = Arc::new(TokenIssuer::new(config.auth.token_config()));
    let engine = Arc::new(AdviceEngine::new());
    let service = Arc::new(AdviceService::new(store.clone(), store, tokens, engine));

    let app = advice_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "maternal-care advisory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
