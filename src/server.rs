use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::profiles::{NotionClient, ProfileService};
use crate::routes::{with_profile_routes, AppState};
use crate::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let store = Arc::new(NotionClient::new(&config.store));
    let service = Arc::new(ProfileService::new(
        store,
        config.expiry_policy,
        config.agency.clone(),
    ));

    let app = with_profile_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ?config.expiry_policy, "candidate profile service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
