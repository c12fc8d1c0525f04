use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProfileStore};
use crate::notes::ConfiguredNotes;
use crate::routes::with_profile_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use health_profiler::config::AppConfig;
use health_profiler::error::AppError;
use health_profiler::telemetry;
use health_profiler::workflows::profiles::ProfilingService;
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

    let store = Arc::new(InMemoryProfileStore::default());
    let notes = ConfiguredNotes::from_config(&config.notes)?;
    let notes_enabled = notes.is_enabled();
    let profiling_service = Arc::new(
        ProfilingService::new(store, Arc::new(notes)).with_notes_timeout(config.notes.timeout),
    );

    let app = with_profile_routes(profiling_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, notes_enabled, "health profiler ready");

    axum::serve(listener, app).await?;
    Ok(())
}
