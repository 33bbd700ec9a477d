use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore, PromptBuffer};
use crate::routes::with_diagnosis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use unstuck::config::AppConfig;
use unstuck::diagnosis::{DiagnosisService, Registry};
use unstuck::error::AppError;
use unstuck::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let registry = Arc::new(Registry::standard()?);
    info!(
        core_questions = registry.core_questions().len(),
        threshold = config.diagnosis.confidence_threshold,
        supplementary_limit = config.diagnosis.supplementary_limit,
        session_idle_ttl_secs = config.sessions.idle_ttl_secs,
        "question registry loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let diagnosis_service = Arc::new(DiagnosisService::new(
        registry,
        Arc::new(InMemorySessionStore::with_idle_ttl(
            config.sessions.idle_ttl(),
        )),
        Arc::new(PromptBuffer::default()),
        config.diagnosis,
    ));

    let app = with_diagnosis_routes(diagnosis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "diagnosis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
