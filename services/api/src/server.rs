use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCompanyRepository, InMemoryResponseRepository};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use elo_nr01::assessment::AssessmentService;
use elo_nr01::config::AppConfig;
use elo_nr01::error::AppError;
use elo_nr01::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let companies = InMemoryCompanyRepository::seeded();
    for company in companies.companies() {
        info!(
            company = %company.id,
            headcount = company.headcount,
            valid_until = %company.valid_until,
            "company registered"
        );
    }

    let service = Arc::new(AssessmentService::new(
        Arc::new(InMemoryResponseRepository::default()),
        Arc::new(companies),
        config.scoring.clone(),
    ));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        attention_threshold = config.scoring.attention_threshold,
        risk_cutoff = config.scoring.risk_cutoff,
        "psychosocial risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
