use crate::{
    config::Config,
    errors::AppError,
    export::{to_csv_bytes, CSV_FILE_NAME},
    matcher::{JobMatcher, MatchReport, NoProgress},
};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::{fmt::Debug, sync::Arc};
use tokio::signal;

pub struct SharedState {
    pub matcher: Arc<JobMatcher>,
    pub config: Config,
}

pub fn router(state: Arc<SharedState>) -> Router {
    Router::new()
        .route("/api/match", post(match_jobs))
        .route("/api/match/csv", post(match_jobs_csv))
        .route("/api/config", get(get_config))
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                log::error!("failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::warn!("shutting down");
}

async fn start_app(state: Arc<SharedState>, listen: String) -> Result<(), AppError> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    log::info!("listening on {listen}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn start_daemon(matcher: JobMatcher, config: Config, listen: String) -> Result<(), AppError> {
    let state = Arc::new(SharedState {
        matcher: Arc::new(matcher),
        config,
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { start_app(state, listen).await })
}

#[derive(Debug)]
pub struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            AppError::EmptyInput => axum::http::StatusCode::BAD_REQUEST,
            _ => {
                log::error!("{self:?}");
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume: String,

    /// Desired job titles, comma-separated
    #[serde(default)]
    pub keywords: String,
}

impl Debug for MatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MatchRequest {{ resume: [REDACTED {} chars], keywords: {:?} }}",
            self.resume.chars().count(),
            self.keywords
        )
    }
}

fn run_match(matcher: Arc<JobMatcher>, payload: MatchRequest) -> Result<MatchReport, AppError> {
    tokio::task::block_in_place(move || {
        matcher.run(&payload.resume, &payload.keywords, &NoProgress)
    })
}

async fn match_jobs(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchReport>, HttpError> {
    log::debug!("payload: {payload:?}");

    let report = run_match(state.matcher.clone(), payload)?;
    Ok(Json(report))
}

async fn match_jobs_csv(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<MatchRequest>,
) -> Result<impl IntoResponse, HttpError> {
    log::debug!("payload: {payload:?}");

    let report = run_match(state.matcher.clone(), payload)?;
    let body = to_csv_bytes(&report.results)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

async fn get_config(State(state): State<Arc<SharedState>>) -> Json<Config> {
    Json(state.config.clone())
}
