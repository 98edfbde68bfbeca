//! plancritic-api - HTTP relay between the upload form and the vision model.

pub mod config;
mod error;
pub mod handlers;
pub mod telemetry;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use plancritic_core::{defaults, AnalysisResponse, Scores};
use plancritic_inference::PlanAnalyzer;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// STATE AND ROUTER
// =============================================================================

/// Application state shared across handlers. Immutable; each request is
/// independent.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: PlanAnalyzer,
}

impl AppState {
    pub fn new(analyzer: PlanAnalyzer) -> Self {
        Self { analyzer }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "plancritic API",
        description = "Floor-plan critique relay to a multimodal model"
    ),
    paths(handlers::analyze::analyze_plan, handlers::health::health),
    components(schemas(AnalysisResponse, Scores, ErrorBody, handlers::health::HealthResponse)),
    tags(
        (name = "Analysis", description = "Plan upload and critique"),
        (name = "System", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Build the application router with its middleware stack.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/openapi.json", get(handlers::health::openapi_json))
        .route(defaults::ANALYZE_PATH, post(handlers::analyze::analyze_plan))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(std::time::Duration::from_secs(3600)),
        )
        // Overflow surfaces as a multipart read error, answered with 500 {error}.
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}
