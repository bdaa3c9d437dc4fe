use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{InterpretationClient, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_audio_handler, analyze_image_handler, analyze_text_handler, health_handler,
    method_not_allowed_handler, not_found_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<T, I>(state: AppState<T, I>) -> Router
where
    T: TranscriptionEngine + 'static,
    I: InterpretationClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/analyze/text", post(analyze_text_handler::<T, I>))
        .route("/api/analyze/audio", post(analyze_audio_handler::<T, I>))
        .route("/api/analyze/image", post(analyze_image_handler::<T, I>))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
