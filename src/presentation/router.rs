use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_page_handler, chat_turn_handler, health_handler, reset_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(
            "/",
            get(chat_page_handler::<L>).post(chat_turn_handler::<L>),
        )
        .route("/reset", post(reset_handler::<L>))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}
