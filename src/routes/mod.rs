// src/routes/mod.rs
pub mod chat;
pub mod widget;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, health_handler, root_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use widget::{widget_page_handler, widget_script_handler};

pub fn create_router() -> Router<SharedState> {
    let widget_routes = Router::new()
        .route("/", get(widget_page_handler))
        .route("/chatbot.js", get(widget_script_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .nest("/widget", widget_routes)
        .layer(TraceLayer::new_for_http())
}

/// Full application: API routes, static files from `public_dir`, permissive CORS
/// so the widget can be embedded on any origin.
pub fn build_app(state: SharedState) -> Router {
    let public = ServeDir::new(&state.settings.public_dir);
    create_router()
        .fallback_service(public)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
