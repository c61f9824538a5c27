use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};

use crate::state::SharedState;
use crate::widget::{
    ChatWidget, WidgetConfig,
    view::{WIDGET_SCRIPT, render_demo_page},
};

// Demo host page with a freshly rendered widget pointing at the configured endpoint.
pub async fn widget_page_handler(State(state): State<SharedState>) -> Html<String> {
    let widget = ChatWidget::new(WidgetConfig::new(state.settings.widget_api_endpoint.clone()));
    Html(render_demo_page(&widget))
}

pub async fn widget_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        WIDGET_SCRIPT,
    )
}
