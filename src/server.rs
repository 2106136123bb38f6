use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::collaborator::{ChatReply, ChatRequest};
use crate::config::AppConfig;
use crate::intents::{IntentCatalog, IntentMatcher};
use crate::widget::{GREETING, Transcript, initial_view, to_html};

/// Load the intent catalog and serve until the process is stopped.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let catalog = IntentCatalog::load_or_builtin(&config.intents.path)
        .context("Failed to load intent catalog")?;
    info!(
        name: "intents.loaded",
        intents = catalog.intents.len(),
        threshold = config.intents.threshold,
        "Intent catalog loaded"
    );

    let state = AppState {
        matcher: Arc::new(IntentMatcher::new(catalog, config.intents.threshold)),
        config: Arc::clone(&config),
    };

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Routes: the widget page, the `/chat` backend and static assets.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Widget page with its initial render.
async fn index_handler() -> Html<String> {
    let transcript = Transcript::with_greeting(GREETING);
    let widget = to_html(&initial_view(&transcript));
    Html(html_shell("Guía turística de Bogotá", &widget))
}

/// POST /chat - Answer one message.
async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatReply> {
    tracing::info!(chars = req.message.chars().count(), "Received chat request");
    Json(state.matcher.reply(&req.message))
}

fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <link rel="stylesheet" href="/static/css/style.css">
    <script defer src="/static/js/widget.js"></script>
</head>
<body>
    <main class="chat-container">
        <header class="chat-header">
            <h1>{title}</h1>
            <button type="button" class="clear-chat" title="Limpiar chat"><i class="fas fa-trash"></i></button>
        </header>
{content}    </main>
</body>
</html>"#
    )
}
