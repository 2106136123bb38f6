//! Tourist chat server and terminal client.
//!
//! Entry point: `tourist-chat serve` (default) or `tourist-chat chat`.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use tourist_chat::collaborator::HttpCollaborator;
use tourist_chat::config::{AppConfig, Mode};
use tourist_chat::server::start_server;
use tourist_chat::terminal::run_stdio;
use tourist_chat::widget::ChatWidget;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    let config = Arc::new(AppConfig::load().context("Configuration error")?);

    match config.mode {
        Mode::Serve => start_server(config).await,
        Mode::Chat => {
            let endpoint = Url::parse(&config.collaborator.endpoint)
                .with_context(|| format!("Invalid chat endpoint {}", config.collaborator.endpoint))?;
            info!(name: "chat.client.started", endpoint = %endpoint, "Terminal chat started");

            let mut widget = ChatWidget::new(Arc::new(HttpCollaborator::new(endpoint)));
            run_stdio(&mut widget).await?;
            Ok(())
        }
    }
}
