//! Tourist chat widget
//!
//! A small chat widget that forwards user text to a chat backend and renders
//! the reply, plus the reference backend it talks to.
//!
//! # Architecture
//!
//! - **Widget**: explicitly constructed [`widget::ChatWidget`] with a pure render layer
//! - **Collaborator**: the backend behind a trait, reached over HTTP in production
//! - **Server**: Axum server for the widget page and the `/chat` endpoint
//! - **Terminal**: line-oriented front end driving the widget
//!
//! # Modules
//!
//! - [`widget`]: transcript, input state, turns and rendering
//! - [`collaborator`]: collaborator trait and HTTP implementation
//! - [`intents`]: intent catalog and matcher behind `/chat`
//! - [`schedule`]: delayed, cancellable tasks
//! - [`config`]: CLI and layered configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::format_push_string)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod collaborator;
pub mod config;
pub mod error;
pub mod intents;
pub mod schedule;
pub mod server;
pub mod terminal;
pub mod widget;

use std::sync::Arc;

use crate::config::AppConfig;
use intents::IntentMatcher;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Intent matcher answering `/chat`.
    pub matcher: Arc<IntentMatcher>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
