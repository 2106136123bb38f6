//! Chat widget: transcript, input handling, turns and rendering.
//!
//! # Structure
//!
//! - [`transcript`]: messages and their ordering
//! - [`input`]: input field state and the character counter
//! - [`chat`]: the [`ChatWidget`] and its operations
//! - [`render`]: pure mapping from widget state to render instructions

pub mod chat;
pub mod input;
pub mod render;
pub mod transcript;

pub use chat::{
    ChatWidget, Confirmation, FALLBACK_TEXT, GREETING, PendingTurn, QUICK_REPLIES, TurnOutcome,
    WidgetEvent,
};
pub use input::{CharCounter, InputField, InputState, Severity};
pub use render::{Avatar, Bubble, WidgetView, initial_view, render, render_transcript, to_html};
pub use transcript::{Message, Sender, Transcript};
