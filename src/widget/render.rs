//! Pure rendering: widget state in, render instructions out.
//!
//! [`render`] never touches any output; [`to_html`] is one consumer of the
//! resulting [`WidgetView`], used by the server page.

use std::fmt::Write as _;

use serde::Serialize;

use super::chat::{ChatWidget, QUICK_REPLIES};
use super::input::{CharCounter, InputState};
use super::transcript::{Sender, Transcript};

/// Stable element identifiers of the widget surface.
pub mod ids {
    pub const MESSAGE_INPUT: &str = "messageInput";
    pub const SEND_BUTTON: &str = "sendButton";
    pub const CHAT_MESSAGES: &str = "chatMessages";
    pub const CHAR_COUNT: &str = "charCount";
    pub const LOADING: &str = "loading";
}

/// Avatar icon of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    Robot,
    User,
}

/// One message bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bubble<'a> {
    pub sender: Sender,
    pub avatar: Avatar,
    pub text: &'a str,
}

impl Bubble<'_> {
    /// CSS classes of the bubble container.
    pub fn class(&self) -> String {
        format!("message {}-message", self.sender.as_str())
    }
}

/// Everything a rendering layer needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView<'a> {
    pub bubbles: Vec<Bubble<'a>>,
    pub input_value: &'a str,
    pub input_state: InputState,
    pub input_focused: bool,
    pub counter: CharCounter,
    pub loading_visible: bool,
    pub quick_replies: &'static [&'static str],
}

/// Map a transcript to its bubbles, in order.
pub fn render_transcript(transcript: &Transcript) -> Vec<Bubble<'_>> {
    transcript
        .messages()
        .iter()
        .map(|message| Bubble {
            sender: message.sender(),
            avatar: match message.sender() {
                Sender::Bot => Avatar::Robot,
                Sender::User => Avatar::User,
            },
            text: message.text(),
        })
        .collect()
}

/// Render the full widget.
pub fn render(widget: &ChatWidget) -> WidgetView<'_> {
    let input = widget.input();
    WidgetView {
        bubbles: render_transcript(widget.transcript()),
        input_value: &input.value,
        input_state: input.state,
        input_focused: input.focused,
        counter: widget.counter(),
        loading_visible: widget.is_loading(),
        quick_replies: QUICK_REPLIES,
    }
}

/// View of a widget that has not been interacted with yet.
pub fn initial_view(transcript: &Transcript) -> WidgetView<'_> {
    WidgetView {
        bubbles: render_transcript(transcript),
        input_value: "",
        input_state: InputState::Enabled,
        input_focused: true,
        counter: CharCounter::default(),
        loading_visible: false,
        quick_replies: QUICK_REPLIES,
    }
}

/// Serialize a view as an HTML fragment. All user text is escaped.
pub fn to_html(view: &WidgetView<'_>) -> String {
    let mut html = String::new();
    let disabled = if view.input_state == InputState::Disabled {
        " disabled"
    } else {
        ""
    };
    let autofocus = if view.input_focused { " autofocus" } else { "" };

    let _ = writeln!(html, r#"<div class="chat-widget">"#);
    let _ = writeln!(
        html,
        r#"  <div id="{}" class="chat-messages" style="scroll-behavior: smooth">"#,
        ids::CHAT_MESSAGES
    );
    for bubble in &view.bubbles {
        let icon = match bubble.avatar {
            Avatar::Robot => "fa-robot",
            Avatar::User => "fa-user",
        };
        let _ = writeln!(
            html,
            r#"    <div class="{}"><div class="message-avatar"><i class="fas {icon}"></i></div><div class="message-content"><p>{}</p></div></div>"#,
            bubble.class(),
            escape(bubble.text)
        );
    }
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(
        html,
        r#"  <div id="{}" class="loading" style="display: {}"><span></span><span></span><span></span></div>"#,
        ids::LOADING,
        if view.loading_visible { "flex" } else { "none" }
    );

    let _ = writeln!(html, r#"  <div class="quick-replies">"#);
    for preset in view.quick_replies {
        let _ = writeln!(
            html,
            r#"    <button type="button" class="quick-reply" data-message="{0}">{0}</button>"#,
            escape(preset)
        );
    }
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(html, r#"  <div class="chat-input">"#);
    let _ = writeln!(
        html,
        r#"    <input id="{}" type="text" value="{}" placeholder="Escribe tu pregunta..."{disabled}{autofocus}>"#,
        ids::MESSAGE_INPUT,
        escape(view.input_value)
    );
    let _ = writeln!(
        html,
        r#"    <button id="{}" type="button"{disabled}><i class="fas fa-paper-plane"></i></button>"#,
        ids::SEND_BUTTON
    );
    let _ = writeln!(
        html,
        r#"    <span id="{}" style="color: {}">{}</span>"#,
        ids::CHAR_COUNT,
        view.counter.severity.color(),
        view.counter.count
    );
    let _ = writeln!(html, "  </div>");
    let _ = writeln!(html, "</div>");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Message;

    #[test]
    fn test_render_transcript_order() {
        let mut transcript = Transcript::with_greeting("Hola");
        transcript.push(Message::user("¿Dónde comer?"));
        transcript.push(Message::bot("En la Candelaria."));

        let bubbles = render_transcript(&transcript);
        assert_eq!(bubbles.len(), 3);
        assert_eq!(bubbles[0].avatar, Avatar::Robot);
        assert_eq!(bubbles[1].avatar, Avatar::User);
        assert_eq!(bubbles[1].class(), "message user-message");
        assert_eq!(bubbles[2].text, "En la Candelaria.");
    }

    #[test]
    fn test_to_html_escapes_text() {
        let mut transcript = Transcript::with_greeting("Hola");
        transcript.push(Message::user("<script>alert('x')</script>"));
        let view = WidgetView {
            bubbles: render_transcript(&transcript),
            input_value: "\"",
            input_state: InputState::Enabled,
            input_focused: false,
            counter: CharCounter::measure("\""),
            loading_visible: false,
            quick_replies: &[],
        };

        let html = to_html(&view);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains(r#"value="&quot;""#));
    }

    #[test]
    fn test_to_html_stable_ids() {
        let transcript = Transcript::with_greeting("Hola");
        let view = WidgetView {
            bubbles: render_transcript(&transcript),
            input_value: "",
            input_state: InputState::Disabled,
            input_focused: false,
            counter: CharCounter::default(),
            loading_visible: true,
            quick_replies: QUICK_REPLIES,
        };

        let html = to_html(&view);
        for id in [
            ids::MESSAGE_INPUT,
            ids::SEND_BUTTON,
            ids::CHAT_MESSAGES,
            ids::CHAR_COUNT,
            ids::LOADING,
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
        assert!(html.contains("display: flex"));
        assert!(html.contains(" disabled"));
    }
}
