//! The chat widget: one explicitly constructed instance per conversation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::input::{CharCounter, InputField, InputState};
use super::transcript::{Message, Sender, Transcript};
use crate::collaborator::ChatCollaborator;
use crate::error::ExchangeFailed;
use crate::schedule::DelayedTask;

/// Greeting shown as the first transcript entry.
pub const GREETING: &str = "¡Hola! Soy tu guía turístico de Bogotá. Pregúntame por lugares para visitar, \
                            restaurantes, el clima, horarios o transporte.";

/// Bot text shown in place of a reply when the exchange fails.
pub const FALLBACK_TEXT: &str = "Lo siento, hubo un error. Por favor, intenta de nuevo.";

/// Suggested replies offered under the transcript.
pub const QUICK_REPLIES: &[&str] = &[
    "¿Qué lugares puedo visitar en la ciudad?",
    "¿Dónde puedo comer bien?",
    "¿Qué clima hace hoy?",
    "¿A qué hora abre el museo?",
    "¿Cómo me muevo en la ciudad?",
];

/// Idle time after the last keystroke before `TypingIdle` fires.
pub const TYPING_IDLE_DELAY: Duration = Duration::from_millis(2000);

/// Delay before the message list is scrolled to the bottom.
pub const SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Notifications for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A message was pushed at `index`. Sent immediately.
    MessageAppended { index: usize, sender: Sender },
    /// The message list should scroll to its end.
    ScrollToBottom,
    /// The user stopped typing. Nothing reacts to this yet.
    TypingIdle,
}

/// Answer to "clear the chat?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

/// How a submitted turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing happened: empty input, or a turn was already in flight.
    Ignored,
    /// The collaborator replied.
    Replied,
    /// The exchange failed and the fallback text was shown.
    Failed,
}

/// A turn whose user message is on screen and whose reply is outstanding.
#[derive(Debug)]
#[must_use = "a pending turn leaves the input disabled until completed"]
pub struct PendingTurn {
    message: String,
}

impl PendingTurn {
    /// Trimmed text to send to the collaborator.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Chat widget state and operations.
pub struct ChatWidget {
    collaborator: Arc<dyn ChatCollaborator>,
    transcript: Transcript,
    input: InputField,
    counter: CharCounter,
    loading: bool,
    events: Option<mpsc::UnboundedSender<WidgetEvent>>,
    typing_idle: DelayedTask,
    scroll: DelayedTask,
}

impl fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatWidget")
            .field("transcript", &self.transcript)
            .field("input", &self.input)
            .field("counter", &self.counter)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl ChatWidget {
    /// Create a widget with the default greeting.
    pub fn new(collaborator: Arc<dyn ChatCollaborator>) -> Self {
        Self::with_greeting(collaborator, GREETING)
    }

    /// Create a widget whose transcript starts with `greeting`.
    pub fn with_greeting(
        collaborator: Arc<dyn ChatCollaborator>,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            collaborator,
            transcript: Transcript::with_greeting(greeting),
            input: InputField::default(),
            counter: CharCounter::default(),
            loading: false,
            events: None,
            typing_idle: DelayedTask::new("typing_idle"),
            scroll: DelayedTask::new("scroll"),
        }
    }

    /// Receive [`WidgetEvent`]s. Replaces any previous subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<WidgetEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn input(&self) -> &InputField {
        &self.input
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input.state
    }

    #[must_use]
    pub fn counter(&self) -> CharCounter {
        self.counter
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the input field value, as on every keystroke.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input.value = value.into();
        self.update_character_count();

        let events = self.events.clone();
        self.typing_idle.schedule(TYPING_IDLE_DELAY, move || {
            emit(events.as_ref(), WidgetEvent::TypingIdle);
        });
    }

    /// Recompute the counter from the current input value.
    pub fn update_character_count(&mut self) -> CharCounter {
        self.counter = CharCounter::measure(&self.input.value);
        self.counter
    }

    /// First half of a turn: show the user message and lock the input.
    ///
    /// Returns `None` when the trimmed text is empty or a turn is already
    /// in flight.
    pub fn begin_turn(&mut self, raw_text: &str) -> Option<PendingTurn> {
        if !self.input.is_enabled() {
            tracing::debug!("Turn ignored: input disabled");
            return None;
        }

        let message = raw_text.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();

        self.append(Message::user(message.clone()));
        self.input.value.clear();
        self.update_character_count();
        self.input.disable();
        self.set_loading(true);

        tracing::debug!(name: "chat.turn.started", chars = message.chars().count(), "Turn started");
        Some(PendingTurn { message })
    }

    /// Second half of a turn: show the reply (or the fallback) and unlock.
    pub fn complete_turn(
        &mut self,
        turn: PendingTurn,
        result: Result<String, ExchangeFailed>,
    ) -> TurnOutcome {
        self.set_loading(false);

        let outcome = match result {
            Ok(reply) => {
                self.append(Message::bot(reply));
                TurnOutcome::Replied
            }
            Err(error) => {
                tracing::warn!(
                    name: "chat.turn.failed",
                    error = %error,
                    chars = turn.message.chars().count(),
                    "Chat exchange failed; showing fallback"
                );
                self.append(Message::bot(FALLBACK_TEXT));
                TurnOutcome::Failed
            }
        };

        self.input.enable();
        outcome
    }

    /// Run a full turn for `raw_text`.
    pub async fn submit_turn(&mut self, raw_text: &str) -> TurnOutcome {
        let Some(turn) = self.begin_turn(raw_text) else {
            return TurnOutcome::Ignored;
        };

        let collaborator = Arc::clone(&self.collaborator);
        let result = collaborator.exchange(turn.message()).await;
        self.complete_turn(turn, result)
    }

    /// Submit whatever is in the input field (Enter key / send button).
    pub async fn send_input(&mut self) -> TurnOutcome {
        let raw = self.input.value.clone();
        self.submit_turn(&raw).await
    }

    /// Put `preset` in the input field and send it.
    pub async fn quick_submit(&mut self, preset: &str) -> TurnOutcome {
        self.input.value = preset.to_string();
        self.send_input().await
    }

    /// Remove every message but the greeting, if the user confirmed.
    ///
    /// Returns the number of messages removed.
    pub fn clear_transcript(&mut self, confirmation: Confirmation) -> usize {
        if confirmation == Confirmation::Declined {
            return 0;
        }
        let removed = self.transcript.truncate_to_first();
        tracing::debug!(name: "chat.transcript.cleared", removed, "Transcript cleared");
        removed
    }

    fn append(&mut self, message: Message) {
        let event = WidgetEvent::MessageAppended {
            index: self.transcript.len(),
            sender: message.sender(),
        };
        self.transcript.push(message);
        emit(self.events.as_ref(), event);
        self.schedule_scroll();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.schedule_scroll();
        }
    }

    fn schedule_scroll(&mut self) {
        let events = self.events.clone();
        self.scroll.schedule(SCROLL_DELAY, move || {
            emit(events.as_ref(), WidgetEvent::ScrollToBottom);
        });
    }
}

fn emit(events: Option<&mpsc::UnboundedSender<WidgetEvent>>, event: WidgetEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ChatCollaborator for Echo {
        async fn exchange(&self, message: &str) -> Result<String, ExchangeFailed> {
            Ok(format!("eco: {message}"))
        }
    }

    fn widget() -> ChatWidget {
        ChatWidget::new(Arc::new(Echo))
    }

    #[test]
    fn test_begin_turn_trims_and_locks() {
        let mut widget = widget();
        widget.set_input("  hola  ");

        let turn = widget.begin_turn("  hola  ").unwrap();
        assert_eq!(turn.message(), "hola");
        assert_eq!(widget.transcript().len(), 2);
        assert_eq!(widget.transcript().last().unwrap().sender(), Sender::User);
        assert_eq!(widget.input_state(), InputState::Disabled);
        assert!(widget.input().value.is_empty());
        assert_eq!(widget.counter().count, 0);
        assert!(widget.is_loading());

        // A second turn cannot start while one is pending.
        assert!(widget.begin_turn("otra").is_none());

        let outcome = widget.complete_turn(turn, Ok("respuesta".to_string()));
        assert_eq!(outcome, TurnOutcome::Replied);
        assert!(!widget.is_loading());
        assert!(widget.input().focused);
    }

    #[test]
    fn test_begin_turn_blank() {
        let mut widget = widget();
        assert!(widget.begin_turn("   \n\t").is_none());
        assert!(widget.begin_turn("").is_none());
        assert_eq!(widget.transcript().len(), 1);
        assert_eq!(widget.input_state(), InputState::Enabled);
    }

    #[tokio::test]
    async fn test_submit_turn_echo() {
        let mut widget = widget();
        assert_eq!(widget.submit_turn("hola").await, TurnOutcome::Replied);
        assert_eq!(widget.transcript().last().unwrap().text(), "eco: hola");
    }

    #[test]
    fn test_append_notifies_immediately() {
        let mut widget = widget();
        let mut events = widget.subscribe();

        let turn = widget.begin_turn("hola").unwrap();
        assert_eq!(
            events.try_recv(),
            Ok(WidgetEvent::MessageAppended { index: 1, sender: Sender::User })
        );
        widget.complete_turn(turn, Ok("x".to_string()));
        assert_eq!(
            events.try_recv(),
            Ok(WidgetEvent::MessageAppended { index: 2, sender: Sender::Bot })
        );
    }

    #[test]
    fn test_clear_declined() {
        let mut widget = widget();
        let turn = widget.begin_turn("hola").unwrap();
        widget.complete_turn(turn, Ok("x".to_string()));

        assert_eq!(widget.clear_transcript(Confirmation::Declined), 0);
        assert_eq!(widget.transcript().len(), 3);
        assert_eq!(widget.clear_transcript(Confirmation::Accepted), 2);
        assert_eq!(widget.transcript().messages()[0].text(), GREETING);
    }
}
