//! Input field state and the character counter.

use serde::Serialize;

/// Length at which the counter turns to a warning.
pub const WARNING_LENGTH: usize = 400;

/// Length above which the counter turns critical.
pub const CRITICAL_LENGTH: usize = 450;

/// Whether the input and send controls accept interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputState {
    #[default]
    Enabled,
    Disabled,
}

/// Visual severity of the character counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Severity for an input of `count` characters.
    pub fn for_count(count: usize) -> Self {
        if count > CRITICAL_LENGTH {
            Self::Critical
        } else if count >= WARNING_LENGTH {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Display color for this severity.
    pub fn color(self) -> &'static str {
        match self {
            Self::Normal => "#6b7280",
            Self::Warning => "#f59e0b",
            Self::Critical => "#ef4444",
        }
    }
}

/// What the character counter currently displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CharCounter {
    pub count: usize,
    pub severity: Severity,
}

impl CharCounter {
    /// Counter for `text`, counted in Unicode scalar values.
    pub fn measure(text: &str) -> Self {
        let count = text.chars().count();
        Self {
            count,
            severity: Severity::for_count(count),
        }
    }
}

/// The text input plus its send control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub state: InputState,
    pub focused: bool,
}

impl InputField {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state == InputState::Enabled
    }

    pub(crate) fn disable(&mut self) {
        self.state = InputState::Disabled;
        self.focused = false;
    }

    /// Re-enable and take focus.
    pub(crate) fn enable(&mut self) {
        self.state = InputState::Enabled;
        self.focused = true;
    }
}
