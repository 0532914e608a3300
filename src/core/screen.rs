/// What is currently on screen, rebuilt from the game's display events.
use crate::core::game::DisplayEvent;

/// Older validation messages scroll away past this many.
pub const MAX_NOTICES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub log: Vec<String>,
    pub status: String,
    /// Validation messages shown under the status until it next changes.
    pub notices: Vec<String>,
    pub turn: String,
    pub attempts_left: Option<u32>,
    pub input_enabled: bool,
    pub focused: bool,
    pub input: String,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::LogAppend(line) => self.log.push(line),
            DisplayEvent::LogReset(header) => {
                self.log.clear();
                self.log.push(header);
            }
            DisplayEvent::StatusChange(text) => {
                self.status = text;
                self.notices.clear();
            }
            DisplayEvent::TurnChange(text) => self.turn = text,
            DisplayEvent::AttemptsRemainingChange(n) => self.attempts_left = Some(n),
            DisplayEvent::InputEnabledChange(enabled) => {
                self.input_enabled = enabled;
                if !enabled {
                    self.focused = false;
                }
            }
            DisplayEvent::ValidationMessage(text) => {
                if self.notices.len() >= MAX_NOTICES {
                    self.notices.remove(0);
                }
                self.notices.push(text);
            }
            DisplayEvent::InputCleared => self.input.clear(),
            DisplayEvent::FocusRequested => self.focused = self.input_enabled,
        }
    }

    /// Typing only lands while the field is enabled.
    pub fn type_char(&mut self, c: char) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.focused = true;
        self.input.push(c);
        true
    }

    pub fn backspace(&mut self) {
        if self.input_enabled {
            self.input.pop();
        }
    }

    pub fn accepts_input(&self) -> bool {
        self.input_enabled && self.focused
    }
}

/// How a log line should stand out, for whichever front-end draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Header,
    Hint,
    Win,
    Loss,
}

impl Tone {
    pub fn of(line: &str) -> Self {
        if line.starts_with("===") {
            Tone::Header
        } else if line.ends_with("got it right!") {
            Tone::Win
        } else if line.starts_with("Game Over") {
            Tone::Loss
        } else if line.starts_with("Too ") {
            Tone::Hint
        } else {
            Tone::Plain
        }
    }
}
