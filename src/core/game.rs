/// Core game interface: the commands a front-end sends in, and the display
/// events a game sends back out.
use tokio::sync::mpsc;
use tracing::trace;

/// Command interface every game exposes to the engine.
pub trait Game {
    /// Token delivered back by the scheduler when deferred work is due.
    type Wakeup: Send + 'static;

    /// Throw away the current session and start a fresh one.
    fn start_new_game(&mut self);

    /// Raw contents of the input field, as typed.
    fn submit(&mut self, raw: &str);

    fn on_wakeup(&mut self, wakeup: Self::Wakeup);
}

/// Everything a presentation layer needs to know to draw the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    LogAppend(String),
    /// Replace the whole log with a header line.
    LogReset(String),
    StatusChange(String),
    /// An empty string means nobody is to move.
    TurnChange(String),
    AttemptsRemainingChange(u32),
    /// Gates the text field and the submit action together.
    InputEnabledChange(bool),
    ValidationMessage(String),
    InputCleared,
    FocusRequested,
}

/// Outbox handed to a game so it never touches the UI directly.
#[derive(Clone)]
pub struct Context {
    pub tx: mpsc::UnboundedSender<DisplayEvent>,
}

impl Context {
    pub fn new(tx: mpsc::UnboundedSender<DisplayEvent>) -> Self {
        Self { tx }
    }

    pub fn emit(&self, event: DisplayEvent) {
        if self.tx.send(event).is_err() {
            trace!("display closed, dropping event");
        }
    }
}

/// Uniform integer in `min..=max`, supplied by the host.
pub trait RandomRange {
    fn random_in(&mut self, min: i32, max: i32) -> i32;
}

impl<R: rand::Rng> RandomRange for R {
    fn random_in(&mut self, min: i32, max: i32) -> i32 {
        self.random_range(min..=max)
    }
}
