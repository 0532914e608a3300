use std::fmt;

use tracing::{debug, info};

use crate::core::config::GameConfig;
use crate::core::error::{ConfigError, GuessError};
use crate::core::game::{Context, DisplayEvent, Game, RandomRange};
use crate::core::scheduler::Scheduler;

pub const LOG_HEADER: &str = "=== Game Log ===";
pub const STATUS_IN_PROGRESS: &str = "Game In Progress";
pub const STATUS_GAME_OVER: &str = "Game Over! Start a new game to play again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guesser {
    Player,
    Computer,
}

impl Guesser {
    pub fn name(self) -> &'static str {
        match self {
            Guesser::Player => "Player",
            Guesser::Computer => "Computer",
        }
    }

    pub fn turn_label(self) -> &'static str {
        match self {
            Guesser::Player => "Player's Turn",
            Guesser::Computer => "Computer's Turn",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Guesser::Player => Guesser::Computer,
            Guesser::Computer => Guesser::Player,
        }
    }
}

impl fmt::Display for Guesser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct(Guesser),
    /// Last attempt used up without a hit.
    Exhausted { target: i32 },
    TooLow,
    TooHigh,
}

impl GuessOutcome {
    pub fn is_terminal(self) -> bool {
        matches!(self, GuessOutcome::Correct(_) | GuessOutcome::Exhausted { .. })
    }
}

/// Scheduled computer move. Only honoured by the session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    pub session: u64,
}

/// One play-through, from picking the target to a win or running out of
/// attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub id: u64,
    pub target_number: i32,
    pub attempts_used: u32,
    pub is_player_turn: bool,
    pub active: bool,
    pub computer_lower_bound: i32,
    pub computer_upper_bound: i32,
    pub last_computer_guess: Option<i32>,
}

impl GameSession {
    fn idle(config: &GameConfig) -> Self {
        Self {
            id: 0,
            target_number: config.min_number,
            attempts_used: 0,
            is_player_turn: true,
            active: false,
            computer_lower_bound: config.min_number,
            computer_upper_bound: config.max_number,
            last_computer_guess: None,
        }
    }

    pub fn current_turn(&self) -> Guesser {
        if self.is_player_turn {
            Guesser::Player
        } else {
            Guesser::Computer
        }
    }
}

/// Player vs. computer guessing duel over a shared attempt budget.
///
/// The computer plays a bisection over its own interval, and that interval
/// only shrinks on the computer's own misses. Player guesses tell it nothing.
pub struct NumberDuel<R, S> {
    config: GameConfig,
    rng: R,
    scheduler: S,
    ctx: Context,
    session: GameSession,
    sessions_started: u64,
}

impl<R, S> NumberDuel<R, S>
where
    R: RandomRange,
    S: Scheduler<ComputerTurn>,
{
    pub fn new(config: GameConfig, rng: R, scheduler: S, ctx: Context) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = GameSession::idle(&config);
        Ok(Self {
            config,
            rng,
            scheduler,
            ctx,
            session,
            sessions_started: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn start_new_game(&mut self) {
        self.sessions_started += 1;
        let target = self.rng.random_in(self.config.min_number, self.config.max_number);

        self.session = GameSession {
            id: self.sessions_started,
            target_number: target,
            attempts_used: 0,
            is_player_turn: true,
            active: true,
            computer_lower_bound: self.config.min_number,
            computer_upper_bound: self.config.max_number,
            last_computer_guess: None,
        };
        info!(session = self.session.id, "new game started");
        debug!(session = self.session.id, target, "target picked");

        self.ctx.emit(DisplayEvent::TurnChange(Guesser::Player.turn_label().into()));
        self.ctx.emit(DisplayEvent::AttemptsRemainingChange(self.config.max_attempts));
        self.ctx.emit(DisplayEvent::LogReset(LOG_HEADER.into()));
        self.ctx.emit(DisplayEvent::StatusChange(STATUS_IN_PROGRESS.into()));
        self.ctx.emit(DisplayEvent::InputCleared);
        self.ctx.emit(DisplayEvent::InputEnabledChange(true));
        self.ctx.emit(DisplayEvent::FocusRequested);
    }

    /// Validate what the player typed and, if it is a usable guess, play it.
    ///
    /// `Ok(None)` means the guess was ignored because it is not the player's
    /// move. Rejected input never costs an attempt.
    pub fn submit_guess(&mut self, raw: &str) -> Result<Option<GuessOutcome>, GuessError> {
        if !self.session.active || !self.session.is_player_turn {
            debug!("guess ignored, not the player's move");
            return Ok(None);
        }

        let guess = match parse_guess(raw, self.config.min_number, self.config.max_number) {
            Ok(guess) => guess,
            Err(err) => {
                if !err.is_silent() {
                    self.ctx.emit(DisplayEvent::ValidationMessage(err.to_string()));
                }
                return Err(err);
            }
        };

        self.ctx.emit(DisplayEvent::InputCleared);
        Ok(self.apply_guess(guess, Guesser::Player))
    }

    /// Count the attempt, report it and decide win, loss or next turn.
    ///
    /// Does not check whose move it is; returns `None` on a finished session.
    pub fn apply_guess(&mut self, guess: i32, by: Guesser) -> Option<GuessOutcome> {
        if !self.session.active {
            return None;
        }

        self.session.attempts_used += 1;
        self.ctx.emit(DisplayEvent::LogAppend(format!("{by} guessed: {guess}")));

        let target = self.session.target_number;
        if guess == target {
            self.ctx.emit(DisplayEvent::LogAppend(format!("{by} got it right!")));
            info!(session = self.session.id, winner = %by, attempts = self.session.attempts_used, "game won");
            self.end_game();
            return Some(GuessOutcome::Correct(by));
        }

        if self.session.attempts_used >= self.config.max_attempts {
            self.ctx.emit(DisplayEvent::LogAppend(format!(
                "Game Over! The correct number was {target}"
            )));
            info!(session = self.session.id, target, "attempts exhausted");
            self.end_game();
            return Some(GuessOutcome::Exhausted { target });
        }

        let outcome = if guess < target {
            GuessOutcome::TooLow
        } else {
            GuessOutcome::TooHigh
        };
        let hint = if outcome == GuessOutcome::TooLow { "Too Low" } else { "Too High" };
        self.ctx.emit(DisplayEvent::LogAppend(hint.into()));

        if by == Guesser::Computer {
            match outcome {
                GuessOutcome::TooLow => self.session.computer_lower_bound = guess + 1,
                _ => self.session.computer_upper_bound = guess - 1,
            }
        }

        let next = by.other();
        self.session.is_player_turn = next == Guesser::Player;
        self.ctx.emit(DisplayEvent::TurnChange(next.turn_label().into()));
        self.ctx.emit(DisplayEvent::AttemptsRemainingChange(
            self.config.max_attempts - self.session.attempts_used,
        ));

        match next {
            Guesser::Computer => {
                self.ctx.emit(DisplayEvent::InputEnabledChange(false));
                self.scheduler.schedule(
                    self.config.computer_delay(),
                    ComputerTurn { session: self.session.id },
                );
            }
            Guesser::Player => {
                self.ctx.emit(DisplayEvent::InputEnabledChange(true));
                self.ctx.emit(DisplayEvent::FocusRequested);
            }
        }

        Some(outcome)
    }

    /// The computer's move, once its thinking delay has passed.
    ///
    /// A wakeup from an earlier session, or one arriving when it is not the
    /// computer's move, does nothing.
    pub fn computer_turn(&mut self, wakeup: ComputerTurn) -> Option<GuessOutcome> {
        if !self.session.active || wakeup.session != self.session.id || self.session.is_player_turn {
            debug!(
                stale = wakeup.session,
                current = self.session.id,
                "ignoring stale computer turn"
            );
            return None;
        }

        let guess = midpoint(self.session.computer_lower_bound, self.session.computer_upper_bound);
        self.session.last_computer_guess = Some(guess);
        self.apply_guess(guess, Guesser::Computer)
    }

    fn end_game(&mut self) {
        self.session.active = false;
        self.ctx.emit(DisplayEvent::InputEnabledChange(false));
        self.ctx.emit(DisplayEvent::TurnChange(String::new()));
        self.ctx.emit(DisplayEvent::StatusChange(STATUS_GAME_OVER.into()));
    }
}

impl<R, S> Game for NumberDuel<R, S>
where
    R: RandomRange,
    S: Scheduler<ComputerTurn>,
{
    type Wakeup = ComputerTurn;

    fn start_new_game(&mut self) {
        NumberDuel::start_new_game(self);
    }

    fn submit(&mut self, raw: &str) {
        if let Err(err) = self.submit_guess(raw) {
            debug!(%err, "guess rejected");
        }
    }

    fn on_wakeup(&mut self, wakeup: ComputerTurn) {
        self.computer_turn(wakeup);
    }
}

pub fn parse_guess(raw: &str, min: i32, max: i32) -> Result<i32, GuessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GuessError::EmptyInput);
    }

    let value: i32 = trimmed
        .parse()
        .map_err(|_| GuessError::NotANumber(trimmed.to_string()))?;

    if value < min || value > max {
        return Err(GuessError::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// Floor of the mean, computed wide so the ends of `i32` don't overflow.
fn midpoint(lower: i32, upper: i32) -> i32 {
    (i64::from(lower) + i64::from(upper)).div_euclid(2) as i32
}
