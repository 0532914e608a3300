use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use guessduel::core::config::GameConfig;
use guessduel::core::game::{Context, DisplayEvent, RandomRange};
use guessduel::core::scheduler::Scheduler;
use guessduel::games::rand_num::game::{STATUS_GAME_OVER, STATUS_IN_PROGRESS};
use guessduel::games::rand_num::{ComputerTurn, GuessOutcome, Guesser, NumberDuel};
use tokio::sync::mpsc;

struct Fixed(i32);

impl RandomRange for Fixed {
    fn random_in(&mut self, _min: i32, _max: i32) -> i32 {
        self.0
    }
}

#[derive(Clone, Default)]
struct Pending(Rc<RefCell<Option<ComputerTurn>>>);

impl Scheduler<ComputerTurn> for Pending {
    fn schedule(&self, _after: Duration, wakeup: ComputerTurn) {
        *self.0.borrow_mut() = Some(wakeup);
    }
}

impl Pending {
    fn take(&self) -> Option<ComputerTurn> {
        self.0.borrow_mut().take()
    }
}

struct Table {
    game: NumberDuel<Fixed, Pending>,
    pending: Pending,
    events: mpsc::UnboundedReceiver<DisplayEvent>,
}

impl Table {
    fn new(target: i32, max_attempts: u32) -> Self {
        let config = GameConfig {
            min_number: 1,
            max_number: 100,
            max_attempts,
            ..GameConfig::default()
        };
        let pending = Pending::default();
        let (tx, events) = mpsc::unbounded_channel();
        let mut game = NumberDuel::new(config, Fixed(target), pending.clone(), Context::new(tx))
            .expect("valid config");
        game.start_new_game();
        Self { game, pending, events }
    }

    fn log(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let DisplayEvent::LogAppend(line) = event {
                lines.push(line);
            }
        }
        lines
    }
}

#[test]
fn player_hits_target_first_try() {
    let mut table = Table::new(50, 12);
    table.log();

    assert_eq!(
        table.game.submit_guess("50"),
        Ok(Some(GuessOutcome::Correct(Guesser::Player)))
    );
    assert_eq!(table.log(), vec!["Player guessed: 50", "Player got it right!"]);
    assert!(!table.game.session().active);
    assert!(table.pending.take().is_none());
}

#[test]
fn player_low_then_computer_bisects() {
    let mut table = Table::new(50, 12);
    table.log();

    assert_eq!(table.game.submit_guess("25"), Ok(Some(GuessOutcome::TooLow)));
    assert_eq!(table.log(), vec!["Player guessed: 25", "Too Low"]);
    assert!(!table.game.session().is_player_turn);

    // the player can't sneak in a guess while the computer thinks
    assert_eq!(table.game.submit_guess("50"), Ok(None));
    assert_eq!(table.game.session().attempts_used, 1);

    let wakeup = table.pending.take().expect("computer turn scheduled");
    assert_eq!(
        table.game.computer_turn(wakeup),
        Some(GuessOutcome::Correct(Guesser::Computer))
    );
    assert_eq!(table.log(), vec!["Computer guessed: 50", "Computer got it right!"]);
}

#[test]
fn single_attempt_ends_immediately() {
    for guess in ["1", "99"] {
        let mut table = Table::new(50, 1);
        table.log();

        assert_eq!(
            table.game.submit_guess(guess),
            Ok(Some(GuessOutcome::Exhausted { target: 50 }))
        );
        assert!(!table.game.session().active);
        assert!(table.pending.take().is_none());
        assert_eq!(
            table.log().last().map(String::as_str),
            Some("Game Over! The correct number was 50")
        );
    }
}

#[test]
fn computer_turn_after_game_over_does_nothing() {
    let mut table = Table::new(80, 2);
    table.game.submit_guess("10").unwrap();
    let wakeup = table.pending.take().unwrap();

    // the computer's single guess exhausts the budget
    assert_eq!(
        table.game.computer_turn(wakeup),
        Some(GuessOutcome::Exhausted { target: 80 })
    );
    assert_eq!(table.game.computer_turn(wakeup), None);
    assert_eq!(table.game.session().attempts_used, 2);
}

#[test]
fn status_tracks_session_lifecycle() {
    let mut table = Table::new(7, 12);
    let mut statuses = Vec::new();
    table.game.submit_guess("7").unwrap();
    table.game.start_new_game();

    while let Ok(event) = table.events.try_recv() {
        if let DisplayEvent::StatusChange(text) = event {
            statuses.push(text);
        }
    }
    assert_eq!(
        statuses,
        vec![STATUS_IN_PROGRESS, STATUS_GAME_OVER, STATUS_IN_PROGRESS]
    );
}
