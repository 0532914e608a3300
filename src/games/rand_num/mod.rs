pub mod game;
pub use game::{ComputerTurn, GameSession, GuessOutcome, Guesser, NumberDuel};

use crate::core::config::GameConfig;
use crate::core::error::ConfigError;
use crate::core::game::Context;
use crate::core::scheduler::TokioScheduler;
use crate::games::GameInfo;

pub const INFO: GameInfo = GameInfo {
    name: "Number Duel",
    description: "Outguess the computer - alternate turns against a shared attempt budget",
};

/// The duel as the engine runs it: thread-local RNG, tokio timers.
pub type LiveDuel = NumberDuel<rand::rngs::ThreadRng, TokioScheduler<ComputerTurn>>;

pub fn new_live_duel(
    config: GameConfig,
    scheduler: TokioScheduler<ComputerTurn>,
    ctx: Context,
) -> Result<LiveDuel, ConfigError> {
    NumberDuel::new(config, rand::rng(), scheduler, ctx)
}
