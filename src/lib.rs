pub mod core {
	pub mod config;
	pub mod engine;
	pub mod error;
	pub mod game;
	pub mod renderer;
	pub mod scheduler;
	pub mod screen;
	pub mod terminal;
}

pub mod cli;
pub mod games;

// Re-export for convenience
pub use crate::core::game::{Context, DisplayEvent, Game};
