use thiserror::Error;

/// Why a submitted guess was rejected before it could use up an attempt.
///
/// The `Display` text is what the player sees as a validation message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Please enter a guess.")]
    EmptyInput,
    #[error("Please enter a valid number.")]
    NotANumber(String),
    #[error("Please enter a number between {min} - {max}")]
    OutOfRange { value: i32, min: i32, max: i32 },
}

impl GuessError {
    /// Empty input is dropped without telling the player anything.
    pub fn is_silent(&self) -> bool {
        matches!(self, GuessError::EmptyInput)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minNumber ({min}) must not be greater than maxNumber ({max})")]
    InvertedRange { min: i32, max: i32 },
    #[error("maxAttempts must be at least 1")]
    NoAttempts,
}
