use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the input edge. Membership checks and the demonstration
/// itself cannot fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended before a value was read")]
    InputClosed,

    #[error("unknown language {0:?}, expected a number between 1 and 5")]
    UnknownLanguage(String),

    #[error("invalid word {0:?}, use only lowercase letters a-z")]
    InvalidWord(String),

    #[error("invalid pumping length {0:?}, expected a positive integer")]
    InvalidPumpingLength(String),
}
