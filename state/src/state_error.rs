use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A reason why a command or record was rejected.
pub enum StateError {
    #[error("episode index {index} is out of range for a playlist of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid episode duration {0:?}")]
    InvalidDuration(String),
}
