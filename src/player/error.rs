use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("track {index} is out of range for a playlist of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
