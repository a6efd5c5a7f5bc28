//! Error types for cursor operations

use thiserror::Error;

/// Error type for cursor operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("buffer overflow: {0} bytes short")]
    Overflow(usize), // deficit
    #[error("unexpected end of buffer")]
    Underrun,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("parse error: {0}")]
    Parse(&'static str),
}
