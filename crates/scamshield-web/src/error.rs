//! Error types for the page layer

use scamshield_client::ClientError;
use thiserror::Error;

/// Result alias for the page layer
pub type Result<T> = std::result::Result<T, WebError>;

/// Errors raised while assembling application state
///
/// Page operations never return these: they convert client failures into
/// load states and notifications.
#[derive(Error, Debug)]
pub enum WebError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Core(#[from] scamshield_core::Error),

    /// API client could not be constructed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A command-line request could not be completed
    #[error("{0}")]
    Command(String),
}
