//! Error types

mod api;
mod auth;

pub use api::*;
pub use auth::*;

/// Top-level error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error during authentication.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An operation was attempted in a state that does not allow it.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
