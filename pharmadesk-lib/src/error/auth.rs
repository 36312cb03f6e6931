//! Authentication error types

/// Errors that can occur during authentication flows.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The session token is missing or has expired.
    #[error("Token expired or missing")]
    TokenExpired,

    /// The backend rejected the credentials.
    #[error("Authentication rejected: {0}")]
    Rejected(String),

    /// Network error while talking to the auth endpoint.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
