use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// HTTP 401. The caller is expected to send the user back to login.
    #[error("need login")]
    Unauthorized,

    /// HTTP 403 with the backend's "not participate in room" message.
    /// The caller is expected to route the user to onboarding.
    #[error("not participate in room")]
    NotInRoom,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}
