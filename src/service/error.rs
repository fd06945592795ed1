use thiserror::Error;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Failures at the external service boundary. Only `Rejected` carries a
/// message the server marked as safe to show the member.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to make API request")]
    Transport(#[from] reqwest::Error),

    #[error("Draft field rejected before submission: {0}")]
    MalformedDraft(&'static str),

    #[error("Service response was missing its data payload")]
    MalformedResponse,
}

impl ServiceError {
    /// Message suitable for a notification. Anything that is not a
    /// recognized rejection collapses to a generic message so internals
    /// never leak into the UI.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Rejected(message) => message.clone(),
            _ => String::from(UNEXPECTED_ERROR_MESSAGE),
        }
    }
}
