//! Error taxonomy for the registration flow.

use thiserror::Error;

/// Generic text shown when the server gave no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Registration failed.";

/// Local precondition failures. Nothing is sent over the network when one of these is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please fill in all fields and agree to the terms.")]
    MissingFieldsOrTerms,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Failures reported by a [`crate::api::RegistrationApi`] implementation.
#[derive(Debug, Error)]
pub enum ApiCallError {
    #[error("invalid registration endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("registration request could not be completed: {0}")]
    Transport(String),
    #[error("registration response could not be decoded: {0}")]
    Decode(String),
    #[error("registration rejected with HTTP {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl From<reqwest::Error> for ApiCallError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// Why a dispatched submission ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server rejected registration")]
    Application {
        status: Option<u16>,
        message: Option<String>,
    },
}

impl SubmitError {
    /// Text surfaced to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Application { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string(),
        }
    }
}

impl From<ApiCallError> for SubmitError {
    fn from(value: ApiCallError) -> Self {
        match value {
            ApiCallError::Rejected { status, message } => Self::Application {
                status: Some(status),
                message,
            },
            other => Self::Transport(other.to_string()),
        }
    }
}
