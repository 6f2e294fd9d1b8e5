use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Model not allowed: {0}")]
    ModelNotAllowed(String),

    #[error("OpenRouter API key is not set")]
    MissingCredential,

    #[error("OpenRouter API returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid inference request: {0}")]
    InvalidRequest(String),

    #[error("Exhausted inference validation after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        last_response: Option<String>,
    },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Why a single attempt's response was thrown away. Never surfaced to callers;
/// the engine logs it and moves on to the next attempt.
#[derive(Error, Debug)]
pub enum ResponseRejection {
    #[error("provider returned no choices")]
    NoChoices,

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response does not match schema: {0}")]
    Validation(String),
}
