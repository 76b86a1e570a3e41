//! Domain errors for the release verifier.

use thiserror::Error;

/// Failures reported by a [`RepositoryGateway`](crate::domain::ports::RepositoryGateway).
///
/// Checks never propagate these past their own step: every variant is
/// folded into a failed [`StepResult`](crate::domain::models::StepResult)
/// with the rendered message as a diagnostic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The hosting API answered 404 for the resource.
    #[error("{resource} not found (404)")]
    NotFound { resource: String },

    /// The hosting API answered with a status other than 200 or 404.
    #[error("{resource} returned HTTP {status}: {body}")]
    Api {
        resource: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (network, TLS, timeout).
    #[error("{resource} request failed: {message}")]
    Transport { resource: String, message: String },

    /// The response was 200 but its payload did not have the expected shape.
    #[error("{resource} returned an unexpected payload: {message}")]
    Malformed { resource: String, message: String },

    /// File content was present but could not be decoded to UTF-8 text.
    #[error("{path} could not be decoded: {message}")]
    Decode { path: String, message: String },
}

impl GatewayError {
    /// Whether this is the recognized "not found" outcome.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Reasons a [`RepositoryContext`](crate::domain::models::RepositoryContext)
/// cannot be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("organization cannot be empty")]
    EmptyOrganization,

    #[error("repository name cannot be empty")]
    EmptyRepository,
}
