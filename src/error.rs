//! Error types for planning and routing-provider queries.

use thiserror::Error;

/// Errors surfaced to callers of the planner.
///
/// Provider failures never appear here: the distance oracle absorbs them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("clustering failed: {0}")]
    Clustering(String),
}

impl PlannerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }
}

/// A single failed query against the routing provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned no route")]
    NoRoute,

    #[error("provider response was incomplete: {0}")]
    IncompleteResponse(&'static str),

    #[error("routing provider is offline")]
    Offline,
}
