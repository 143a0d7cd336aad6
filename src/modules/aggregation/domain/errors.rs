use serde::Serialize;
use thiserror::Error;

/// Failures an aggregation can end with. Secondary fetch failures never
/// show up here; they are absorbed by the join.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AggregationError {
    #[error("{message}")]
    PrimaryFetchFailed { task: String, message: String },

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Aggregation cancelled")]
    Cancelled,

    #[error("View has been deactivated")]
    Deactivated,

    #[error("Something went wrong while loading: {0}")]
    Internal(String),
}

impl AggregationError {
    pub fn primary(task: &str, message: impl Into<String>) -> Self {
        AggregationError::PrimaryFetchFailed {
            task: task.to_string(),
            message: message.into(),
        }
    }

    /// Message shown to the user for terminal error states
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Successful join result. `Empty` exists only for list contexts.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Loaded(T),
    Empty { message: String },
}

impl<T> Outcome<T> {
    pub fn empty(message: impl Into<String>) -> Self {
        Outcome::Empty {
            message: message.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Outcome::Loaded(_))
    }
}
