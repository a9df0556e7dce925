use crate::errors::repository::RepositoryError;
use crate::model::OrderStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Order not found")]
    OrderNotFound,

    /// A transition the flow table forbids. Carries both sides so the
    /// rejection itself documents the graph; operator tooling needs no
    /// separate "allowed transitions" query.
    #[error("Cannot change status from {current} to {requested}")]
    InvalidTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },

    #[error("Repository error: {0}")]
    Repo(RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Invalid payment signature")]
    InvalidSignature,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::OrderNotFound,
            RepositoryError::InvalidTransition { current, requested } => {
                ServiceError::InvalidTransition { current, requested }
            }
            other => ServiceError::Repo(other),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Gateway(err.to_string())
    }
}
