//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Image API error: {0}")]
    Upstream(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, Error>;
