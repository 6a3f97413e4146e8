//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Fetching the source image failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The model answered but none of the response parts carried an image.
    #[error("No image data returned from AI")]
    NoImageReturned,

    /// The model call itself failed. The message is passed through as-is.
    #[error("{0}")]
    Upstream(String),

    #[error("Invalid image source: {0}")]
    InvalidSource(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
