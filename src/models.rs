//! Data models and configuration
//!
//! Defines the image payloads passed between the loader and the AI client,
//! the user-supplied image sources, and environment-driven configuration.

use crate::{Error, Result};
use base64::Engine as _;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Base64 image payload together with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| Error::InvalidDataUri(format!("payload is not valid base64: {}", e)))
    }
}

/// Where the user's photo comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    File(PathBuf),
}

impl ImageSource {
    /// Interpret a command-line argument: `http(s)://` is a URL, anything else a path.
    pub fn from_arg(arg: &str) -> Result<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(Error::InvalidSource("source is empty".to_string()));
        }

        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(arg.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(arg)))
        }
    }

    /// Rejects sources that can never be loaded, before any state changes.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Url(url) if url.trim().is_empty() => {
                Err(Error::InvalidSource("URL is empty".to_string()))
            }
            Self::File(path) if path.as_os_str().is_empty() => {
                Err(Error::InvalidSource("file path is empty".to_string()))
            }
            _ => Ok(()),
        }
    }

    /// URL shown as "the original" while and after processing.
    pub fn display_url(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => file_url(path),
        }
    }
}

fn file_url(path: &Path) -> String {
    std::path::absolute(path)
        .ok()
        .and_then(|abs| reqwest::Url::from_file_path(abs).ok())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub image_model: String,
    pub gemini_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let gemini_api_key = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"));
        if gemini_api_key.is_none() {
            tracing::warn!(
                "GEMINI_API_KEY not set; requests will be sent unauthenticated and rejected upstream"
            );
        }

        Ok(Self {
            gemini_api_key,
            image_model: non_empty_var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            gemini_base_url: non_empty_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
