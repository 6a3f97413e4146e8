//! FaceCenter - AI face centering and square outpainting for profile photos
//!
//! Loads a portrait from a URL or a local file, asks Gemini's image model to
//! center the face in a circle-safe square frame, and presents the result
//! through a small idle/loading/success/error state machine.

pub mod ai;
pub mod app;
pub mod data_uri;
pub mod error;
pub mod loader;
pub mod models;
pub mod preview;
pub mod progress;
pub mod prompts;
pub mod state;

pub use error::{Error, Result};
