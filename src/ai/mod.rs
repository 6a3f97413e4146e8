//! AI service integration for portrait re-framing
//!
//! Sends an encoded portrait to Gemini's image model with the face-centering
//! instruction and returns the generated image as a data URI.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiFaceCenterClient;
pub use mock::MockImageEditClient;

use crate::models::EncodedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageEditService: Send + Sync {
    /// Re-frames `image` and returns the result as `data:<mime>;base64,<data>`.
    async fn process_image(&self, image: &EncodedImage) -> Result<String>;
}
