//! Source image loading
//!
//! Turns a remote URL or a local file into an [`EncodedImage`] ready to be
//! sent to the AI client. Loading is single-shot: it resolves once with the
//! whole payload or fails once.

pub mod http;
pub mod mock;

pub use http::HttpImageLoader;
pub use mock::MockImageLoader;

use crate::models::{EncodedImage, ImageSource};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, source: &ImageSource) -> Result<EncodedImage>;
}
