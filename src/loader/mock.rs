use super::ImageLoader;
use crate::models::{EncodedImage, ImageSource};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockImageLoader {
    image: EncodedImage,
    network_error: Option<String>,
    requested: Arc<Mutex<Vec<ImageSource>>>,
}

impl MockImageLoader {
    pub fn new() -> Self {
        Self {
            // 1x1 PNG signature bytes, base64
            image: EncodedImage {
                data: "iVBORw0KGgo=".to_string(),
                mime_type: "image/png".to_string(),
            },
            network_error: None,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image(mut self, image: EncodedImage) -> Self {
        self.image = image;
        self
    }

    /// Make every load fail as if the fetch had failed with `message`.
    pub fn with_network_error(mut self, message: String) -> Self {
        self.network_error = Some(message);
        self
    }

    pub fn get_requested(&self) -> Vec<ImageSource> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for MockImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<EncodedImage> {
        self.requested.lock().unwrap().push(source.clone());
        source.validate()?;

        match &self.network_error {
            Some(message) => Err(Error::Network(message.clone())),
            None => Ok(self.image.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_loader_returns_configured_image() {
        let image = EncodedImage {
            data: "abc".to_string(),
            mime_type: "image/jpeg".to_string(),
        };
        let loader = MockImageLoader::new().with_image(image.clone());
        let source = ImageSource::Url("https://x/photo.jpg".to_string());

        assert_eq!(loader.load(&source).await.unwrap(), image);
        assert_eq!(loader.get_requested(), vec![source]);
    }

    #[tokio::test]
    async fn test_mock_loader_network_error() {
        let loader = MockImageLoader::new().with_network_error("404 Not Found".to_string());
        let source = ImageSource::Url("https://x/photo.jpg".to_string());

        let err = loader.load(&source).await.unwrap_err();
        assert!(matches!(err, Error::Network(ref msg) if msg == "404 Not Found"));
    }
}
