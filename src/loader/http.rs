use super::ImageLoader;
use crate::ai::mime::{detect_image_mime, sniff_image_mime};
use crate::models::{EncodedImage, ImageSource};
use crate::{Error, Result};
use async_trait::async_trait;
use image::ImageFormat;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::path::Path;

/// Loads URLs over HTTP and files from the local filesystem.
pub struct HttpImageLoader {
    client: Client,
}

impl HttpImageLoader {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, url: &str) -> Result<EncodedImage> {
        tracing::debug!("Fetching source image from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::error!("Failed to fetch {}: {}", url, e);
                Error::Network(e.to_string())
            })?;

        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(essence)
            .filter(|mime| !mime.is_empty());

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read body of {}: {}", url, e);
            Error::Network(e.to_string())
        })?;

        let mime_type = declared.unwrap_or_else(|| detect_image_mime(&bytes).to_string());
        tracing::info!("Fetched {} bytes ({}) from {}", bytes.len(), mime_type, url);

        Ok(EncodedImage::from_bytes(&bytes, mime_type))
    }

    async fn read_file(&self, path: &Path) -> Result<EncodedImage> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            e
        })?;

        let mime_type = declared_file_mime(path)
            .or_else(|| sniff_image_mime(&bytes))
            .unwrap_or_else(|| detect_image_mime(&bytes));
        tracing::info!(
            "Read {} bytes ({}) from {}",
            bytes.len(),
            mime_type,
            path.display()
        );

        Ok(EncodedImage::from_bytes(&bytes, mime_type))
    }
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<EncodedImage> {
        source.validate()?;
        match source {
            ImageSource::Url(url) => self.fetch_url(url).await,
            ImageSource::File(path) => self.read_file(path).await,
        }
    }
}

/// Media type without parameters: `image/jpeg; charset=binary` -> `image/jpeg`.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Media type declared by the file extension.
fn declared_file_mime(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

    fn decode(image: &EncodedImage) -> Vec<u8> {
        base64::engine::general_purpose::STANDARD
            .decode(&image.data)
            .unwrap()
    }

    #[test]
    fn test_essence_strips_parameters() {
        assert_eq!(essence("image/JPEG; charset=binary"), "image/jpeg");
        assert_eq!(essence("image/png"), "image/png");
    }

    #[test]
    fn test_declared_file_mime_from_extension() {
        assert_eq!(declared_file_mime(Path::new("a.png")), Some("image/png"));
        assert_eq!(declared_file_mime(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(declared_file_mime(Path::new("a.unknown")), None);
    }

    #[tokio::test]
    async fn test_load_url_uses_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01]),
            )
            .mount(&server)
            .await;

        let loader = HttpImageLoader::new();
        let source = ImageSource::Url(format!("{}/photo.jpg", server.uri()));
        let image = loader.load(&source).await.unwrap();

        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(decode(&image), vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01]);
    }

    #[tokio::test]
    async fn test_load_url_without_content_type_sniffs_bytes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photo"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES.to_vec()))
            .mount(&server)
            .await;

        let loader = HttpImageLoader::new();
        let source = ImageSource::Url(format!("{}/photo", server.uri()));
        let image = loader.load(&source).await.unwrap();

        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_load_url_not_found_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let loader = HttpImageLoader::new();
        let source = ImageSource::Url(format!("{}/photo.jpg", server.uri()));
        let err = loader.load(&source).await.unwrap_err();

        assert!(matches!(err, Error::Network(ref msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_load_unreachable_url_is_network_error() {
        let loader = HttpImageLoader::new();
        let source = ImageSource::Url("http://127.0.0.1:1/photo.jpg".to_string());
        let err = loader.load(&source).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_load_file_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("portrait.png");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        std::fs::write(&file, &bytes).unwrap();

        let loader = HttpImageLoader::new();
        let image = loader.load(&ImageSource::File(file)).await.unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(decode(&image).len(), bytes.len());
        assert_eq!(decode(&image), bytes);
    }

    #[tokio::test]
    async fn test_load_file_without_extension_sniffs_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("portrait");
        std::fs::write(&file, [0xFF, 0xD8, 0xFF, 0xDB]).unwrap();

        let loader = HttpImageLoader::new();
        let image = loader.load(&ImageSource::File(file)).await.unwrap();

        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let loader = HttpImageLoader::new();
        let source = ImageSource::File(PathBuf::from("/definitely/not/here.png"));
        let err = loader.load(&source).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_load_empty_url_is_rejected() {
        let loader = HttpImageLoader::new();
        let err = loader
            .load(&ImageSource::Url(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSource(_)));
    }
}
