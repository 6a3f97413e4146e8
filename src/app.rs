//! Submission orchestration and result presentation.

use crate::ai::{GeminiFaceCenterClient, ImageEditService};
use crate::data_uri::DataUri;
use crate::loader::{HttpImageLoader, ImageLoader};
use crate::models::{Config, ImageSource};
use crate::preview;
use crate::state::{self, Event, ProcessingResult, ProcessingState};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// File name used when a download target is a directory.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "processed-image.png";

/// Drives one portrait at a time through load, AI processing and download.
pub struct App {
    loader: Box<dyn ImageLoader>,
    editor: Box<dyn ImageEditService>,
    result: ProcessingResult,
    show_circle_preview: bool,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub loader: Box<dyn ImageLoader>,
    pub editor: Box<dyn ImageEditService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            loader: services.loader,
            editor: services.editor,
            result: ProcessingResult::new(),
            show_circle_preview: true,
        }
    }

    /// Construct an app talking to the real network and Gemini endpoint.
    pub fn new(config: &Config) -> Self {
        // Reuse one HTTP connection pool for source fetches and model calls.
        let http_client = reqwest::Client::new();

        let editor = GeminiFaceCenterClient::new_with_client(
            config.gemini_api_key.clone(),
            config.image_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.gemini_base_url.clone());
        info!("Image provider: Gemini (model: {})", editor.model());

        Self::with_services(AppServices {
            loader: Box::new(HttpImageLoader::new_with_client(http_client)),
            editor: Box::new(editor),
        })
    }

    pub fn result(&self) -> &ProcessingResult {
        &self.result
    }

    pub fn show_circle_preview(&self) -> bool {
        self.show_circle_preview
    }

    pub fn set_circle_preview(&mut self, enabled: bool) {
        self.show_circle_preview = enabled;
    }

    /// Flips the circle preview flag and returns the new value.
    pub fn toggle_circle_preview(&mut self) -> bool {
        self.show_circle_preview = !self.show_circle_preview;
        self.show_circle_preview
    }

    /// Submit a photo for processing.
    ///
    /// Only accepted while idle. Load and AI failures do not surface as `Err`;
    /// they end in [`ProcessingState::Error`] with a message for the user.
    pub async fn submit(&mut self, source: ImageSource) -> Result<&ProcessingResult> {
        source.validate()?;
        self.transition(Event::Submitted {
            original_url: source.display_url(),
        })?;
        info!("Processing {}", self.result.original_url);

        let event = match self.process(&source).await {
            Ok(processed_url) => {
                info!("Portrait processed successfully");
                Event::Succeeded { processed_url }
            }
            Err(e) => {
                error!("Failed to process {}: {}", self.result.original_url, e);
                Event::Failed {
                    message: state::error_message(&e),
                }
            }
        };
        self.transition(event)?;

        Ok(&self.result)
    }

    async fn process(&self, source: &ImageSource) -> Result<String> {
        let image = self.loader.load(source).await?;
        self.editor.process_image(&image).await
    }

    /// Back to idle ("try another"). Only valid after success or error.
    pub fn reset(&mut self) -> Result<&ProcessingResult> {
        self.transition(Event::Reset)?;
        Ok(&self.result)
    }

    /// Writes the processed image to `dest`.
    ///
    /// When `dest` is a directory the file is named [`DEFAULT_DOWNLOAD_FILENAME`].
    /// Does not change state.
    pub async fn download(&self, dest: &Path) -> Result<PathBuf> {
        let bytes = self.processed()?.decode()?;

        let path = if dest.is_dir() {
            dest.join(DEFAULT_DOWNLOAD_FILENAME)
        } else {
            dest.to_path_buf()
        };

        tokio::fs::write(&path, &bytes).await?;
        info!("Saved processed image ({} bytes) to {}", bytes.len(), path.display());

        Ok(path)
    }

    /// Circle-cropped PNG of the processed image, or `None` when the preview is off.
    pub async fn circle_preview(&self) -> Result<Option<Vec<u8>>> {
        let processed = self.processed()?;
        if !self.show_circle_preview {
            return Ok(None);
        }

        let bytes = processed.decode()?;
        Ok(Some(preview::render_circle_preview(&bytes).await?))
    }

    fn processed(&self) -> Result<DataUri> {
        match (&self.result.status, &self.result.processed_url) {
            (ProcessingState::Success, Some(url)) => url.parse(),
            (status, _) => Err(Error::InvalidTransition(format!(
                "no processed image to download while {}",
                status
            ))),
        }
    }

    fn transition(&mut self, event: Event) -> Result<()> {
        let from = self.result.status;
        self.result = self.result.apply(event)?;
        tracing::debug!("State {} -> {}", from, self.result.status);
        Ok(())
    }
}
