use super::ImageEditService;
use crate::models::EncodedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Canned outcome for one [`MockImageEditClient`] call.
#[derive(Debug, Clone)]
enum MockOutcome {
    DataUri(String),
    NoImage,
    Upstream(String),
}

#[derive(Clone)]
pub struct MockImageEditClient {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    received: Arc<Mutex<Vec<EncodedImage>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageEditClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            received: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_data_uri(self, data_uri: String) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::DataUri(data_uri));
        self
    }

    pub fn with_no_image(self) -> Self {
        self.outcomes.lock().unwrap().push(MockOutcome::NoImage);
        self
    }

    pub fn with_upstream_error(self, message: String) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Upstream(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Images passed to `process_image`, in call order.
    pub fn get_received(&self) -> Vec<EncodedImage> {
        self.received.lock().unwrap().clone()
    }
}

impl Default for MockImageEditClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageEditService for MockImageEditClient {
    async fn process_image(&self, image: &EncodedImage) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.received.lock().unwrap().push(image.clone());

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Echo the input back as the "processed" image
            return Ok(format!("data:{};base64,{}", image.mime_type, image.data));
        }

        match &outcomes[(*count - 1) % outcomes.len()] {
            MockOutcome::DataUri(uri) => Ok(uri.clone()),
            MockOutcome::NoImage => Err(Error::NoImageReturned),
            MockOutcome::Upstream(message) => Err(Error::Upstream(message.clone())),
        }
    }
}
