use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageEditService;
use crate::data_uri::DataUri;
use crate::models::EncodedImage;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FaceCenterRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

/// Centers the face of a portrait in a square frame and outpaints the rest.
pub struct GeminiFaceCenterClient {
    http: GeminiHttpClient,
}

impl GeminiFaceCenterClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: Option<String>,
        model: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(image: &EncodedImage) -> FaceCenterRequest {
        FaceCenterRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                    Part::Text {
                        text: prompts::face_center().to_string(),
                    },
                ],
            }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                },
            },
        }
    }
}

#[async_trait]
impl ImageEditService for GeminiFaceCenterClient {
    async fn process_image(&self, image: &EncodedImage) -> Result<String> {
        tracing::debug!(
            "Sending {} image ({} base64 chars) to Gemini model {}",
            image.mime_type,
            image.data.len(),
            self.http.model()
        );

        let request = Self::build_request(image);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let inline = response.first_inline_data().ok_or_else(|| {
            tracing::error!("Gemini response contained no inline image data");
            Error::NoImageReturned
        })?;

        tracing::debug!("Gemini returned image with mime_type: {}", inline.mime_type);

        Ok(DataUri::new(inline.mime_type.clone(), inline.data.clone()).to_string())
    }
}
