//! Gemini `generateContent` payload types.

use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding. `Other` swallows
/// part kinds this crate never inspects so they do not fail the whole response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
    Other(serde_json::Value),
}

/// Base64 inline payload used for image requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Top-level `generateContent` response envelope.
///
/// Blocked prompts come back without candidates, so the list defaults to empty.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// First inline-data part of the first candidate, scanning parts in order.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| {
                content.parts.iter().find_map(|p| match p {
                    Part::InlineData { inline_data } => Some(inline_data),
                    _ => None,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_inline_data_skips_text_parts() {
        let response = parse(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "first" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "second" } }
                    ]
                }
            }]
        }));

        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "first");
    }

    #[test]
    fn test_missing_candidates_is_empty() {
        let response = parse(serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert!(response.candidates.is_empty());
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn test_candidate_without_content_has_no_inline_data() {
        let response = parse(serde_json::json!({
            "candidates": [{ "finishReason": "IMAGE_SAFETY" }]
        }));
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn test_unknown_part_kinds_are_tolerated() {
        let response = parse(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "thoughtSignature": "opaque" },
                        { "inlineData": { "mimeType": "image/png", "data": "abc" } }
                    ]
                }
            }]
        }));
        assert_eq!(response.first_inline_data().unwrap().data, "abc");
    }

    #[test]
    fn test_inline_data_serializes_camel_case() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: "abc".to_string(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["inlineData"]["data"], "abc");
    }
}
