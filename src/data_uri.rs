//! `data:<mime>;base64,<payload>` formatting and parsing.

use crate::models::EncodedImage;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// A base64 data URI carrying an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: String,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Decoded payload bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        EncodedImage::from(self.clone()).decode()
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{},{}", SCHEME, self.mime_type, BASE64_MARKER, self.data)
    }
}

impl FromStr for DataUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::InvalidDataUri("missing `data:` prefix".to_string()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| Error::InvalidDataUri("missing `,` separator".to_string()))?;
        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| Error::InvalidDataUri("only base64 payloads are supported".to_string()))?;

        if mime_type.is_empty() {
            return Err(Error::InvalidDataUri("media type is empty".to_string()));
        }

        Ok(Self::new(mime_type, data))
    }
}

impl From<EncodedImage> for DataUri {
    fn from(image: EncodedImage) -> Self {
        Self::new(image.mime_type, image.data)
    }
}

impl From<DataUri> for EncodedImage {
    fn from(uri: DataUri) -> Self {
        Self {
            data: uri.data,
            mime_type: uri.mime_type,
        }
    }
}
