//! Processing state machine
//!
//! [`ProcessingResult`] is a plain value; every transition consumes an
//! [`Event`] and yields the next value, leaving the previous one untouched.
//!
//! ```text
//! idle --Submitted--> loading --Succeeded--> success --Reset--> idle
//!                             \--Failed----> error   --Reset--> idle
//! ```

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str =
    "Failed to process image. Please check the URL or try another photo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A source was submitted; `original_url` is what to show as "the original".
    Submitted { original_url: String },
    /// The AI returned an image, as a data URI.
    Succeeded { processed_url: String },
    Failed { message: String },
    Reset,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Self::Submitted { .. } => "submit",
            Self::Succeeded { .. } => "success",
            Self::Failed { .. } => "failure",
            Self::Reset => "reset",
        }
    }
}

/// What the front end renders.
///
/// `processed_url` is set exactly in [`ProcessingState::Success`];
/// `error_message` only in [`ProcessingState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub original_url: String,
    pub processed_url: Option<String>,
    pub status: ProcessingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProcessingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state after `event`, or [`Error::InvalidTransition`] when
    /// `event` is not accepted in the current state.
    pub fn apply(&self, event: Event) -> Result<Self> {
        match (self.status, event) {
            (ProcessingState::Idle, Event::Submitted { original_url }) => Ok(Self {
                original_url,
                processed_url: None,
                status: ProcessingState::Loading,
                error_message: None,
            }),
            (ProcessingState::Loading, Event::Succeeded { processed_url }) => Ok(Self {
                processed_url: Some(processed_url),
                status: ProcessingState::Success,
                ..self.clone()
            }),
            (ProcessingState::Loading, Event::Failed { message }) => Ok(Self {
                processed_url: None,
                status: ProcessingState::Error,
                error_message: Some(if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                }),
                ..self.clone()
            }),
            (ProcessingState::Success | ProcessingState::Error, Event::Reset) => Ok(Self::new()),
            (status, event) => Err(Error::InvalidTransition(format!(
                "cannot handle {} while {}",
                event.name(),
                status
            ))),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == ProcessingState::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == ProcessingState::Loading
    }
}

/// User-facing text for a failed submission.
pub fn error_message(err: &Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
