use std::fmt;

use serde::{Deserialize, Serialize};

pub type SubmissionId = u64;

/// Analysis mode selected for an upload, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Segmentation,
    Classification,
}

impl TaskKind {
    pub fn wire_name(&self) -> &'static str {
        match self {
            TaskKind::Segmentation => "segmentation",
            TaskKind::Classification => "classification",
        }
    }
}

/// Profile of the signed-in doctor, as returned by the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub specialization: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    Malignant,
    Benign,
    Unknown,
}

/// One classification verdict, persisted verbatim in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub prediction: Prediction,
    /// Probability of malignancy in percent, 0..=100.
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segmentation_mask_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_image_url: Option<String>,
}

/// Parsed processing response, discriminated by the task kind captured at
/// submission time.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutput {
    /// Raw image bytes for display.
    Segmentation { image: Vec<u8> },
    Classification(ClassificationRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiFailure::Network => write!(f, "Network error: {}", self.message),
            ApiFailure::Timeout => write!(f, "Request timed out"),
            ApiFailure::HttpStatus(_) => write!(f, "Server error: {}", self.message),
            ApiFailure::MalformedResponse => write!(f, "Unexpected response: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Events emitted by the background client toward the update loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Result of a "who am I" probe, bootstrap or post-sign-in.
    SessionResolved { user: Option<UserProfile> },
    SignInFinished { outcome: Result<(), ApiError> },
    SignUpFinished { outcome: Result<(), ApiError> },
    /// The sign-out endpoint was attempted and the local state is cleared.
    SignedOut,
    PreviewLoaded { epoch: u64, data_url: String },
    PreviewFailed { epoch: u64, message: String },
    SubmitFinished {
        submission_id: SubmissionId,
        result: Result<AnalysisOutput, ApiError>,
    },
}
