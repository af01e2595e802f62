use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::history::HistoryStore;
use crate::http::{ApiClient, RawBody};
use crate::types::{AnalysisOutput, ApiError, ApiFailure, ClassificationRecord, Prediction, TaskKind};

pub const PROCESS_ENDPOINT: &str = "/process/";

/// Wire shape of a classification response. The verdict block is absent
/// when the model found nothing to segment.
#[derive(Debug, Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    classification: Option<WireVerdict>,
    #[serde(default)]
    segmentation_mask_url: Option<String>,
    #[serde(default)]
    annotated_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireVerdict {
    prediction: String,
    probability: f64,
}

impl ProcessResponse {
    fn into_record(self) -> ClassificationRecord {
        let (prediction, probability) = match self.classification {
            Some(verdict) => (prediction_from_wire(&verdict.prediction), verdict.probability),
            None => (Prediction::Unknown, 0.0),
        };
        ClassificationRecord {
            prediction,
            probability,
            segmentation_mask_url: self.segmentation_mask_url,
            annotated_image_url: self.annotated_image_url,
        }
    }
}

fn prediction_from_wire(raw: &str) -> Prediction {
    match raw {
        "Malignant" => Prediction::Malignant,
        "Benign" => Prediction::Benign,
        _ => Prediction::Unknown,
    }
}

/// Upload-and-process operation against the processing service.
pub struct ProcessApi {
    client: Arc<ApiClient>,
    history: HistoryStore,
}

impl ProcessApi {
    pub fn new(client: Arc<ApiClient>, history: HistoryStore) -> Self {
        Self { client, history }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Submits the image and interprets the response for the task kind
    /// captured at submission time. Classification results land in history
    /// before the caller can observe success.
    pub async fn analyze(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        task: TaskKind,
    ) -> Result<AnalysisOutput, ApiError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("task", task.wire_name());
        let body = self.client.post_multipart(PROCESS_ENDPOINT, form).await?;
        let output = interpret_response(task, body)?;
        if let AnalysisOutput::Classification(record) = &output {
            self.history.append(record.clone());
        }
        Ok(output)
    }
}

fn interpret_response(task: TaskKind, body: RawBody) -> Result<AnalysisOutput, ApiError> {
    match task {
        TaskKind::Segmentation => {
            let content_type = body.content_type.as_deref().unwrap_or("");
            if !is_image_content_type(content_type) {
                return Err(ApiError::new(
                    ApiFailure::MalformedResponse,
                    format!("expected an image body, got {content_type:?}"),
                ));
            }
            Ok(AnalysisOutput::Segmentation { image: body.bytes })
        }
        TaskKind::Classification => {
            let response: ProcessResponse = serde_json::from_slice(&body.bytes).map_err(|err| {
                ApiError::new(
                    ApiFailure::MalformedResponse,
                    format!("unexpected classification body: {err}"),
                )
            })?;
            Ok(AnalysisOutput::Classification(response.into_record()))
        }
    }
}

fn is_image_content_type(value: &str) -> bool {
    let ct = value.split(';').next().unwrap_or(value).trim();
    ct.starts_with("image/")
}

/// Resolves a server-relative artifact path (segmentation mask, annotated
/// image) against the processing origin for display.
pub fn resolve_artifact_url(base: &Url, path: &str) -> Option<String> {
    base.join(path).ok().map(String::from)
}
