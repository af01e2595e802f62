//! Mediscan client engine: HTTP operations, local persistence, and the
//! background command loop.
mod auth;
mod client;
mod history;
mod http;
mod preview;
mod process;
mod store;
mod types;

pub use auth::{endpoints, AuthApi, SignUpRequest};
pub use client::ClientHandle;
pub use history::{HistoryStore, HISTORY_KEY};
pub use http::{ApiClient, ClientSettings, RawBody};
pub use preview::{preview_data_url, sniff_image_mime};
pub use process::{resolve_artifact_url, ProcessApi, PROCESS_ENDPOINT};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, TOKEN_KEY};
pub use types::{
    AnalysisOutput, ApiError, ApiFailure, ClassificationRecord, ClientEvent, Prediction,
    SubmissionId, TaskKind, UserProfile,
};
