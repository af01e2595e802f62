use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::store::{KeyValueStore, TOKEN_KEY};
use crate::types::{ApiError, ApiFailure};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Raw response body plus the content type it arrived with; the caller
/// decides how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// The single configured HTTP client. Constructed once at process start;
/// every request re-reads the bearer token from the store so sign-in and
/// sign-out take effect without rebuilding anything.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn KeyValueStore>,
    max_body_bytes: u64,
}

impl ApiClient {
    pub fn new(settings: ClientSettings, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            store,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))
    }

    /// Attaches `Authorization: Bearer <token>` when the store holds a
    /// token; without one the request goes out unauthenticated.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.store.get(TOKEN_KEY) {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(self.endpoint(path)?));
        let response = request.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        parse_json(self.read_capped(response).await?)
    }

    /// GET where only the status matters; the body is discarded.
    pub async fn get_ok(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorize(self.http.get(self.endpoint(path)?));
        let response = request.send().await.map_err(map_reqwest_error)?;
        check_status(response)?;
        Ok(())
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.http.post(self.endpoint(path)?).json(body));
        let response = request.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        parse_json(self.read_capped(response).await?)
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<RawBody, ApiError> {
        let request = self.authorize(self.http.post(self.endpoint(path)?).multipart(form));
        let response = request.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = self.read_capped(response).await?;
        Ok(RawBody {
            content_type,
            bytes,
        })
    }

    /// Reads the body as a stream, refusing anything over the configured cap.
    async fn read_capped(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(ApiError::new(ApiFailure::Network, "response too large"));
            }
        }
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > self.max_body_bytes {
                return Err(ApiError::new(ApiFailure::Network, "response too large"));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::new(
            ApiFailure::HttpStatus(status.as_u16()),
            status.canonical_reason().unwrap_or("request failed"),
        ))
    }
}

fn parse_json<T: DeserializeOwned>(bytes: Vec<u8>) -> Result<T, ApiError> {
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(ApiFailure::MalformedResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
