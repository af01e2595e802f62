use std::sync::Arc;

use client_logging::{client_debug, client_warn};
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;
use crate::store::TOKEN_KEY;
use crate::types::{ApiError, ApiFailure, UserProfile};

/// Endpoint table for the authentication service.
pub mod endpoints {
    pub const SIGN_UP: &str = "/api/v1/auth/doctor/signup";
    pub const SIGN_IN: &str = "/api/v1/auth/doctor/signin";
    pub const SIGN_OUT: &str = "/api/v1/auth/doctor/signout";
    pub const ME: &str = "/api/v1/auth/doctor/me";
}

/// Registration payload, camel-cased on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    access_token: String,
}

/// The profile arrives wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
struct MeResponse {
    data: UserProfile,
}

pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Probes the "who am I" endpoint. Any failure, network or 401 or a
    /// body that does not parse, resolves the session to anonymous.
    pub async fn fetch_user(&self) -> Option<UserProfile> {
        match self.client.get_json::<MeResponse>(endpoints::ME).await {
            Ok(response) => Some(response.data),
            Err(err) => {
                client_debug!("Session probe resolved anonymous: {}", err);
                None
            }
        }
    }

    /// Signs in, stores the bearer token, then re-probes the profile so
    /// `Authenticated(user)` has a single source of truth.
    ///
    /// On failure the store is left untouched.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserProfile>, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response: SignInResponse = self.client.post_json(endpoints::SIGN_IN, &body).await?;
        if response.access_token.is_empty() {
            return Err(ApiError::new(
                ApiFailure::MalformedResponse,
                "missing access token",
            ));
        }
        self.client.store().set(TOKEN_KEY, &response.access_token);
        Ok(self.fetch_user().await)
    }

    /// Registers a new account. Does not authenticate it.
    pub async fn sign_up(&self, form: &SignUpRequest) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.post_json(endpoints::SIGN_UP, form).await?;
        Ok(())
    }

    /// Best-effort server sign-out; the local store is cleared regardless.
    pub async fn sign_out(&self) {
        if let Err(err) = self.client.get_ok(endpoints::SIGN_OUT).await {
            client_warn!("Sign-out request failed: {}", err);
        }
        self.client.store().clear();
    }
}
