use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::auth::dto::{
    AuthResponse, CheckEmailRequest, CheckEmailResponse, LoginRequest, SignupRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-success status and a `{msg}` body.
    #[error("{msg}")]
    Api { status: u16, msg: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// HTTP client for the auth service. The base URL is read once at
/// construction and reused for every call.
#[derive(Clone)]
pub struct AuthApi {
    http: Client,
    base_url: String,
}

impl AuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.post("/api/auth/signup", req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/api/auth/login", req).await
    }

    pub async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let res: CheckEmailResponse = self
            .post(
                "/api/auth/check-email",
                &CheckEmailRequest {
                    email: email.into(),
                },
            )
            .await?;
        Ok(res.exists)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are `{msg}` JSON; fall back to the status line.
            let msg = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("msg").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| status.to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                msg,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
