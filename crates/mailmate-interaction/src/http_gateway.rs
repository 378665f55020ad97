//! HttpEmailGateway - REST implementation of the backend gateway.
//!
//! Talks to the mail assistant backend over HTTP. The backend address and
//! session cookie come from [`ClientConfig`]; nothing is read from the
//! environment here.

use async_trait::async_trait;
use mailmate_core::ClientConfig;
use mailmate_core::error::{MailmateError, Result};
use mailmate_core::gateway::{
    DeleteOutcome, EmailGateway, IdentityResponse, IndexRequest, ReplyDraft,
};
use mailmate_core::intent::EmailIndex;
use mailmate_core::session::{Identity, Session};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode, Url, redirect};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const SESSION_COOKIE_NAME: &str = "session_id";

const IDENTIFY_PATH: &str = "/auth/me";
const LOGIN_PATH: &str = "/auth/google/login";
const LOGOUT_PATH: &str = "/auth/logout";
const LIST_RECENT_PATH: &str = "/emails/last5";
const REPLY_PATH: &str = "/emails/reply";
const DELETE_PATH: &str = "/emails/delete";

/// Gateway implementation that talks to the backend's REST API.
#[derive(Clone)]
pub struct HttpEmailGateway {
    client: Client,
    /// Same credentials, but redirects are reported instead of followed.
    logout_client: Client,
    base_url: String,
}

impl HttpEmailGateway {
    /// Creates a gateway for the backend described by `config`.
    ///
    /// Fails with [`MailmateError::Config`] when the backend address is not
    /// an absolute http(s) URL or the session cookie is not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url().to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| MailmateError::config(format!("Invalid backend URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MailmateError::config(format!(
                "Backend URL must use http or https: {base_url}"
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref() {
            let value = HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}={cookie}"))
                .map_err(|e| MailmateError::config(format!("Invalid session cookie: {e}")))?;
            headers.insert(header::COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers.clone())
            .build()
            .map_err(|e| MailmateError::config(format!("Failed to build HTTP client: {e}")))?;
        let logout_client = Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| MailmateError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            logout_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!("[Gateway] GET {}", url);
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| MailmateError::transport(format!("GET {url} failed: {e}")))
    }

    async fn post_index(&self, path: &str, index: EmailIndex) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!("[Gateway] POST {} index={}", url, index);
        self.client
            .post(&url)
            .json(&IndexRequest { index })
            .send()
            .await
            .map_err(|e| MailmateError::transport(format!("POST {url} failed: {e}")))
    }
}

#[async_trait]
impl EmailGateway for HttpEmailGateway {
    async fn identify(&self) -> Result<Identity> {
        let response = self.get(IDENTIFY_PATH).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(Identity::Unauthenticated);
        }
        let identity: IdentityResponse = decode(read_json(response).await?)?;
        Ok(Identity::Authenticated(Session::from(identity)))
    }

    async fn list_recent(&self) -> Result<Value> {
        let response = self.get(LIST_RECENT_PATH).await?;
        read_json(response).await
    }

    async fn reply(&self, index: EmailIndex) -> Result<ReplyDraft> {
        let response = self.post_index(REPLY_PATH, index).await?;
        decode(read_json(response).await?)
    }

    async fn delete(&self, index: EmailIndex) -> Result<DeleteOutcome> {
        let response = self.post_index(DELETE_PATH, index).await?;
        decode(read_json(response).await?)
    }

    async fn logout(&self) -> Result<String> {
        let url = self.endpoint(LOGOUT_PATH);
        let response = self
            .logout_client
            .get(&url)
            .send()
            .await
            .map_err(|e| MailmateError::transport(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if status.is_redirection() {
            let target = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| MailmateError::malformed("Logout redirect without Location"))?;
            return Ok(target.to_string());
        }
        if status.is_success() {
            return Ok(self.base_url.clone());
        }
        Err(status_error(response).await)
    }

    fn login_url(&self) -> String {
        self.endpoint(LOGIN_PATH)
    }
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorDetail {
    detail: Value,
}

/// Reads a successful JSON body, mapping every failure onto the gateway taxonomy.
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(MailmateError::Unauthenticated);
    }
    if !status.is_success() {
        return Err(status_error(response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| MailmateError::transport(format!("Failed to read response body: {e}")))?;
    serde_json::from_str(&body)
        .map_err(|e| MailmateError::malformed(format!("Response is not JSON: {e}")))
}

async fn status_error(response: Response) -> MailmateError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    let message = serde_json::from_str::<ErrorDetail>(&body)
        .map(|error| match error.detail {
            Value::String(text) => text,
            other => other.to_string(),
        })
        .unwrap_or(body);

    tracing::warn!("[Gateway] Backend returned {}: {}", status, message);
    MailmateError::status(status.as_u16(), message)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| MailmateError::malformed(format!("Unexpected response shape: {e}")))
}
