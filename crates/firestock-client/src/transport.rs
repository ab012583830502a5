//! HTTP transport to the REST backend.
//!
//! Every request carries:
//! - `Authorization: Bearer <token>` once a token is set,
//! - the tenant header when a tenant is selected,
//! - a fresh `X-Request-Id` (UUIDv7) for log correlation,
//! - `Accept: application/json`.
//!
//! Error statuses come back as `Ok(ApiResponse)` with the server message
//! pulled from the JSON body; only failures without a status are `Err`.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use uuid::Uuid;

use firestock_core::{current_tenant, defaults, ApiResponse, Error, Result};

use crate::config::ClientConfig;

/// JSON fields that may carry a human-readable error, in lookup order.
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["message", "error", "title", "detail"];

/// reqwest-based transport shared by all entity endpoints.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "transport",
            base_url = %config.base_url,
            timeout_secs = config.timeout_seconds,
            "Initializing HTTP transport"
        );

        let token = config.token.clone();
        Ok(Self {
            client,
            config,
            token: RwLock::new(token),
        })
    }

    /// Create from `FIRESTOCK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env();
        config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Use `token` as bearer credential for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
        Q: Serialize + ?Sized,
    {
        let (request, request_id) = self.request(Method::GET, path);
        self.send(request.query(query), request_id, path).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let (request, request_id) = self.request(Method::POST, path);
        self.send(request.json(body), request_id, path).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let (request, request_id) = self.request(Method::PUT, path);
        self.send(request.json(body), request_id, path).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        let (request, request_id) = self.request(Method::DELETE, path);
        self.send(request, request_id, path).await
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build a request with the standard headers; returns it with its
    /// correlation ID.
    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let request_id = Uuid::now_v7().to_string();
        debug!(
            subsystem = "transport",
            method = %method,
            path,
            request_id = %request_id,
            "Sending request"
        );

        let mut req = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(defaults::REQUEST_ID_HEADER, request_id.as_str());

        if let Ok(token) = self.token.read() {
            if let Some(ref token) = *token {
                req = req.bearer_auth(token);
            }
        }

        if let Some(tenant) = current_tenant() {
            req = req.header(self.config.tenant_header.as_str(), tenant);
        }

        (req, request_id)
    }

    async fn send<T>(
        &self,
        request: RequestBuilder,
        request_id: String,
        path: &str,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(
                subsystem = "transport",
                request_id = %request_id,
                path,
                error = %e,
                "Request failed"
            );
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        debug!(
            subsystem = "transport",
            request_id = %request_id,
            path,
            status,
            duration_ms,
            bytes = body.len(),
            "Response received"
        );

        if status >= 400 {
            return Ok(ApiResponse::failure(status, extract_error_message(&body)));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::with_status(status, T::default()));
        }

        let data = serde_json::from_slice(&body)?;
        Ok(ApiResponse::with_status(status, data))
    }
}

/// Pull a message out of an error body. JSON bodies are searched for the
/// usual message fields; short plain-text bodies are used as they are.
fn extract_error_message(body: &[u8]) -> Option<String> {
    if let Ok(json) = serde_json::from_slice::<JsonValue>(body) {
        return ERROR_MESSAGE_FIELDS
            .iter()
            .filter_map(|field| json.get(field).and_then(JsonValue::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string);
    }

    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() || text.starts_with('<') || text.len() > 200 {
        return None;
    }
    Some(text.to_string())
}
