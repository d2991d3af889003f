//! Authenticated HTTP gateway for the Chatwork API
//!
//! One [`ApiRequest`] becomes exactly one HTTP exchange. The exchange itself
//! sits behind the [`Transport`] trait; [`HttpTransport`] is the reqwest
//! implementation used at runtime.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::{classify, ChatworkError, Resource};
use crate::config::ApiToken;

pub const API_BASE: &str = "https://api.chatwork.com/v2";
pub const TOKEN_HEADER: &str = "X-ChatWorkToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        })
    }
}

/// Outbound request description, relative to the API base.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub form: Vec<(&'static str, String)>,
    /// Target used for 403/404 wording
    pub resource: Resource,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, resource: Resource) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            form: Vec::new(),
            resource,
        }
    }

    pub fn get(path: impl Into<String>, resource: Resource) -> Self {
        Self::new(Method::Get, path, resource)
    }

    pub fn post(path: impl Into<String>, resource: Resource) -> Self {
        Self::new(Method::Post, path, resource)
    }

    pub fn put(path: impl Into<String>, resource: Resource) -> Self {
        Self::new(Method::Put, path, resource)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn form(mut self, key: &'static str, value: impl ToString) -> Self {
        self.form.push((key, value.to_string()));
        self
    }

    /// Write operations send a form body and get stricter 400 handling.
    pub fn is_write(&self) -> bool {
        self.method != Method::Get
    }
}

/// Raw HTTP outcome
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one HTTP exchange. Transport failures map to
/// [`ChatworkError::Network`]; any received status is returned as-is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        token: &ApiToken,
        request: &ApiRequest,
    ) -> Result<ApiResponse, ChatworkError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        token: &ApiToken,
        request: &ApiRequest,
    ) -> Result<ApiResponse, ChatworkError> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("Chatwork {} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
        };
        let mut builder = builder.header(TOKEN_HEADER, token.expose());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.is_write() {
            builder = builder.form(&request.form);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ChatworkError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ChatworkError::Network(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Client bound to the configured credential.
///
/// The credential may be absent; every call then fails with
/// [`ChatworkError::UnconfiguredCredential`] before touching the transport.
#[derive(Clone)]
pub struct ChatworkClient {
    token: Option<ApiToken>,
    transport: Arc<dyn Transport>,
}

impl ChatworkClient {
    pub fn new(token: Option<ApiToken>) -> Self {
        Self::with_transport(token, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(token: Option<ApiToken>, transport: Arc<dyn Transport>) -> Self {
        Self { token, transport }
    }

    /// The credential, or the unconfigured-credential error.
    pub fn token(&self) -> Result<&ApiToken, ChatworkError> {
        self.token
            .as_ref()
            .ok_or(ChatworkError::UnconfiguredCredential)
    }

    /// Perform the exchange and classify its status.
    async fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, ChatworkError> {
        let token = self.token()?;
        let resp = self.transport.send(token, request).await?;

        if let Err(e) = classify(
            resp.status,
            &resp.body,
            request.resource,
            request.is_write(),
        ) {
            tracing::warn!("{} {} failed: {}", request.method, request.path, e);
            return Err(e);
        }
        Ok(resp)
    }

    /// Execute a request whose success body is a single JSON record.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ChatworkError> {
        let resp = self.exchange(&request).await?;
        serde_json::from_str(&resp.body).map_err(|e| ChatworkError::Parse(e.to_string()))
    }

    /// Execute a request whose success body is a JSON array.
    ///
    /// Chatwork answers "nothing new" with 204 and no body.
    pub async fn execute_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ChatworkError> {
        let resp = self.exchange(&request).await?;
        if resp.status == 204 || resp.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&resp.body).map_err(|e| ChatworkError::Parse(e.to_string()))
    }
}
