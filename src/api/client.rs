//! HTTP Client Core
//!
//! Request building, bearer auth and response/error decoding shared by all
//! endpoint bindings.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::session::TokenStore;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// REST API client
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

/// Error body shapes the API is known to use
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// `base/seg1/seg2`, each segment percent-encoded
    pub(crate) fn url(&self, segments: &[&str]) -> String {
        build_url(&self.base_url, segments)
    }

    pub(crate) fn get(&self, segments: &[&str]) -> RequestBuilder {
        self.http.get(self.url(segments))
    }

    pub(crate) fn post(&self, segments: &[&str]) -> RequestBuilder {
        self.http.post(self.url(segments))
    }

    pub(crate) fn put(&self, segments: &[&str]) -> RequestBuilder {
        self.http.put(self.url(segments))
    }

    pub(crate) fn delete(&self, segments: &[&str]) -> RequestBuilder {
        self.http.delete(self.url(segments))
    }

    fn authorize(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let token = self.tokens.load().ok_or(AppError::Unauthorized)?;
        Ok(request.bearer_auth(token))
    }

    async fn execute(&self, request: RequestBuilder, with_auth: bool) -> AppResult<Response> {
        let request = if with_auth { self.authorize(request)? } else { request };
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && with_auth {
            log::warn!("[API] token rejected, clearing session");
            self.tokens.clear();
            return Err(AppError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    /// Authorized request with a JSON response
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.execute(request, true).await?;
        Ok(response.json::<T>().await?)
    }

    /// Authorized request whose response body is ignored
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> AppResult<()> {
        self.execute(request, true).await.map(|_| ())
    }

    /// Request without a bearer token (login)
    pub(crate) async fn send_json_anonymous<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.execute(request, false).await?;
        Ok(response.json::<T>().await?)
    }
}

pub(crate) fn build_url(base_url: &str, segments: &[&str]) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    url
}

/// Human-readable message from an error body
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(ErrorBody { message: Some(message) }) = serde_json::from_str::<ErrorBody>(body) {
        return message;
    }
    let text = body.trim();
    if text.starts_with('<') {
        // HTML error page
        return String::new();
    }
    text.chars().take(200).collect()
}
