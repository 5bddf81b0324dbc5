use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::LookupRecord,
    error::{LookupError, NO_RECORDS_MESSAGE},
    protocol::{case_path, ErrorBody},
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::{config::ClientConfig, form::LookupRequest};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid lookup url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("lookup transport unavailable: {0}")]
    Unavailable(String),
}

/// Status and raw body of whatever response the service sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One outbound lookup. Any HTTP response, whatever its status, is `Ok`;
/// `Err` means no response was obtained.
#[async_trait]
pub trait LookupTransport: Send + Sync {
    async fn fetch(&self, request: &LookupRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: LookupTransport + ?Sized> LookupTransport for std::sync::Arc<T> {
    async fn fetch(&self, request: &LookupRequest) -> Result<RawResponse, TransportError> {
        (**self).fetch(request).await
    }
}

pub struct MissingLookupTransport {
    reason: String,
}

impl MissingLookupTransport {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LookupTransport for MissingLookupTransport {
    async fn fetch(&self, _request: &LookupRequest) -> Result<RawResponse, TransportError> {
        Err(TransportError::Unavailable(self.reason.clone()))
    }
}

pub struct HttpLookupTransport {
    http: Client,
    base_url: String,
}

impl HttpLookupTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, request: &LookupRequest) -> Result<Url, TransportError> {
        let path = case_path(request.year, &request.identifier);
        Ok(Url::parse(&format!("{}{path}", self.base_url))?)
    }
}

#[async_trait]
impl LookupTransport for HttpLookupTransport {
    async fn fetch(&self, request: &LookupRequest) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(request)?;
        info!(url = %url, "requesting case record");

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        info!(status, bytes = body.len(), "case lookup responded");
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// Maps a response onto a record or an application error.
///
/// A body that is not JSON, or a 2xx body that is not an object, yields
/// [`LookupError::Decode`].
pub fn classify_response(response: RawResponse) -> Result<LookupRecord, LookupError> {
    if response.is_success() {
        return serde_json::from_slice::<LookupRecord>(&response.body).map_err(|err| {
            warn!(status = response.status, %err, "case record body is not a JSON object");
            LookupError::Decode(err.to_string())
        });
    }

    let body: Value = serde_json::from_slice(&response.body).map_err(|err| {
        warn!(status = response.status, %err, "error body is not JSON");
        LookupError::Decode(err.to_string())
    })?;
    if body.is_null() {
        warn!(status = response.status, "error body is JSON null");
        return Err(LookupError::Decode("error body is null".to_string()));
    }
    let message = ErrorBody::from_json(&body)
        .error
        .unwrap_or_else(|| NO_RECORDS_MESSAGE.to_string());
    Err(LookupError::Application {
        status: response.status,
        message,
    })
}

pub(crate) fn transport_failure(err: TransportError) -> LookupError {
    warn!(%err, "case lookup transport failure");
    LookupError::Transport(err.to_string())
}
