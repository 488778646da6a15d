use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::core::error::TransportError;

#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Overall request timeout (optional; if None, rely on connect timeout)
    pub request_timeout: Option<Duration>,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// A fully-read HTTP exchange result. The body is handed over as text;
/// status interpretation and JSON decoding belong to the caller.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub fields: Vec<MultipartField>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(MultipartField {
            name: name.into(),
            value: MultipartValue::Text(value.into()),
        });
    }

    pub fn push_bytes(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
        filename: Option<String>,
        content_type: Option<String>,
    ) {
        self.fields.push(MultipartField {
            name: name.into(),
            value: MultipartValue::Bytes {
                data,
                filename,
                content_type,
            },
        });
    }
}

#[derive(Debug, Clone)]
pub struct MultipartField {
    pub name: String,
    pub value: MultipartValue,
}

#[derive(Debug, Clone)]
pub enum MultipartValue {
    Text(String),
    Bytes {
        data: Vec<u8>,
        filename: Option<String>,
        content_type: Option<String>,
    },
}

/// Seam between the client and whatever actually moves bytes. A transport
/// reports network-level failures through [`TransportError`]; any HTTP
/// status, 200 or not, is a successful round trip from its point of view.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a JSON POST request and return the full response.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError>;

    /// Perform a multipart/form-data POST request and return the full response.
    async fn post_multipart(
        &self,
        url: &str,
        headers: &[(String, String)],
        form: &MultipartForm,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError>;
}
