use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::TransportError;
use crate::core::transport::{HttpResponse, HttpTransport, MultipartForm, TransportConfig};

/// Wraps an inner transport and stamps `Authorization: Bearer <key>` onto
/// every outgoing request. The caller's header slice is never touched;
/// each call works on a freshly-built vector, so callers can reuse header
/// templates across requests.
pub struct ApiKeyTransport<T> {
    api_key: String,
    inner: T,
}

impl<T> ApiKeyTransport<T> {
    pub fn new(api_key: impl Into<String>, inner: T) -> Self {
        Self {
            api_key: api_key.into(),
            inner,
        }
    }

    fn authorized_headers(
        &self,
        headers: &[(String, String)],
    ) -> Result<Vec<(String, String)>, TransportError> {
        if self.api_key.is_empty() {
            return Err(TransportError::MissingCredentials);
        }
        let mut out: Vec<(String, String)> = headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("authorization"))
            .cloned()
            .collect();
        out.push(("authorization".into(), format!("Bearer {}", self.api_key)));
        Ok(out)
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for ApiKeyTransport<T> {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError> {
        let headers = self.authorized_headers(headers)?;
        self.inner.post_json(url, &headers, body, cfg).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        headers: &[(String, String)],
        form: &MultipartForm,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError> {
        let headers = self.authorized_headers(headers)?;
        self.inner.post_multipart(url, &headers, form, cfg).await
    }
}
