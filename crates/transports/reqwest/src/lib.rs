//! Production [`HttpTransport`] backed by `reqwest`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::debug;

use crate::dalle_core::error::TransportError;
use crate::dalle_core::transport::{
    HttpResponse, HttpTransport, MultipartForm, MultipartValue, TransportConfig,
};

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    fn configure_builder(
        mut builder: reqwest::ClientBuilder,
        cfg: &TransportConfig,
    ) -> reqwest::ClientBuilder {
        builder = builder
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(req_timeout) = cfg.request_timeout {
            builder = builder.timeout(req_timeout);
        }
        builder.connect_timeout(cfg.connect_timeout)
    }

    fn try_new_with_builder(
        cfg: &TransportConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, TransportError> {
        let builder = Self::configure_builder(builder, cfg);
        let client = builder.build().map_err(|err| {
            TransportError::Other(format!(
                "reqwest client build failed: {}",
                format_reqwest_error_chain(&err)
            ))
        })?;
        Ok(Self { client })
    }

    pub fn try_new(cfg: &TransportConfig) -> Result<Self, TransportError> {
        Self::try_new_with_builder(cfg, Client::builder())
    }

    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError> {
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => {
                let detail = format_reqwest_error_chain(&err);
                debug!(target: "dalle2::transport::reqwest", %detail, "reqwest send failed");
                return Err(classify_send_failure(
                    err.is_connect(),
                    err.is_timeout(),
                    detail,
                    cfg,
                ));
            }
        };

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect::<Vec<_>>();
        // Body is always drained here, success or not, so the connection
        // can go back to the pool before decoding happens upstream.
        let body = resp
            .text()
            .await
            .map_err(|err| TransportError::BodyRead(err.to_string()))?;

        debug!(
            target: "dalle2::transport::reqwest",
            status,
            body_len = body.len(),
            "round trip complete"
        );
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn apply_headers(
        mut req: reqwest::RequestBuilder,
        headers: &[(String, String)],
    ) -> reqwest::RequestBuilder {
        for (name, value) in headers {
            // Content-Type comes from .json()/.multipart(), boundary included.
            if !name.eq_ignore_ascii_case("content-type") {
                req = req.header(name.as_str(), value.as_str());
            }
        }
        req
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError> {
        let req = Self::apply_headers(self.client.post(url).json(body), headers);
        self.execute(req, cfg).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        headers: &[(String, String)],
        form: &MultipartForm,
        cfg: &TransportConfig,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_form = Form::new();
        for field in &form.fields {
            match &field.value {
                MultipartValue::Text(text) => {
                    req_form = req_form.text(field.name.clone(), text.clone());
                }
                MultipartValue::Bytes {
                    data,
                    filename,
                    content_type,
                } => {
                    let mut part = Part::bytes(data.clone());
                    if let Some(name) = filename {
                        part = part.file_name(name.clone());
                    }
                    if let Some(ct) = content_type {
                        part = part
                            .mime_str(ct)
                            .map_err(|err| TransportError::Other(err.to_string()))?;
                    }
                    req_form = req_form.part(field.name.clone(), part);
                }
            }
        }

        let req = Self::apply_headers(self.client.post(url).multipart(req_form), headers);
        self.execute(req, cfg).await
    }
}

/// A timeout with an overall request timeout configured is the request
/// deadline expiring, not the connect phase; report the duration that
/// actually elapsed.
fn classify_send_failure(
    is_connect: bool,
    is_timeout: bool,
    detail: String,
    cfg: &TransportConfig,
) -> TransportError {
    if is_connect {
        TransportError::Network(format!("connect: {detail}"))
    } else if is_timeout {
        match cfg.request_timeout {
            Some(timeout) => TransportError::RequestTimeout(timeout),
            None => TransportError::ConnectTimeout(cfg.connect_timeout),
        }
    } else {
        TransportError::Network(detail)
    }
}

fn format_reqwest_error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(src) = current {
        out.push_str(": ");
        out.push_str(&src.to_string());
        current = src.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_returns_transport_error_when_client_build_fails() {
        let cfg = TransportConfig::default();
        let err = match ReqwestTransport::try_new_with_builder(
            &cfg,
            Client::builder().user_agent("bad\nagent"),
        ) {
            Ok(_) => panic!("invalid user-agent should fail reqwest client build"),
            Err(err) => err,
        };
        match err {
            TransportError::Other(message) => {
                assert!(
                    message.contains("reqwest client build failed"),
                    "unexpected message: {message}"
                );
            }
            other => panic!("unexpected transport error variant: {other:?}"),
        }
    }

    #[test]
    fn timeout_with_request_deadline_reports_the_request_phase() {
        let cfg = TransportConfig {
            request_timeout: Some(Duration::from_secs(5)),
            ..TransportConfig::default()
        };
        let err = classify_send_failure(false, true, "timed out".into(), &cfg);
        match err {
            TransportError::RequestTimeout(timeout) => {
                assert_eq!(timeout, Duration::from_secs(5));
            }
            other => panic!("unexpected transport error variant: {other:?}"),
        }
    }

    #[test]
    fn timeout_without_request_deadline_reports_the_connect_phase() {
        let cfg = TransportConfig::default();
        let err = classify_send_failure(false, true, "timed out".into(), &cfg);
        match err {
            TransportError::ConnectTimeout(timeout) => {
                assert_eq!(timeout, cfg.connect_timeout);
            }
            other => panic!("unexpected transport error variant: {other:?}"),
        }
    }

    #[test]
    fn connect_failures_keep_the_error_detail() {
        let err = classify_send_failure(
            true,
            true,
            "connection refused".into(),
            &TransportConfig::default(),
        );
        match err {
            TransportError::Network(message) => {
                assert_eq!(message, "connect: connection refused");
            }
            other => panic!("unexpected transport error variant: {other:?}"),
        }
    }

    #[test]
    fn request_timeout_is_optional() {
        let cfg = TransportConfig {
            request_timeout: Some(Duration::from_secs(30)),
            ..TransportConfig::default()
        };
        assert!(ReqwestTransport::try_new(&cfg).is_ok());
        assert!(ReqwestTransport::try_new(&TransportConfig::default()).is_ok());
    }
}
