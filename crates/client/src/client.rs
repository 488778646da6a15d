use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;
use url::Url;

use crate::client::request;
use crate::dalle_core::auth::ApiKeyTransport;
use crate::dalle_core::cancel::CancelToken;
use crate::dalle_core::error::ClientError;
use crate::dalle_core::transport::{
    HttpResponse, HttpTransport, MultipartForm, TransportConfig,
};
use crate::dalle_types::options::{ApiOptions, ImageOption};
use crate::dalle_types::request::{CreateRequest, EditRequest, VariationRequest};
use crate::dalle_types::response::{ErrorPayload, ImageResponse};
use crate::reqwest_transport::ReqwestTransport;

const BASE_URL: &str = "https://api.openai.com";
const CLIENT_NAME: &str = "dalle2-rs";
const API_VERSION: &str = "v1";

/// The three remote operations the image service offers.
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Generate images from a text prompt.
    async fn create(
        &self,
        ctx: &CancelToken,
        prompt: &str,
        opts: &[ImageOption],
    ) -> Result<ImageResponse, ClientError>;

    /// Edit an image where the mask's transparent areas indicate the
    /// region to repaint. Both payloads are raw bytes; reading files is
    /// the caller's job.
    async fn edit(
        &self,
        ctx: &CancelToken,
        image: Bytes,
        mask: Bytes,
        prompt: &str,
        opts: &[ImageOption],
    ) -> Result<ImageResponse, ClientError>;

    /// Generate variations of the given image.
    async fn variation(
        &self,
        ctx: &CancelToken,
        image: Bytes,
        opts: &[ImageOption],
    ) -> Result<ImageResponse, ClientError>;
}

/// Client for `v1` of the image API. Holds no per-call state; every
/// operation is a single independent request/response exchange.
pub struct ClientV1<T: HttpTransport = ReqwestTransport> {
    base: Url,
    user_agent: String,
    http: ApiKeyTransport<T>,
    transport_cfg: TransportConfig,
}

impl ClientV1 {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        let transport_cfg = TransportConfig::default();
        let http = ReqwestTransport::try_new(&transport_cfg)?;
        Self::with_transport(api_key, http, transport_cfg)
    }
}

impl<T: HttpTransport> ClientV1<T> {
    /// Build a client over a caller-supplied transport. Useful for tests
    /// and for callers tuning their own `TransportConfig`.
    pub fn with_transport(
        api_key: impl Into<String>,
        http: T,
        transport_cfg: TransportConfig,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(&format!("{BASE_URL}/{API_VERSION}/images/"))?;
        Ok(Self {
            base,
            user_agent: format!("{CLIENT_NAME}/{API_VERSION}"),
            http: ApiKeyTransport::new(api_key, http),
            transport_cfg,
        })
    }

    /// Point the client at a different host, keeping the
    /// `<base>/<version>/images/` shape. Intended for stub servers and
    /// API-compatible proxies.
    pub fn with_base_url(mut self, base: &str) -> Result<Self, ClientError> {
        let trimmed = base.trim_end_matches('/');
        self.base = Url::parse(&format!("{trimmed}/{API_VERSION}/images/"))?;
        Ok(self)
    }

    fn endpoint(&self, suffix: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(suffix)?)
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        vec![("user-agent".into(), self.user_agent.clone())]
    }

    fn ensure_live(ctx: &CancelToken) -> Result<(), ClientError> {
        if ctx.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        Ok(())
    }

    /// A token deadline tightens the per-call request timeout; past the
    /// entry check, enforcement belongs to the transport.
    fn call_cfg(&self, ctx: &CancelToken) -> TransportConfig {
        let Some(deadline) = ctx.deadline() else {
            return self.transport_cfg.clone();
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        let request_timeout = match self.transport_cfg.request_timeout {
            Some(timeout) => timeout.min(remaining),
            None => remaining,
        };
        TransportConfig {
            request_timeout: Some(request_timeout),
            ..self.transport_cfg.clone()
        }
    }

    async fn dispatch_json(
        &self,
        ctx: &CancelToken,
        suffix: &str,
        body: &Value,
    ) -> Result<ImageResponse, ClientError> {
        let url = self.endpoint(suffix)?;
        debug!(target: "dalle2::client", url = %url, "dispatching json request");
        let resp = self
            .http
            .post_json(url.as_str(), &self.request_headers(), body, &self.call_cfg(ctx))
            .await?;
        decode_response(resp)
    }

    async fn dispatch_form(
        &self,
        ctx: &CancelToken,
        suffix: &str,
        form: &MultipartForm,
    ) -> Result<ImageResponse, ClientError> {
        let url = self.endpoint(suffix)?;
        debug!(target: "dalle2::client", url = %url, "dispatching multipart request");
        let resp = self
            .http
            .post_multipart(url.as_str(), &self.request_headers(), form, &self.call_cfg(ctx))
            .await?;
        decode_response(resp)
    }
}

#[async_trait]
impl<T: HttpTransport> ImageClient for ClientV1<T> {
    async fn create(
        &self,
        ctx: &CancelToken,
        prompt: &str,
        opts: &[ImageOption],
    ) -> Result<ImageResponse, ClientError> {
        Self::ensure_live(ctx)?;
        let req = CreateRequest {
            options: ApiOptions::with_overrides(opts),
            prompt: prompt.to_string(),
        };
        let body = request::create_body(&req)?;
        self.dispatch_json(ctx, "generations", &body).await
    }

    async fn edit(
        &self,
        ctx: &CancelToken,
        image: Bytes,
        mask: Bytes,
        prompt: &str,
        opts: &[ImageOption],
    ) -> Result<ImageResponse, ClientError> {
        Self::ensure_live(ctx)?;
        let req = EditRequest {
            options: ApiOptions::with_overrides(opts),
            image,
            mask,
            prompt: prompt.to_string(),
        };
        let form = request::edit_form(&req);
        self.dispatch_form(ctx, "edits", &form).await
    }

    async fn variation(
        &self,
        ctx: &CancelToken,
        image: Bytes,
        opts: &[ImageOption],
    ) -> Result<ImageResponse, ClientError> {
        Self::ensure_live(ctx)?;
        let req = VariationRequest {
            options: ApiOptions::with_overrides(opts),
            image,
        };
        let form = request::variation_form(&req);
        self.dispatch_form(ctx, "variations", &form).await
    }
}

/// Status 200 decodes as a success body; anything else decodes as the
/// service's structured error. A body that parses as neither is a decode
/// error, kept distinct so callers can tell a reported failure from an
/// unintelligible one.
fn decode_response(resp: HttpResponse) -> Result<ImageResponse, ClientError> {
    if resp.status == 200 {
        return serde_json::from_str(&resp.body).map_err(ClientError::Decode);
    }
    match serde_json::from_str::<ErrorPayload>(&resp.body) {
        Ok(payload) => Err(ClientError::Api {
            status: resp.status,
            details: payload.error,
        }),
        Err(err) => Err(ClientError::Decode(err)),
    }
}
