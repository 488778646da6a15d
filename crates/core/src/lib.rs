pub mod auth;
pub mod cancel;
pub mod error;
pub mod transport;

pub use crate::core::auth::ApiKeyTransport;
pub use crate::core::cancel::CancelToken;
pub use crate::core::error::{ClientError, TransportError};
pub use crate::core::transport::{
    HttpResponse, HttpTransport, MultipartField, MultipartForm, MultipartValue, TransportConfig,
};

#[cfg(test)]
#[path = "../tests/auth_tests.rs"]
mod auth_tests;
