//! The versioned client: URL resolution, request construction, dispatch
//! through the bearer-auth transport, and response decoding.

pub mod client;
pub mod request;

pub use client::{ClientV1, ImageClient};

#[cfg(test)]
#[path = "../tests/client_tests.rs"]
mod client_tests;

#[cfg(test)]
#[path = "../tests/request_tests.rs"]
mod request_tests;
