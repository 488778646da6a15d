//! Wire-facing value types shared by every operation.

pub mod options;
pub mod request;
pub mod response;

pub use crate::types::options::{
    with_format, with_image_count, with_size, with_user, ApiOptions, ImageOption, ImageSize,
    ResponseFormat,
};
pub use crate::types::request::{CreateRequest, EditRequest, VariationRequest};
pub use crate::types::response::{ErrorDetails, ErrorPayload, ImageResponse, OutputImage};

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
