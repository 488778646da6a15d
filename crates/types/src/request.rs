use bytes::Bytes;
use serde::Serialize;

use crate::types::options::ApiOptions;

/// Text-to-image request. Travels as a JSON document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateRequest {
    #[serde(flatten)]
    pub options: ApiOptions,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prompt: String,
}

/// Masked edit request. Travels as a multipart form; the caller supplies
/// the raw image and mask bytes (file reading is not this crate's job).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub options: ApiOptions,
    pub image: Bytes,
    pub mask: Bytes,
    pub prompt: String,
}

/// Variation request. Travels as a multipart form with a single image part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationRequest {
    pub options: ApiOptions,
    pub image: Bytes,
}
