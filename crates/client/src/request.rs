//! Request encoders: one JSON path (create) and one multipart path per
//! byte-carrying variant. Zero/default fields are omitted, mirroring the
//! service's "omit empty" convention.

use bytes::Bytes;
use serde_json::Value;

use crate::dalle_core::error::ClientError;
use crate::dalle_core::transport::MultipartForm;
use crate::dalle_types::options::ApiOptions;
use crate::dalle_types::request::{CreateRequest, EditRequest, VariationRequest};

pub(crate) fn create_body(req: &CreateRequest) -> Result<Value, ClientError> {
    serde_json::to_value(req).map_err(ClientError::Encode)
}

pub(crate) fn edit_form(req: &EditRequest) -> MultipartForm {
    let mut form = MultipartForm::new();
    push_option_fields(&mut form, &req.options);
    if !req.prompt.is_empty() {
        form.push_text("prompt", req.prompt.clone());
    }
    push_image_part(&mut form, "image", &req.image);
    push_image_part(&mut form, "mask", &req.mask);
    form
}

pub(crate) fn variation_form(req: &VariationRequest) -> MultipartForm {
    let mut form = MultipartForm::new();
    push_option_fields(&mut form, &req.options);
    push_image_part(&mut form, "image", &req.image);
    form
}

fn push_option_fields(form: &mut MultipartForm, options: &ApiOptions) {
    if options.n != 0 {
        form.push_text("n", options.n.to_string());
    }
    form.push_text("response_format", options.format.as_str());
    form.push_text("size", options.size.as_str());
    if !options.user.is_empty() {
        form.push_text("user", options.user.clone());
    }
}

fn push_image_part(form: &mut MultipartForm, name: &str, data: &Bytes) {
    form.push_bytes(
        name,
        data.to_vec(),
        Some(format!("{name}.png")),
        Some("image/png".into()),
    );
}
