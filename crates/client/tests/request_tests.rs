use crate::client::request::{create_body, edit_form, variation_form};
use crate::dalle_core::transport::MultipartValue;
use crate::dalle_types::options::{
    with_format, with_image_count, with_user, ApiOptions, ResponseFormat,
};
use crate::dalle_types::request::{CreateRequest, EditRequest, VariationRequest};
use bytes::Bytes;
use serde_json::json;

#[test]
fn create_body_flattens_options_and_omits_empty_user() {
    let req = CreateRequest {
        options: ApiOptions::with_overrides(&[]),
        prompt: "a cute otter".into(),
    };
    let body = create_body(&req).expect("encode");
    assert_eq!(
        body,
        json!({
            "n": 1,
            "size": "1024x1024",
            "response_format": "url",
            "prompt": "a cute otter"
        })
    );
}

#[test]
fn create_body_carries_every_overridden_field() {
    let req = CreateRequest {
        options: ApiOptions::with_overrides(&[
            with_image_count(4),
            with_format(ResponseFormat::Base64),
            with_user("test_user"),
        ]),
        prompt: "a cute otter".into(),
    };
    let body = create_body(&req).expect("encode");
    assert_eq!(
        body,
        json!({
            "n": 4,
            "size": "1024x1024",
            "response_format": "b64_json",
            "user": "test_user",
            "prompt": "a cute otter"
        })
    );
}

fn text_field<'a>(
    form: &'a crate::dalle_core::transport::MultipartForm,
    name: &str,
) -> Option<&'a str> {
    form.fields.iter().find_map(|field| match &field.value {
        MultipartValue::Text(text) if field.name == name => Some(text.as_str()),
        _ => None,
    })
}

fn byte_field<'a>(
    form: &'a crate::dalle_core::transport::MultipartForm,
    name: &str,
) -> Option<(&'a [u8], Option<&'a str>, Option<&'a str>)> {
    form.fields.iter().find_map(|field| match &field.value {
        MultipartValue::Bytes {
            data,
            filename,
            content_type,
        } if field.name == name => Some((
            data.as_slice(),
            filename.as_deref(),
            content_type.as_deref(),
        )),
        _ => None,
    })
}

#[test]
fn edit_form_has_both_file_parts_and_prompt() {
    let req = EditRequest {
        options: ApiOptions::with_overrides(&[with_user("test_user")]),
        image: Bytes::from_static(b"image-bytes"),
        mask: Bytes::from_static(b"mask-bytes"),
        prompt: "a cute otter".into(),
    };
    let form = edit_form(&req);

    assert_eq!(text_field(&form, "n"), Some("1"));
    assert_eq!(text_field(&form, "response_format"), Some("url"));
    assert_eq!(text_field(&form, "size"), Some("1024x1024"));
    assert_eq!(text_field(&form, "user"), Some("test_user"));
    assert_eq!(text_field(&form, "prompt"), Some("a cute otter"));

    let (data, filename, content_type) = byte_field(&form, "image").expect("image part");
    assert_eq!(data, b"image-bytes");
    assert_eq!(filename, Some("image.png"));
    assert_eq!(content_type, Some("image/png"));

    let (data, filename, _) = byte_field(&form, "mask").expect("mask part");
    assert_eq!(data, b"mask-bytes");
    assert_eq!(filename, Some("mask.png"));
}

#[test]
fn variation_form_has_image_but_no_mask_or_prompt() {
    let req = VariationRequest {
        options: ApiOptions::with_overrides(&[]),
        image: Bytes::from_static(b"image-bytes"),
    };
    let form = variation_form(&req);

    assert!(byte_field(&form, "image").is_some());
    assert!(byte_field(&form, "mask").is_none());
    assert_eq!(text_field(&form, "prompt"), None);
    // empty default user is omitted per the omit-empty convention
    assert_eq!(text_field(&form, "user"), None);
}

#[test]
fn zero_count_is_omitted_from_form_fields() {
    let req = VariationRequest {
        options: ApiOptions {
            n: 0,
            ..ApiOptions::default()
        },
        image: Bytes::from_static(b"image-bytes"),
    };
    let form = variation_form(&req);
    assert_eq!(text_field(&form, "n"), None);
}
