use crate::dalle_types::options::{
    with_format, with_image_count, with_size, with_user, ApiOptions, ImageSize, ResponseFormat,
};
use serde_json::json;

#[test]
fn no_overrides_yield_documented_defaults() {
    let options = ApiOptions::with_overrides(&[]);
    assert_eq!(options.n, 1);
    assert_eq!(options.size, ImageSize::Large);
    assert_eq!(options.format, ResponseFormat::Url);
    assert_eq!(options.user, "");
}

#[test]
fn overrides_apply_left_to_right() {
    let options = ApiOptions::with_overrides(&[
        with_size(ImageSize::Medium),
        with_size(ImageSize::Large),
        with_image_count(3),
    ]);
    assert_eq!(options.size, ImageSize::Large);
    assert_eq!(options.n, 3);
    // untouched fields keep their defaults
    assert_eq!(options.format, ResponseFormat::Url);
}

#[test]
fn round_trip_uses_documented_key_names() {
    let options = ApiOptions::with_overrides(&[
        with_image_count(4),
        with_size(ImageSize::Large),
        with_format(ResponseFormat::Base64),
        with_user("test_user"),
    ]);

    let value = serde_json::to_value(&options).expect("serialize options");
    assert_eq!(
        value,
        json!({
            "n": 4,
            "size": "1024x1024",
            "response_format": "b64_json",
            "user": "test_user"
        })
    );

    let back: ApiOptions = serde_json::from_value(value).expect("deserialize options");
    assert_eq!(back, options);
}

#[test]
fn zero_and_empty_fields_are_omitted() {
    let options = ApiOptions {
        n: 0,
        user: String::new(),
        ..ApiOptions::default()
    };
    let value = serde_json::to_value(&options).expect("serialize options");
    let obj = value.as_object().expect("object");
    assert!(!obj.contains_key("n"));
    assert!(!obj.contains_key("user"));
    assert_eq!(obj.get("size"), Some(&json!("1024x1024")));
    assert_eq!(obj.get("response_format"), Some(&json!("url")));
}

#[test]
fn missing_fields_deserialize_to_defaults() {
    let options: ApiOptions = serde_json::from_value(json!({})).expect("deserialize empty");
    assert_eq!(options, ApiOptions::default());
}

#[test]
fn size_and_format_wire_names_match_as_str() {
    for size in [ImageSize::Small, ImageSize::Medium, ImageSize::Large] {
        assert_eq!(
            serde_json::to_value(size).unwrap(),
            json!(size.as_str()),
        );
    }
    for format in [ResponseFormat::Url, ResponseFormat::Base64] {
        assert_eq!(
            serde_json::to_value(format).unwrap(),
            json!(format.as_str()),
        );
    }
}
