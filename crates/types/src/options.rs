use serde::{Deserialize, Serialize};

/// Dimensions the service accepts for generated images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Small,
    #[serde(rename = "512x512")]
    Medium,
    #[default]
    #[serde(rename = "1024x1024")]
    Large,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "256x256",
            ImageSize::Medium => "512x512",
            ImageSize::Large => "1024x1024",
        }
    }
}

/// How the service should deliver each generated image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseFormat {
    #[default]
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "b64_json")]
    Base64,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Url => "url",
            ResponseFormat::Base64 => "b64_json",
        }
    }
}

fn default_image_count() -> u8 {
    1
}

fn count_is_zero(n: &u8) -> bool {
    *n == 0
}

/// Per-call configuration shared by all three operations.
///
/// Invalid combinations are not rejected here; the remote service is the
/// authority on acceptance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiOptions {
    #[serde(default = "default_image_count", skip_serializing_if = "count_is_zero")]
    pub n: u8,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(rename = "response_format", default)]
    pub format: ResponseFormat,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            n: default_image_count(),
            size: ImageSize::default(),
            format: ResponseFormat::default(),
            user: String::new(),
        }
    }
}

impl ApiOptions {
    /// Apply overrides left-to-right over the defaults; later options win.
    pub fn with_overrides(opts: &[ImageOption]) -> Self {
        let mut options = Self::default();
        for opt in opts {
            opt.apply(&mut options);
        }
        options
    }
}

/// A single named override over [`ApiOptions`].
pub struct ImageOption(Box<dyn Fn(&mut ApiOptions) + Send + Sync>);

impl ImageOption {
    fn new(f: impl Fn(&mut ApiOptions) + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn apply(&self, options: &mut ApiOptions) {
        (self.0)(options)
    }
}

impl std::fmt::Debug for ImageOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ImageOption")
    }
}

pub fn with_image_count(n: u8) -> ImageOption {
    ImageOption::new(move |o| o.n = n)
}

pub fn with_size(size: ImageSize) -> ImageOption {
    ImageOption::new(move |o| o.size = size)
}

pub fn with_format(format: ResponseFormat) -> ImageOption {
    ImageOption::new(move |o| o.format = format)
}

pub fn with_user(user: impl Into<String>) -> ImageOption {
    let user = user.into();
    ImageOption::new(move |o| o.user = user.clone())
}
