use anyhow::{Context, Result};
use bytes::Bytes;
use dalle2_rs::client::{ClientV1, ImageClient};
use dalle2_rs::core::CancelToken;
use dalle2_rs::types::{with_image_count, with_size, ImageSize};

// Run with:
//   OPENAI_API_KEY=sk-... cargo run -p variation-image -- otter.png

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        eprintln!("OPENAI_API_KEY is not set. Set it in your environment.");
        std::process::exit(1);
    }

    let image_path = std::env::args()
        .nth(1)
        .context("usage: variation-image <image.png>")?;
    let image = Bytes::from(std::fs::read(&image_path).with_context(|| format!("reading {image_path}"))?);

    let client = ClientV1::new(api_key)?;
    let resp = client
        .variation(
            &CancelToken::new(),
            image,
            &[with_image_count(2), with_size(ImageSize::Small)],
        )
        .await?;

    println!("Created: {}", resp.created);
    println!("Images:");
    for img in &resp.data {
        println!("\t{}", img.url.as_deref().unwrap_or_default());
    }
    Ok(())
}
