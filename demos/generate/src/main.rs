use anyhow::Result;
use dalle2_rs::client::{ClientV1, ImageClient};
use dalle2_rs::core::CancelToken;
use dalle2_rs::types::{with_format, with_image_count, with_size, ImageSize, ResponseFormat};

// Run with:
//   OPENAI_API_KEY=sk-... cargo run -p generate-image

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        eprintln!("OPENAI_API_KEY is not set. Set it in your environment.");
        std::process::exit(1);
    }

    let client = ClientV1::new(api_key)?;
    let resp = client
        .create(
            &CancelToken::new(),
            "A cute baby sea otter",
            &[
                with_image_count(1),
                with_size(ImageSize::Small),
                with_format(ResponseFormat::Url),
            ],
        )
        .await?;

    println!("Created: {}", resp.created);
    println!("Images:");
    for img in &resp.data {
        println!("\t{}", img.url.as_deref().unwrap_or_default());
    }
    Ok(())
}
