use anyhow::{Context, Result};
use cat_avatar_generator::ai::{ImageGenerationService, MinimaxImageClient};
use cat_avatar_generator::models::{AspectRatio, Config, GeneratedImage};
use cat_avatar_generator::Preferences;
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "cat-avatar-generator")]
#[command(about = "Generate cat character avatars with MiniMax")]
struct CliArgs {
    /// Fur color (e.g. warm-pink, sky-blue, 薄荷绿)
    #[arg(long, default_value = "warm-pink")]
    color: String,

    /// Personality (e.g. gentle, lively, 聪明)
    #[arg(long, default_value = "gentle")]
    personality: String,

    /// Accessory (e.g. none, glasses, 戴围巾)
    #[arg(long, default_value = "none")]
    appearance: String,

    /// Character role (companion, caring-elder, mentor)
    #[arg(long, default_value = "companion")]
    role: String,

    /// Number of images to generate (1-4)
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Aspect ratio (1:1, 16:9, 4:3, 3:4, 9:16)
    #[arg(long, default_value = "1:1")]
    aspect_ratio: AspectRatio,

    /// Directory the images are saved to
    #[arg(long, default_value = "./output")]
    out_dir: PathBuf,
}

fn image_file_name(image: &GeneratedImage, fallback_stem: &str) -> String {
    let stem = if image.task_id.is_empty() {
        fallback_stem
    } else {
        image.task_id.as_str()
    };
    format!("{}_{}.jpeg", stem, image.index)
}

async fn run(client: &MinimaxImageClient, args: &CliArgs) -> Result<Vec<PathBuf>> {
    let preferences =
        Preferences::from_labels(&args.color, &args.personality, &args.appearance, &args.role);
    info!("Preferences: {:?}", preferences);

    let images = client
        .generate_multiple_images(&preferences, args.count, args.aspect_ratio)
        .await
        .context("Image generation failed")?;

    let fallback_stem = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut saved = Vec::with_capacity(images.len());
    for image in &images {
        let destination = args.out_dir.join(image_file_name(image, &fallback_stem));
        let path = client
            .download_image(&image.url, &destination)
            .await
            .with_context(|| format!("Failed to download image {}", image.index))?;
        saved.push(path);
    }

    Ok(saved)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cat_avatar_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = MinimaxImageClient::new(&config);
    let outcome = run(&client, &args).await;
    client.close();

    match outcome {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            info!("Generation completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
