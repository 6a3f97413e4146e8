use anyhow::Result;
use clap::Parser;
use facecenter::app::{App, DEFAULT_DOWNLOAD_FILENAME};
use facecenter::models::{Config, ImageSource};
use facecenter::progress;
use facecenter::state::ProcessingState;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "facecenter")]
#[command(about = "Center the face of a portrait in a circle-safe square using AI outpainting")]
struct CliArgs {
    /// Photo URL (http/https) or local image file.
    #[arg(value_name = "SOURCE", value_parser = parse_source_arg)]
    source: ImageSource,

    /// Where to save the processed image (file or directory).
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_DOWNLOAD_FILENAME)]
    output: PathBuf,

    /// Skip writing the circle-cropped preview next to the output.
    #[arg(long)]
    no_circle_preview: bool,

    /// Override the Gemini image model ID.
    #[arg(long, value_name = "ID")]
    model: Option<String>,
}

fn parse_source_arg(input: &str) -> std::result::Result<ImageSource, String> {
    ImageSource::from_arg(input).map_err(|e| e.to_string())
}

/// `portrait.png` -> `portrait-circle.png`, placed beside the saved image.
fn circle_preview_path(saved: &Path) -> PathBuf {
    let stem = saved
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "processed-image".to_string());
    saved.with_file_name(format!("{}-circle.png", stem))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facecenter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting facecenter");

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(model) = args.model {
        config.image_model = model;
    }

    let mut app = App::new(&config);
    app.set_circle_preview(!args.no_circle_preview);

    let submitted = tokio::select! {
        submitted = app.submit(args.source) => submitted.map(|result| result.status),
        never = progress::announce(progress::MESSAGE_INTERVAL) => match never {},
    };

    match submitted {
        Ok(ProcessingState::Success) => {}
        Ok(_) => {
            let message = app.result().error_message.clone().unwrap_or_default();
            error!("Processing failed: {}", message);
            std::process::exit(1);
        }
        Err(e) => {
            error!("Could not start processing: {}", e);
            std::process::exit(1);
        }
    }

    let saved = app.download(&args.output).await?;
    info!("Processed portrait saved to {}", saved.display());

    if let Some(preview) = app.circle_preview().await? {
        let preview_path = circle_preview_path(&saved);
        tokio::fs::write(&preview_path, preview).await?;
        info!("Circle preview saved to {}", preview_path.display());
    }

    Ok(())
}
