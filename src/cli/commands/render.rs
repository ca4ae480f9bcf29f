//! Render command - run the formula through the pipeline

use crate::cli::args::{OutputFormat, RenderArgs};
use crate::config::Config;
use crate::error::TexPngResult;
use crate::render::{RenderRequest, Renderer};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Execute the render command
pub async fn execute(args: RenderArgs, config: &Config) -> TexPngResult<()> {
    let mut config = config.clone();
    if let Some(dir) = &args.work_dir {
        config.render.work_dir = dir.clone();
    }

    let mut request = RenderRequest::new(args.formula.as_str(), &config);
    if let Some(density) = args.density {
        request.density = density;
    }
    if !args.packages.is_empty() {
        request.packages = args.packages.clone();
    }
    request.output = args.output.clone();
    request.force = args.force;

    debug!(
        "Rendering formula at {} dpi into {}",
        request.density,
        config.render.work_dir.display()
    );

    let renderer = Renderer::new(&config);

    let pb = create_progress_bar("Rendering formula...");
    let result = renderer.render(&request).await;
    pb.finish_and_clear();

    let outcome = result?;

    match args.format {
        OutputFormat::Plain => {
            println!("{}", outcome.path.display());
            if outcome.cached {
                eprintln!("{}", style("(cached)").dim());
            }
        }
        OutputFormat::Json => {
            let value = json!({
                "path": outcome.path,
                "hash": outcome.hash.as_str(),
                "cached": outcome.cached,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn create_progress_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
