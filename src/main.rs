//! `diagram-nav`: replay a pan/zoom script against an SVG file and print the
//! resulting document (or a JSON summary of the final view).

mod script;
mod svg;


use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use viewport::clock::ManualClock;
use viewport::config::{ConfigError, ViewportConfig};
use viewport::content::LogicalFrame;
use viewport::controller::ViewportController;
use viewport::render::{MarkupTree, Renderer};
use viewport::transform::{Transform, Viewport};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Svg(#[from] svg::SvgError),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid script: {0}")]
    Script(#[from] script::ScriptError),
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "diagram-nav", about = "Replay pan/zoom input against an SVG diagram")]
struct Cli {
    /// SVG file to load.
    input: PathBuf,

    #[arg(long, env = "DIAGRAM_NAV_WIDTH", default_value_t = 1024.0, value_parser = dimension)]
    width: f64,

    #[arg(long, env = "DIAGRAM_NAV_HEIGHT", default_value_t = 768.0, value_parser = dimension)]
    height: f64,

    /// JSON file overriding the default viewport settings.
    #[arg(long, env = "DIAGRAM_NAV_CONFIG")]
    config: Option<PathBuf>,

    /// Print a JSON summary instead of the transformed SVG.
    #[arg(long)]
    json: bool,

    /// Steps such as `zoom-in`, `drag:0,0,40,20`, `wait:300`, `key:ctrl+0`.
    steps: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    transform: Transform,
    viewport: Viewport,
    frame: Option<LogicalFrame>,
    markup: String,
}

/// Surface sizes are finite, non-negative pixel counts.
fn dimension(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("`{raw}` must be a finite, non-negative size"))
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_owned(), source })
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewportConfig::from_json(&read(path)?)?,
        None => ViewportConfig::default(),
    };
    let steps = script::parse(&cli.steps)?;
    let tree = svg::load(&read(&cli.input)?, Viewport::new(cli.width, cli.height))?;

    let clock = ManualClock::new();
    let mut controller = ViewportController::new(tree, clock.clone(), config);
    script::run(&mut controller, &clock, &steps);
    tracing::info!(transform = %controller.transform(), steps = steps.len(), "replay finished");

    let markup = outer_markup(controller.renderer());
    if cli.json {
        let summary = Summary {
            transform: controller.transform(),
            viewport: controller.viewport(),
            frame: controller.logical_frame(),
            markup,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{markup}");
    }
    Ok(())
}

fn outer_markup(tree: &MarkupTree) -> String {
    tree.mount().map(|root| tree.serialize(root)).unwrap_or_default()
}
