mod app;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use constellation::config::{SceneConfig, SceneMode, load_config};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Graph,
    Orbit,
}

impl From<ModeArg> for SceneMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Graph => SceneMode::Graph,
            ModeArg::Orbit => SceneMode::Orbit,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON scene config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long)]
    node_count: Option<usize>,

    #[arg(long)]
    sphere_radius: Option<f64>,

    /// Fraction of an edge drawn per frame.
    #[arg(long)]
    edge_step: Option<f64>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SceneConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.start_mode = mode.into();
        }
        if let Some(node_count) = self.node_count {
            config.node_count = node_count;
        }
        if let Some(sphere_radius) = self.sphere_radius {
            config.sphere_radius = sphere_radius;
        }
        if let Some(edge_step) = self.edge_step {
            config.edge_progress_step = edge_step;
        }

        config.validate().context("Invalid scene configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.scene_config()?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "constellation",
        options,
        Box::new(move |cc| Ok(Box::new(app::ConstellationApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("Failed to start the window: {error}"))
}
