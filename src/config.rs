use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::scene::catalog::NODE_NAMES;
use crate::scene::edges::DEFAULT_PROGRESS_STEP;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneMode {
    #[default]
    Graph,
    Orbit,
}

impl SceneMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Graph => "Node sphere",
            Self::Orbit => "Orbits",
        }
    }
}

/// Startup configuration. Read once; the scene never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub node_count: usize,
    pub sphere_radius: f64,
    pub edge_progress_step: f64,
    pub orbital_distances: Vec<f64>,
    pub orbital_speeds: Vec<f64>,
    /// Cosmetic per-tick rotation of each orbiting body, in radians.
    pub spin_speed: f64,
    pub start_mode: SceneMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            node_count: NODE_NAMES.len(),
            sphere_radius: 2.5,
            edge_progress_step: DEFAULT_PROGRESS_STEP,
            orbital_distances: vec![5.0, 8.0, 12.0, 16.0],
            orbital_speeds: vec![0.5, 0.3, 0.2, 0.15],
            spin_speed: 0.01,
            start_mode: SceneMode::Graph,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.node_count >= 1, "node_count must be at least 1");
        ensure!(
            self.node_count <= NODE_NAMES.len(),
            "node_count {} exceeds the {} catalog names",
            self.node_count,
            NODE_NAMES.len()
        );
        ensure!(
            self.sphere_radius.is_finite() && self.sphere_radius > 0.0,
            "sphere_radius must be a positive number, got {}",
            self.sphere_radius
        );
        ensure!(
            self.edge_progress_step > 0.0 && self.edge_progress_step <= 1.0,
            "edge_progress_step must be in (0, 1], got {}",
            self.edge_progress_step
        );
        ensure!(
            !self.orbital_distances.is_empty(),
            "at least one orbital distance is required"
        );
        ensure!(
            self.orbital_distances.len() == self.orbital_speeds.len(),
            "got {} orbital distances but {} orbital speeds",
            self.orbital_distances.len(),
            self.orbital_speeds.len()
        );
        for (index, distance) in self.orbital_distances.iter().enumerate() {
            ensure!(
                distance.is_finite() && *distance > 0.0,
                "orbital distance #{index} must be positive, got {distance}"
            );
        }
        for (index, speed) in self.orbital_speeds.iter().enumerate() {
            ensure!(speed.is_finite(), "orbital speed #{index} is not finite");
        }
        ensure!(self.spin_speed.is_finite(), "spin_speed is not finite");
        Ok(())
    }
}

pub fn parse_config(text: &str) -> Result<SceneConfig> {
    serde_json::from_str(text).context("Failed to parse scene config JSON")
}

pub fn load_config(path: &Path) -> Result<SceneConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config in {}", path.display()))
}
