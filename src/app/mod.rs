use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{Context, Pos2, Vec2};

use constellation::scene::ClickTarget;
use constellation::{SceneConfig, SceneController, SceneMode};

mod graph;
mod render_utils;
mod ui;

pub struct ConstellationApp {
    scene: SceneController,
    view: ViewModel,
}

struct ViewModel {
    graph_camera: Camera,
    orbit_camera: Camera,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    show_labels: bool,
    show_orbit_rings: bool,
    animate_pulse: bool,
    last_update_changed: bool,
    scratch: ViewScratch,
}

/// Orbit-style camera looking at the origin from `distance` along +Z before rotation.
#[derive(Clone, Debug)]
struct Camera {
    yaw: f64,
    pitch: f64,
    distance: f64,
    fov_y: f64,
    zoom: f32,
    pan: Vec2,
    rotatable: bool,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<&'static str>>,
}

/// Per-frame hit targets, rebuilt every draw and reused across frames.
#[derive(Default)]
struct ViewScratch {
    hit_targets: Vec<HitTarget>,
}

struct HitTarget {
    target: ClickTarget,
    screen: Pos2,
    radius: f32,
    depth: f64,
}

impl Camera {
    fn new(distance: f64, fov_y: f64, rotatable: bool) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            fov_y,
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotatable,
        }
    }
}

impl ViewModel {
    fn new() -> Self {
        Self {
            graph_camera: Camera::new(5.0, 75.0_f64.to_radians(), true),
            orbit_camera: Camera::new(30.0, 60.0_f64.to_radians(), false),
            search: String::new(),
            search_match_cache: None,
            show_labels: true,
            show_orbit_rings: true,
            animate_pulse: true,
            last_update_changed: false,
            scratch: ViewScratch::default(),
        }
    }
}

impl ConstellationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SceneConfig) -> Self {
        log::info!(
            "starting in {:?} mode with {} nodes",
            config.start_mode,
            config.node_count
        );
        Self {
            scene: SceneController::new(config),
            view: ViewModel::new(),
        }
    }

    fn camera_mut(&mut self) -> &mut Camera {
        match self.scene.mode() {
            SceneMode::Graph => &mut self.view.graph_camera,
            SceneMode::Orbit => &mut self.view.orbit_camera,
        }
    }
}

impl eframe::App for ConstellationApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let pending_click = self.show(ctx);

        // Input is applied in full before the frame's tick.
        if let Some(target) = pending_click {
            self.scene.click(&target);
        }

        let dt = ctx.input(|input| input.stable_dt).clamp(0.0, 0.1) as f64;
        self.view.last_update_changed = self.scene.update(dt);

        if self.view.last_update_changed
            || self.view.animate_pulse
            || self.scene.mode() == SceneMode::Orbit
        {
            ctx.request_repaint();
        }
    }
}
