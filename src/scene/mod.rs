pub mod anchors;
pub mod catalog;
pub mod connections;
pub mod edges;
pub mod freeze;
pub mod layout;
pub mod orbit;
pub mod pulse;

use glam::DVec3;

use crate::config::{SceneConfig, SceneMode};
use anchors::AnchorRegistry;
use catalog::{CENTER, node_names};
use connections::{ChainState, ConnectionGraph};
use edges::{EdgeAnimator, EdgeSegment};
use freeze::{FreezeState, FreezeToggle};
use layout::SphereLayout;
use orbit::OrbitSimulator;

/// What a click landed on, as reported by the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Center,
    Node(String),
    Body(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView {
    pub name: &'static str,
    pub position: DVec3,
    pub connected: bool,
    pub is_center: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyView {
    pub index: usize,
    pub position: DVec3,
    pub distance: f64,
    pub spin: f64,
    pub frozen: bool,
}

/// Owns every piece of mutable scene state and hands it to the components by
/// reference. Clicks and ticks both go through here, one at a time.
pub struct SceneController {
    config: SceneConfig,
    mode: SceneMode,
    layout: SphereLayout,
    anchors: AnchorRegistry,
    connections: ConnectionGraph,
    animator: EdgeAnimator,
    orbits: OrbitSimulator,
    freeze: FreezeToggle,
}

impl SceneController {
    pub fn new(config: SceneConfig) -> Self {
        let mut controller = Self {
            mode: config.start_mode,
            layout: SphereLayout::new(),
            anchors: AnchorRegistry::new(),
            connections: ConnectionGraph::new(),
            animator: EdgeAnimator::new(config.edge_progress_step),
            orbits: OrbitSimulator::new(
                &config.orbital_distances,
                &config.orbital_speeds,
                config.spin_speed,
            ),
            freeze: FreezeToggle::new(),
            config,
        };
        controller.register_anchors();
        controller
    }

    fn register_anchors(&mut self) {
        let names = node_names(self.config.node_count);
        let points = self.layout.points(names.len(), self.config.sphere_radius);
        self.anchors.register_all(names, points);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SceneMode) {
        if self.mode != mode {
            log::debug!("scene mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Discards all interaction state and starts over from the config.
    pub fn reset(&mut self) {
        let mode = self.mode;
        *self = Self::new(self.config.clone());
        self.mode = mode;
        log::debug!("scene reset");
    }

    pub fn elapsed(&self) -> f64 {
        self.orbits.elapsed()
    }

    /// Rotation of the central sun in orbit mode.
    pub fn sun_spin(&self) -> f64 {
        self.orbits.sun_spin()
    }

    pub fn chain_state(&self) -> ChainState {
        self.connections.state()
    }

    pub fn freeze_state(&self) -> FreezeState {
        self.freeze.state()
    }

    /// Routes a click to the connection chain or the freeze toggle depending on the
    /// active mode. Returns whether anything changed.
    pub fn click(&mut self, target: &ClickTarget) -> bool {
        match (self.mode, target) {
            (SceneMode::Graph, ClickTarget::Center) => {
                self.connections.trigger(CENTER, &self.anchors).is_some()
            }
            (SceneMode::Graph, ClickTarget::Node(name)) => {
                self.connections.trigger(name, &self.anchors).is_some()
            }
            (SceneMode::Orbit, ClickTarget::Center) => self.freeze.trigger(&mut self.orbits),
            _ => {
                log::trace!("click on {target:?} ignored in {:?} mode", self.mode);
                false
            }
        }
    }

    /// Advances edge drawing and orbits by one frame. Returns whether any visible
    /// state changed.
    pub fn update(&mut self, dt: f64) -> bool {
        let edges_moved = self.animator.tick(self.connections.edges_mut());
        let bodies_moved = self.orbits.advance(dt);
        edges_moved || bodies_moved
    }

    /// The center node followed by every sphere node in catalog order.
    pub fn nodes(&self) -> Vec<NodeView> {
        let center = NodeView {
            name: CENTER,
            position: DVec3::ZERO,
            connected: self.connections.is_connected(CENTER),
            is_center: true,
        };

        std::iter::once(center)
            .chain(
                node_names(self.config.node_count)
                    .iter()
                    .filter_map(|&name| {
                        self.anchors.lookup(name).map(|position| NodeView {
                            name,
                            position,
                            connected: self.connections.is_connected(name),
                            is_center: false,
                        })
                    }),
            )
            .collect()
    }

    /// Every edge in creation order with its endpoint interpolated to the current
    /// draw progress, finished edges included.
    pub fn edge_segments(&self) -> Vec<EdgeSegment> {
        self.connections
            .edges()
            .iter()
            .map(|edge| edge.segment())
            .collect()
    }

    /// Bodies that have been placed at least once.
    pub fn bodies(&self) -> Vec<BodyView> {
        self.orbits
            .bodies()
            .iter()
            .enumerate()
            .filter_map(|(index, body)| {
                body.position().map(|position| BodyView {
                    index,
                    position,
                    distance: body.distance(),
                    spin: body.spin(),
                    frozen: body.is_frozen(),
                })
            })
            .collect()
    }

    pub fn freeze_link(&self) -> Option<EdgeSegment> {
        self.freeze.link()
    }
}
