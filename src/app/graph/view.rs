use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, Painter, Rect, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use constellation::SceneMode;
use constellation::scene::catalog::{CENTER, node_names};
use constellation::scene::pulse::{aura_opacity, center_scale};
use constellation::scene::{ClickTarget, SceneController};

use super::super::render_utils::{
    blend_color, circle_visible, dim_color, draw_background, draw_label, ring_points, thin_stroke,
    with_alpha, world_to_screen,
};
use super::super::{Camera, ConstellationApp, HitTarget, SearchMatchCache, ViewModel};
use super::interaction::{handle_camera_drag, handle_camera_zoom, hovered_index};

const NODE_RADIUS: f64 = 0.12;
const AURA_RADIUS: f64 = 0.25;
const CENTER_RADIUS: f64 = 0.2;
const SUN_RADIUS: f64 = 2.0;
const RING_SEGMENTS: usize = 64;

const CONNECTED_COLOR: Color32 = Color32::from_rgb(0, 255, 255);
const IDLE_COLOR: Color32 = Color32::from_rgb(0, 68, 68);
const CENTER_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
const MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);
const SUN_COLOR: Color32 = Color32::from_rgb(255, 165, 0);
const FREEZE_LINK_COLOR: Color32 = Color32::from_rgb(255, 255, 0);
const BODY_COLORS: [Color32; 4] = [
    Color32::from_rgb(40, 90, 255),
    Color32::from_rgb(230, 50, 50),
    Color32::from_rgb(40, 190, 70),
    Color32::from_rgb(150, 60, 200),
];

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn body_radius(index: usize) -> f64 {
    index as f64 * 0.3 + 0.5
}

fn draw_segment(
    painter: &Painter,
    rect: Rect,
    camera: &Camera,
    start: glam::DVec3,
    end: glam::DVec3,
    stroke: Stroke,
) {
    if let (Some(from), Some(to)) = (
        world_to_screen(rect, camera, start),
        world_to_screen(rect, camera, end),
    ) {
        painter.line_segment([from.screen, to.screen], stroke);
    }
}

impl ViewModel {
    fn graph_search_matches(&mut self, node_count: usize) -> Option<Arc<HashSet<&'static str>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = node_names(node_count)
            .iter()
            .copied()
            .chain(std::iter::once(CENTER))
            .filter(|name| fuzzy_match_score(&matcher, name, query).is_some())
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }
}

impl ConstellationApp {
    pub(in crate::app) fn cached_search_matches(&mut self) -> Option<Arc<HashSet<&'static str>>> {
        let node_count = self.scene.config().node_count;
        self.view.graph_search_matches(node_count)
    }

    /// Paints the active scene and returns the click target hit this frame.
    pub(in crate::app) fn draw_scene(&mut self, ui: &mut Ui) -> Option<ClickTarget> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let mode = self.scene.mode();
        let matches = match mode {
            SceneMode::Graph => self.cached_search_matches(),
            SceneMode::Orbit => None,
        };

        let view = &mut self.view;
        let camera = match mode {
            SceneMode::Graph => &mut view.graph_camera,
            SceneMode::Orbit => &mut view.orbit_camera,
        };
        handle_camera_zoom(camera, ui, rect, &response);
        handle_camera_drag(camera, &response);
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        draw_background(&painter, rect, camera);

        let targets = &mut view.scratch.hit_targets;
        targets.clear();
        match mode {
            SceneMode::Graph => draw_graph(
                &painter,
                rect,
                camera,
                &self.scene,
                matches.as_deref(),
                view.show_labels,
                view.animate_pulse,
                targets,
            ),
            SceneMode::Orbit => draw_orbits(
                &painter,
                rect,
                camera,
                &self.scene,
                view.show_orbit_rings,
                targets,
            ),
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = hovered_index(targets, pointer);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            hovered.map(|index| targets[index].target.clone())
        } else {
            None
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_graph(
    painter: &Painter,
    rect: Rect,
    camera: &Camera,
    scene: &SceneController,
    matches: Option<&HashSet<&'static str>>,
    show_labels: bool,
    animate_pulse: bool,
    targets: &mut Vec<HitTarget>,
) {
    let elapsed = if animate_pulse { scene.elapsed() } else { 0.0 };
    let edge_stroke = Stroke::new(2.0, Color32::WHITE);
    for segment in scene.edge_segments() {
        draw_segment(painter, rect, camera, segment.start, segment.end, edge_stroke);
    }

    let mut projected = scene
        .nodes()
        .into_iter()
        .filter_map(|node| world_to_screen(rect, camera, node.position).map(|p| (node, p)))
        .collect::<Vec<_>>();
    // Far to near so closer nodes paint over further ones.
    projected.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

    let search_active = matches.is_some_and(|set| !set.is_empty());
    for (node, point) in projected {
        let is_match = matches.is_some_and(|set| set.contains(node.name));

        let (radius, color) = if node.is_center {
            (
                (CENTER_RADIUS * center_scale(elapsed)) as f32 * point.scale,
                CENTER_COLOR,
            )
        } else {
            let base = if node.connected {
                CONNECTED_COLOR
            } else {
                IDLE_COLOR
            };
            (NODE_RADIUS as f32 * point.scale, base)
        };
        if !circle_visible(rect, point.screen, radius * 2.5) {
            continue;
        }

        let color = if is_match {
            blend_color(color, MATCH_COLOR, 0.68)
        } else if search_active {
            dim_color(color, 0.38)
        } else {
            color
        };

        if !node.is_center {
            let aura_alpha = if animate_pulse {
                aura_opacity(elapsed) as f32
            } else {
                0.15
            };
            let aura_color = if node.connected {
                CONNECTED_COLOR
            } else {
                Color32::from_rgb(0, 34, 34)
            };
            painter.circle_filled(
                point.screen,
                AURA_RADIUS as f32 * point.scale,
                with_alpha(aura_color, aura_alpha),
            );
        }
        painter.circle_filled(point.screen, radius, color);
        if is_match {
            painter.circle_stroke(point.screen, radius + 3.0, thin_stroke(MATCH_COLOR));
        }

        if show_labels {
            let (lift, size) = if node.is_center { (0.3, 12.0) } else { (0.22, 16.0) };
            draw_label(
                painter,
                point.screen,
                vec2(0.0, -(lift as f32) * point.scale),
                node.name,
                size,
            );
        }

        targets.push(HitTarget {
            target: if node.is_center {
                ClickTarget::Center
            } else {
                ClickTarget::Node(node.name.to_owned())
            },
            screen: point.screen,
            radius: radius.max(AURA_RADIUS as f32 * point.scale * 0.6),
            depth: point.depth,
        });
    }
}

fn draw_orbits(
    painter: &Painter,
    rect: Rect,
    camera: &Camera,
    scene: &SceneController,
    show_rings: bool,
    targets: &mut Vec<HitTarget>,
) {
    if show_rings {
        let ring_stroke = thin_stroke(Color32::GRAY);
        for &distance in &scene.config().orbital_distances {
            let points = ring_points(distance, RING_SEGMENTS)
                .into_iter()
                .filter_map(|point| world_to_screen(rect, camera, point).map(|p| p.screen))
                .collect::<Vec<_>>();
            painter.add(egui::Shape::line(points, ring_stroke));
        }
    }

    if let Some(sun) = world_to_screen(rect, camera, glam::DVec3::ZERO) {
        let radius = SUN_RADIUS as f32 * sun.scale;
        painter.circle_filled(sun.screen, radius, SUN_COLOR);
        painter.circle_stroke(
            sun.screen,
            radius * 1.08,
            Stroke::new(2.0, with_alpha(SUN_COLOR, 0.35)),
        );
        let (sin, cos) = (scene.sun_spin() as f32).sin_cos();
        painter.line_segment(
            [
                sun.screen - vec2(cos * radius, sin * radius * 0.35),
                sun.screen + vec2(cos * radius, sin * radius * 0.35),
            ],
            Stroke::new(2.0, blend_color(SUN_COLOR, Color32::WHITE, 0.4)),
        );
        targets.push(HitTarget {
            target: ClickTarget::Center,
            screen: sun.screen,
            radius,
            depth: sun.depth,
        });
    }

    if let Some(link) = scene.freeze_link() {
        draw_segment(
            painter,
            rect,
            camera,
            link.start,
            link.end,
            Stroke::new(2.0, FREEZE_LINK_COLOR),
        );
    }

    for body in scene.bodies() {
        let Some(point) = world_to_screen(rect, camera, body.position) else {
            continue;
        };
        let radius = body_radius(body.index) as f32 * point.scale;
        if !circle_visible(rect, point.screen, radius) {
            continue;
        }

        let color = BODY_COLORS[body.index % BODY_COLORS.len()];
        painter.circle_filled(point.screen, radius, color);

        // Spin marker: a meridian tick rotating with the body.
        let (sin, cos) = (body.spin as f32).sin_cos();
        painter.line_segment(
            [
                point.screen,
                point.screen + vec2(cos * radius, sin * radius * 0.35),
            ],
            Stroke::new(1.5, blend_color(color, Color32::WHITE, 0.5)),
        );
        if body.frozen {
            painter.circle_stroke(point.screen, radius + 3.0, thin_stroke(FREEZE_LINK_COLOR));
        }

        targets.push(HitTarget {
            target: ClickTarget::Body(body.index),
            screen: point.screen,
            radius,
            depth: point.depth,
        });
    }
}
