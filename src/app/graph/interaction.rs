use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::{Camera, HitTarget};

const ROTATE_RADIANS_PER_PIXEL: f64 = 0.008;
const PITCH_LIMIT: f64 = 1.45;

pub(in crate::app) fn handle_camera_zoom(
    camera: &mut Camera,
    ui: &Ui,
    rect: Rect,
    response: &egui::Response,
) {
    if !response.hovered() {
        return;
    }

    let scroll = ui.input(|input| input.raw_scroll_delta.y);
    if scroll.abs() <= f32::EPSILON {
        return;
    }

    let pointer = ui
        .input(|input| input.pointer.hover_pos())
        .unwrap_or_else(|| rect.center());
    let anchor = pointer - rect.center() - camera.pan;

    let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
    let next_zoom = (camera.zoom * zoom_factor).clamp(0.2, 8.0);
    // Keep the point under the cursor fixed while zooming.
    camera.pan -= anchor * (next_zoom / camera.zoom - 1.0);
    camera.zoom = next_zoom;
}

/// Primary drag rotates (when allowed), secondary or middle drag pans.
pub(in crate::app) fn handle_camera_drag(camera: &mut Camera, response: &egui::Response) {
    if response.dragged_by(egui::PointerButton::Secondary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        camera.pan += response.drag_delta();
        return;
    }

    if camera.rotatable && response.dragged_by(egui::PointerButton::Primary) {
        let delta = response.drag_delta();
        camera.yaw += delta.x as f64 * ROTATE_RADIANS_PER_PIXEL;
        camera.pitch = (camera.pitch + delta.y as f64 * ROTATE_RADIANS_PER_PIXEL)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// Target under the pointer. Among overlapping targets the one nearest the camera
/// wins, then the one whose center is closest to the pointer.
pub(in crate::app) fn hovered_index(
    targets: &[HitTarget],
    pointer: Option<Pos2>,
) -> Option<usize> {
    let pointer = pointer?;
    targets
        .iter()
        .enumerate()
        .filter_map(|(index, target)| {
            let distance = target.screen.distance(pointer);
            if distance <= target.radius.max(6.0) {
                Some((index, target.depth, distance))
            } else {
                None
            }
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.total_cmp(&b.2)))
        .map(|(index, _, _)| index)
}
