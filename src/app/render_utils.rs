use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2, vec2};
use glam::DVec3;

use super::Camera;

/// Nearest view depth still drawn; anything closer sits behind the camera.
const NEAR_PLANE: f64 = 0.05;

#[derive(Clone, Copy, Debug)]
pub(super) struct Projected {
    pub(super) screen: Pos2,
    /// Distance in front of the camera; larger is further away.
    pub(super) depth: f64,
    /// Screen pixels per world unit at this depth.
    pub(super) scale: f32,
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Fills the canvas and scatters a fixed star field that drifts with the camera yaw.
pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: &Camera) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(6, 9, 16));

    const STAR_COUNT: u32 = 220;
    let drift = (camera.yaw as f32) * 40.0;
    for index in 0..STAR_COUNT {
        // Cheap integer hash, stable across frames.
        let hash = index.wrapping_mul(2_654_435_761).rotate_left(13) ^ 0x9e37_79b9;
        let x = (hash & 0xffff) as f32 / 65_535.0;
        let y = ((hash >> 16) & 0xffff) as f32 / 65_535.0;
        let position = Pos2::new(
            rect.left() + (x * rect.width() + drift).rem_euclid(rect.width()),
            rect.top() + y * rect.height(),
        );
        let brightness = 90 + (hash % 120) as u8;
        painter.circle_filled(
            position,
            if hash % 7 == 0 { 1.3 } else { 0.7 },
            Color32::from_gray(brightness),
        );
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Rotates `world` into view space (yaw about Y, then pitch about X) and applies a
/// perspective divide for a camera sitting at `camera.distance` on the +Z axis.
pub(super) fn world_to_screen(rect: Rect, camera: &Camera, world: DVec3) -> Option<Projected> {
    let (sin_yaw, cos_yaw) = camera.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = camera.pitch.sin_cos();

    let x = world.x * cos_yaw + world.z * sin_yaw;
    let z = -world.x * sin_yaw + world.z * cos_yaw;
    let y = world.y * cos_pitch - z * sin_pitch;
    let z = world.y * sin_pitch + z * cos_pitch;

    let depth = camera.distance - z;
    if depth <= NEAR_PLANE {
        return None;
    }

    let focal = (rect.height() as f64 * 0.5) / (camera.fov_y * 0.5).tan();
    let scale = (focal / depth) * camera.zoom as f64;
    let offset = vec2((x * scale) as f32, (-y * scale) as f32);

    Some(Projected {
        screen: rect.center() + camera.pan + offset,
        depth,
        scale: scale as f32,
    })
}

/// Closed polyline approximating a circle of `radius` in the XY plane.
pub(super) fn ring_points(radius: f64, segments: usize) -> Vec<DVec3> {
    (0..=segments)
        .map(|index| {
            let angle = (index as f64 / segments as f64) * std::f64::consts::TAU;
            DVec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
        })
        .collect()
}

pub(super) fn draw_label(painter: &Painter, anchor: Pos2, offset: Vec2, text: &str, size: f32) {
    painter.text(
        anchor + offset,
        Align2::CENTER_BOTTOM,
        text,
        FontId::proportional(size),
        Color32::from_gray(240),
    );
}

pub(super) fn thin_stroke(color: Color32) -> Stroke {
    Stroke::new(1.0, color)
}
