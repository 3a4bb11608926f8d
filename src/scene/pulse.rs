//! Time-driven cosmetic oscillations, kept pure so the renderer holds no state.

/// Scale factor of the pulsing center node.
pub fn center_scale(elapsed: f64) -> f64 {
    1.0 + (elapsed * 2.0).sin() * 0.1
}

/// Opacity of the glow around sphere nodes.
pub fn aura_opacity(elapsed: f64) -> f64 {
    0.15 + 0.1 * (elapsed * 1.5).sin()
}
