use std::f64::consts::TAU;

use glam::DVec3;

/// Spreads `count` points over a sphere of `radius` using the golden-angle lattice.
///
/// The sequence is index-stable: the same `(count, radius)` always yields the same
/// points in the same order.
pub fn fibonacci_sphere(count: usize, radius: f64) -> Vec<DVec3> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let total = count as f64;

    (0..count)
        .map(|index| {
            let i = index as f64;
            let theta = (TAU * i) / golden_ratio;
            let psi = (1.0 - (2.0 * (i + 0.5)) / total).clamp(-1.0, 1.0).acos();

            DVec3::new(
                radius * psi.sin() * theta.cos(),
                radius * psi.sin() * theta.sin(),
                radius * psi.cos(),
            )
        })
        .collect()
}

/// Memoized sphere layout. Points are only recomputed when count or radius change.
#[derive(Default)]
pub struct SphereLayout {
    key: Option<(usize, u64)>,
    points: Vec<DVec3>,
    computations: usize,
}

impl SphereLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&mut self, count: usize, radius: f64) -> &[DVec3] {
        let key = (count, radius.to_bits());
        if self.key != Some(key) {
            self.points = fibonacci_sphere(count, radius);
            self.key = Some(key);
            self.computations += 1;
            log::debug!("sphere layout recomputed: {count} points at radius {radius}");
        }
        &self.points
    }

    pub fn computations(&self) -> usize {
        self.computations
    }
}
