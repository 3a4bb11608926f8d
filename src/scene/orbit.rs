use std::f64::consts::TAU;

use glam::DVec3;

/// Per-tick rotation of the central sun, in radians. Freezing never stops it.
pub const SUN_SPIN_PER_TICK: f64 = 0.005;

/// A body on a circular orbit in the XY plane around the origin.
#[derive(Clone, Debug)]
pub struct OrbitBody {
    distance: f64,
    angular_speed: f64,
    spin: f64,
    frozen_at: Option<f64>,
    paused_total: f64,
    position: Option<DVec3>,
}

impl OrbitBody {
    pub fn new(distance: f64, angular_speed: f64) -> Self {
        Self {
            distance,
            angular_speed,
            spin: 0.0,
            frozen_at: None,
            paused_total: 0.0,
            position: None,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    pub fn spin(&self) -> f64 {
        self.spin
    }

    /// Last computed position, `None` until the first tick.
    pub fn position(&self) -> Option<DVec3> {
        self.position
    }

    /// Orbit time seen by this body. Pinned while frozen, and shifted back by every
    /// completed pause so motion resumes exactly where it stopped.
    pub fn effective_time(&self, clock: f64) -> f64 {
        self.frozen_at.unwrap_or(clock) - self.paused_total
    }

    pub fn position_at(&self, clock: f64) -> DVec3 {
        let angle = self.angular_speed * self.effective_time(clock);
        DVec3::new(
            self.distance * angle.cos(),
            self.distance * angle.sin(),
            0.0,
        )
    }

    fn freeze(&mut self, clock: f64) -> bool {
        if self.frozen_at.is_some() {
            return false;
        }
        self.frozen_at = Some(clock);
        self.position = Some(self.position_at(clock));
        true
    }

    fn resume(&mut self, clock: f64) -> bool {
        let Some(frozen_at) = self.frozen_at.take() else {
            return false;
        };
        // A clock that went backwards during the pause contributes nothing.
        self.paused_total += (clock - frozen_at).max(0.0);
        true
    }
}

/// Drives every orbiting body from a single scene clock.
#[derive(Clone, Debug)]
pub struct OrbitSimulator {
    bodies: Vec<OrbitBody>,
    clock: f64,
    spin_speed: f64,
    sun_spin: f64,
}

impl OrbitSimulator {
    pub fn new(distances: &[f64], speeds: &[f64], spin_speed: f64) -> Self {
        let bodies = distances
            .iter()
            .zip(speeds)
            .map(|(&distance, &speed)| OrbitBody::new(distance, speed))
            .collect();

        Self {
            bodies,
            clock: 0.0,
            spin_speed,
            sun_spin: 0.0,
        }
    }

    pub fn bodies(&self) -> &[OrbitBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&OrbitBody> {
        self.bodies.get(index)
    }

    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    pub fn sun_spin(&self) -> f64 {
        self.sun_spin
    }

    /// Current positions, or `None` if any body has not been placed yet.
    pub fn known_positions(&self) -> Option<Vec<DVec3>> {
        self.bodies.iter().map(OrbitBody::position).collect()
    }

    /// Moves the clock forward by `dt` seconds and recomputes every body.
    /// Frozen bodies are recomputed too, always landing on their pinned position.
    /// Returns whether any body moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.clock += dt.max(0.0);
        self.sun_spin = (self.sun_spin + SUN_SPIN_PER_TICK) % TAU;

        let mut moved = false;
        for body in &mut self.bodies {
            let next = body.position_at(self.clock);
            if body.position != Some(next) {
                moved = true;
            }
            body.position = Some(next);

            if !body.is_frozen() {
                body.spin = (body.spin + self.spin_speed) % TAU;
            }
        }
        moved
    }

    pub fn freeze(&mut self, index: usize) -> bool {
        let clock = self.clock;
        let frozen = self
            .bodies
            .get_mut(index)
            .is_some_and(|body| body.freeze(clock));
        if frozen {
            log::debug!("body {index} frozen at t={clock:.3}");
        }
        frozen
    }

    pub fn resume(&mut self, index: usize) -> bool {
        let clock = self.clock;
        let resumed = self
            .bodies
            .get_mut(index)
            .is_some_and(|body| body.resume(clock));
        if resumed {
            log::debug!("body {index} resumed at t={clock:.3}");
        }
        resumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn simulator() -> OrbitSimulator {
        OrbitSimulator::new(&[5.0, 8.0, 12.0, 16.0], &[0.5, 0.3, 0.2, 0.15], 0.01)
    }

    fn assert_close(a: DVec3, b: DVec3) {
        assert!(a.distance(b) < EPSILON, "{a:?} != {b:?}");
    }

    #[test]
    fn test_positions_unknown_until_first_tick() {
        let mut sim = simulator();
        assert!(sim.known_positions().is_none());

        sim.advance(0.0);
        let positions = sim.known_positions().unwrap();
        assert_close(positions[0], DVec3::new(5.0, 0.0, 0.0));
        assert_close(positions[3], DVec3::new(16.0, 0.0, 0.0));
    }

    #[test]
    fn test_position_follows_circular_orbit() {
        let mut sim = simulator();
        sim.advance(2.0);

        let body = sim.body(1).unwrap();
        let angle: f64 = 0.3 * 2.0;
        assert_close(
            body.position().unwrap(),
            DVec3::new(8.0 * angle.cos(), 8.0 * angle.sin(), 0.0),
        );
    }

    #[test]
    fn test_frozen_body_stays_put() {
        let mut sim = simulator();
        sim.advance(1.5);
        let before = sim.body(0).unwrap().position().unwrap();

        assert!(sim.freeze(0));
        for _ in 0..10 {
            sim.advance(0.25);
        }

        assert_close(sim.body(0).unwrap().position().unwrap(), before);
        assert!(sim.body(1).unwrap().position() != Some(DVec3::new(8.0, 0.0, 0.0)));
    }

    #[test]
    fn test_resume_is_continuous_and_keeps_speed() {
        let mut sim = simulator();
        sim.advance(3.0);
        let before_freeze = sim.body(2).unwrap().position().unwrap();

        sim.freeze(2);
        sim.advance(7.0);
        sim.resume(2);
        sim.advance(0.0);
        assert_close(sim.body(2).unwrap().position().unwrap(), before_freeze);

        sim.advance(1.0);
        let angle: f64 = 0.2 * 4.0;
        assert_close(
            sim.body(2).unwrap().position().unwrap(),
            DVec3::new(12.0 * angle.cos(), 12.0 * angle.sin(), 0.0),
        );
    }

    #[test]
    fn test_repeated_pause_cycles_accumulate() {
        let mut sim = simulator();
        sim.advance(1.0);
        sim.freeze(0);
        sim.advance(2.0);
        sim.resume(0);
        sim.advance(1.0);
        sim.freeze(0);
        sim.advance(5.0);
        sim.resume(0);
        sim.advance(0.0);

        let body = sim.body(0).unwrap();
        assert!((body.effective_time(sim.elapsed()) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_uneven_freeze_cycles_resume_where_they_stopped() {
        let mut sim = simulator();
        let steps = [0.013, 0.7, 0.0021, 1.9, 0.33];
        sim.advance(0.41);

        for (cycle, &dt) in steps.iter().enumerate() {
            let index = cycle % sim.bodies().len();
            let before = sim.body(index).unwrap().position().unwrap();

            assert!(sim.freeze(index));
            sim.advance(dt);
            sim.advance(dt * 3.7);
            assert!(sim.resume(index));
            sim.advance(0.0);

            assert_close(sim.body(index).unwrap().position().unwrap(), before);
            sim.advance(dt * 0.5);
        }
    }

    #[test]
    fn test_sun_keeps_spinning_while_bodies_are_frozen() {
        let mut sim = simulator();
        assert_eq!(sim.sun_spin(), 0.0);

        sim.advance(0.1);
        sim.freeze(0);
        sim.advance(0.1);
        sim.advance(0.0);

        assert!((sim.sun_spin() - 3.0 * SUN_SPIN_PER_TICK).abs() < EPSILON);
        for _ in 0..2000 {
            sim.advance(0.016);
        }
        assert!((0.0..TAU).contains(&sim.sun_spin()));
    }

    #[test]
    fn test_double_freeze_and_stray_resume_are_ignored() {
        let mut sim = simulator();
        sim.advance(1.0);

        assert!(!sim.resume(0));
        assert!(sim.freeze(0));
        assert!(!sim.freeze(0));
        assert!(!sim.freeze(9));
    }

    #[test]
    fn test_resume_with_rewound_clock_adds_no_pause() {
        let mut body = OrbitBody::new(1.0, 1.0);
        body.freeze(4.0);
        body.resume(2.0);

        assert!((body.effective_time(5.0) - 5.0).abs() < EPSILON);
    }
}
