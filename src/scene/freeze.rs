use glam::DVec3;

use super::edges::EdgeSegment;
use super::orbit::OrbitSimulator;

/// Index of the body closest to the origin in the orbital plane. The z component is
/// ignored. Ties resolve to the lowest index.
pub fn nearest_body(positions: &[DVec3]) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| (index, position.truncate().length()))
        .fold(None, |best: Option<(usize, f64)>, (index, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        })
        .map(|(index, _)| index)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FreezeState {
    #[default]
    Idle,
    Frozen(usize),
}

/// One global freeze/resume cycle: at most one body is held still at a time.
#[derive(Debug, Default)]
pub struct FreezeToggle {
    state: FreezeState,
    link: Option<EdgeSegment>,
}

impl FreezeToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FreezeState {
        self.state
    }

    /// Connecting line from the origin to the frozen body, if any.
    pub fn link(&self) -> Option<EdgeSegment> {
        self.link
    }

    /// Freezes the nearest body when idle, or resumes the frozen one. Ignored
    /// while any body position is still unknown. Returns whether the state changed.
    pub fn trigger(&mut self, orbits: &mut OrbitSimulator) -> bool {
        match self.state {
            FreezeState::Idle => {
                let Some(positions) = orbits.known_positions() else {
                    log::trace!("freeze ignored: body positions not known yet");
                    return false;
                };
                let Some(index) = nearest_body(&positions) else {
                    return false;
                };
                if !orbits.freeze(index) {
                    return false;
                }

                self.link = Some(EdgeSegment {
                    start: DVec3::ZERO,
                    end: positions[index],
                });
                self.state = FreezeState::Frozen(index);
                true
            }
            FreezeState::Frozen(index) => {
                orbits.resume(index);
                self.link = None;
                self.state = FreezeState::Idle;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> OrbitSimulator {
        OrbitSimulator::new(&[5.0, 8.0, 12.0, 16.0], &[0.5, 0.3, 0.2, 0.15], 0.0)
    }

    #[test]
    fn test_nearest_of_default_orbits_is_first() {
        let positions = [5.0, 8.0, 12.0, 16.0]
            .map(|distance| DVec3::new(0.0, distance, 0.0))
            .to_vec();
        assert_eq!(nearest_body(&positions), Some(0));
    }

    #[test]
    fn test_nearest_ignores_z_and_breaks_ties_low() {
        let positions = vec![
            DVec3::new(3.0, 4.0, 0.0),
            DVec3::new(1.0, 0.0, 50.0),
            DVec3::new(0.0, 1.0, -50.0),
        ];
        assert_eq!(nearest_body(&positions), Some(1));
        assert_eq!(nearest_body(&[DVec3::X, DVec3::Y]), Some(0));
        assert_eq!(nearest_body(&[]), None);
    }

    #[test]
    fn test_trigger_before_positions_known_is_noop() {
        let mut orbits = simulator();
        let mut toggle = FreezeToggle::new();

        assert!(!toggle.trigger(&mut orbits));
        assert_eq!(toggle.state(), FreezeState::Idle);
        assert!(toggle.link().is_none());
    }

    #[test]
    fn test_freeze_then_resume_same_body() {
        let mut orbits = simulator();
        let mut toggle = FreezeToggle::new();
        orbits.advance(1.0);

        assert!(toggle.trigger(&mut orbits));
        assert_eq!(toggle.state(), FreezeState::Frozen(0));
        let link = toggle.link().unwrap();
        assert_eq!(link.start, DVec3::ZERO);
        assert_eq!(Some(link.end), orbits.body(0).unwrap().position());
        assert!(orbits.body(0).unwrap().is_frozen());

        assert!(toggle.trigger(&mut orbits));
        assert_eq!(toggle.state(), FreezeState::Idle);
        assert!(toggle.link().is_none());
        assert!(!orbits.body(0).unwrap().is_frozen());
    }

    #[test]
    fn test_second_trigger_resumes_instead_of_freezing_again() {
        // Body 1 has the smaller orbit, so it is the one frozen.
        let mut orbits = OrbitSimulator::new(&[5.0, 3.0], &[1.0, 1.0], 0.0);
        let mut toggle = FreezeToggle::new();
        orbits.advance(0.5);

        toggle.trigger(&mut orbits);
        assert_eq!(toggle.state(), FreezeState::Frozen(1));

        orbits.advance(3.0);
        assert!(orbits.body(1).unwrap().is_frozen());
        assert!(!orbits.body(0).unwrap().is_frozen());

        toggle.trigger(&mut orbits);
        assert_eq!(toggle.state(), FreezeState::Idle);
        assert!(orbits.bodies().iter().all(|body| !body.is_frozen()));

        // Body 1 sat out the 3s pause; body 0 never stopped.
        let clock = orbits.elapsed();
        let body_0 = orbits.body(0).unwrap();
        let body_1 = orbits.body(1).unwrap();
        assert!((body_0.effective_time(clock) - 3.5).abs() < 1e-9);
        assert!((body_1.effective_time(clock) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_resume_targets_frozen_body_not_the_nearest() {
        let mut orbits = simulator();
        orbits.advance(1.0);
        assert_eq!(nearest_body(&orbits.known_positions().unwrap()), Some(0));

        orbits.freeze(2);
        let mut toggle = FreezeToggle {
            state: FreezeState::Frozen(2),
            link: None,
        };
        orbits.advance(2.0);

        assert!(toggle.trigger(&mut orbits));
        assert_eq!(toggle.state(), FreezeState::Idle);
        assert!(!orbits.body(2).unwrap().is_frozen());
        assert!(!orbits.body(0).unwrap().is_frozen());
        let clock = orbits.elapsed();
        assert!((orbits.body(2).unwrap().effective_time(clock) - 1.0).abs() < 1e-9);
    }
}
