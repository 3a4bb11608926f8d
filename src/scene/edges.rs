use glam::DVec3;

/// Progress within this distance of 1 counts as fully drawn, absorbing the
/// rounding left over from repeated float additions.
const COMPLETION_EPSILON: f64 = 1e-9;

pub const DEFAULT_PROGRESS_STEP: f64 = 0.02;

/// A directed connector between two named anchors, drawn progressively.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    from: String,
    to: String,
    start: DVec3,
    end: DVec3,
    progress: f64,
}

/// Line segment handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    pub start: DVec3,
    pub end: DVec3,
}

impl Edge {
    pub fn new(from: &str, to: &str, start: DVec3, end: DVec3) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            start,
            end,
            progress: 0.0,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn start(&self) -> DVec3 {
        self.start
    }

    pub fn end(&self) -> DVec3 {
        self.end
    }

    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    fn advance(&mut self, step: f64) -> bool {
        if self.is_complete() {
            return false;
        }

        let next = self.progress + step;
        self.progress = if next >= 1.0 - COMPLETION_EPSILON {
            1.0
        } else {
            next
        };
        true
    }

    /// Fixed start plus the endpoint interpolated at the current progress.
    pub fn segment(&self) -> EdgeSegment {
        EdgeSegment {
            start: self.start,
            end: self.start.lerp(self.end, self.progress),
        }
    }
}

/// Advances draw progress of every in-flight edge once per frame.
#[derive(Clone, Copy, Debug)]
pub struct EdgeAnimator {
    step: f64,
}

impl Default for EdgeAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_STEP)
    }
}

impl EdgeAnimator {
    pub fn new(step: f64) -> Self {
        Self {
            step: step.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of ticks a fresh edge needs before it is fully drawn.
    pub fn ticks_to_complete(&self) -> usize {
        ((1.0 - COMPLETION_EPSILON) / self.step).ceil() as usize
    }

    /// Returns whether any edge moved. Completed edges are left untouched.
    pub fn tick(&self, edges: &mut [Edge]) -> bool {
        let mut advanced = false;
        for edge in edges.iter_mut() {
            if edge.advance(self.step) {
                advanced = true;
                if edge.is_complete() {
                    log::debug!("edge {} -> {} fully drawn", edge.from, edge.to);
                }
            }
        }
        advanced
    }
}
