//! Pointer dragging
//!
//! A grabbed body is pulled a fixed fraction of the way toward the pointer
//! each step. The attraction, thrust and telemetry code never look at this.

use super::states::{BodyId, System, NVec2};

pub const DEFAULT_STIFFNESS: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConstraint {
    pub body: BodyId,
    pub point: NVec2, // pointer position, display coordinates
    pub stiffness: f64, // fraction of the gap closed per step
}

impl DragConstraint {
    /// Grab the topmost body whose extent contains `point`
    pub fn pick(sys: &System, point: NVec2, stiffness: f64) -> Option<Self> {
        sys.bodies
            .iter()
            .rev()
            .find(|b| (b.x - point).norm() <= b.shape.bounding_radius())
            .map(|b| Self { body: b.id, point, stiffness })
    }

    /// Pull the body toward the pointer. Its velocity becomes the pull, so
    /// releasing mid-drag throws the body.
    pub fn solve(&self, sys: &mut System) {
        let Some(b) = sys.get_mut(self.body) else {
            return;
        };
        if b.anchor {
            return;
        }
        let pull = (self.point - b.x) * self.stiffness;
        b.x += pull;
        b.v = pull;
    }
}
