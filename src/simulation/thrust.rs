//! Keyboard thrust for the controllable body
//!
//! Key presses become [`ThrustCommand`]s on a queue; the queue is drained
//! into the controllable body's force accumulator once per step.

use std::collections::VecDeque;

use bevy::log::debug;

use crate::simulation::states::{System, NVec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrustDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ThrustDirection {
    /// Map a key identifier to a direction. Both the modern `Arrow*` names
    /// and the legacy short names are recognized.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(Self::Up),
            "ArrowDown" | "Down" => Some(Self::Down),
            "ArrowLeft" | "Left" => Some(Self::Left),
            "ArrowRight" | "Right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Axis-aligned unit vector in display coordinates (+y down)
    pub fn unit(&self) -> NVec2 {
        match self {
            Self::Up => NVec2::new(0.0, -1.0),
            Self::Down => NVec2::new(0.0, 1.0),
            Self::Left => NVec2::new(-1.0, 0.0),
            Self::Right => NVec2::new(1.0, 0.0),
        }
    }
}

/// One impulse request, alive from key press until the next drain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustCommand {
    pub direction: ThrustDirection,
    pub magnitude: f64,
}

impl ThrustCommand {
    pub fn force(&self) -> NVec2 {
        self.direction.unit() * self.magnitude
    }
}

#[derive(Debug, Clone)]
pub struct ThrustController {
    magnitude: f64,
    queue: VecDeque<ThrustCommand>,
}

impl ThrustController {
    pub fn new(magnitude: f64) -> Self {
        Self {
            magnitude,
            queue: VecDeque::new(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue a command for `direction`
    pub fn push(&mut self, direction: ThrustDirection) {
        self.queue.push_back(ThrustCommand {
            direction,
            magnitude: self.magnitude,
        });
    }

    /// Handle one key press. Returns `true` when the key was recognized and
    /// the event should be consumed; unrecognized keys are left alone.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match ThrustDirection::from_key(key) {
            Some(direction) => {
                self.push(direction);
                true
            }
            None => false,
        }
    }

    /// Apply and clear every queued command. Returns how many were applied.
    pub fn drain_into(&mut self, sys: &mut System) -> usize {
        if self.queue.is_empty() {
            return 0;
        }

        let Some(body) = sys.bodies.iter_mut().find(|b| b.controllable) else {
            debug!("dropping {} thrust commands: no controllable body", self.queue.len());
            self.queue.clear();
            return 0;
        };

        let mut applied = 0;
        for cmd in self.queue.drain(..) {
            body.apply_force(cmd.force());
            applied += 1;
        }
        applied
    }
}
