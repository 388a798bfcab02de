//! Core state types for the orbit sandbox.
//!
//! Defines the 2D `Body` / `System` pair using `NVec2`. Positions are display
//! coordinates (origin top-left, +y down) and velocities are display units per
//! step. Each system holds the bodies, sorted by id, and the current time `t`.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Dense identifier, assigned in configuration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub usize);

/// Collision/render extent of a body. Only used for drawing and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    /// Radius of the smallest circle containing the shape
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rectangle { width, height } => 0.5 * width.hypot(height),
        }
    }
}

/// Fill/stroke/texture styling, passed through to the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub fill: [f32; 3],
    pub stroke: Option<[f32; 3]>,
    pub texture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub x: NVec2, // position
    pub v: NVec2, // velocity, per step
    pub f: NVec2, // force accumulated for the current step
    pub m: f64, // mass
    pub drag: f64, // linear drag coefficient
    pub shape: Shape,
    pub anchor: bool, // immovable, exerts but never receives force
    pub wrap: bool, // wraps around the world bounds
    pub controllable: bool,
    pub tracked: bool, // has a telemetry readout
    pub appearance: Appearance,
}

impl Body {
    /// Add a force at the body's center. Anchors ignore it.
    pub fn apply_force(&mut self, force: NVec2) {
        if !self.anchor {
            self.f += force;
        }
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // sorted by id
    pub t: f64, // elapsed time, ms
    pub steps: u64,
}

impl System {
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0).filter(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0).filter(|b| b.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// The body thrust commands are applied to, if any
    pub fn controllable(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.controllable)
    }

    /// Reset every force accumulator; runs at the start of each step
    pub fn clear_forces(&mut self) {
        for b in self.bodies.iter_mut() {
            b.f = NVec2::zeros();
        }
    }
}
