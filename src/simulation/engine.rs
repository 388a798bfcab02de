//! High-level runtime engine settings
//!
//! Step timing and the world bounds bodies wrap around, used when
//! building and stepping a `Scene`

use crate::simulation::states::NVec2;

/// Axis-aligned rectangle in display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: NVec2,
    pub max: NVec2,
}

impl Bounds {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: NVec2::zeros(),
            max: NVec2::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Move a point leaving one edge back in through the opposite edge
    pub fn wrap(&self, p: NVec2) -> NVec2 {
        NVec2::new(
            wrap_axis(p.x, self.min.x, self.max.x),
            wrap_axis(p.y, self.min.y, self.max.y),
        )
    }
}

fn wrap_axis(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return value;
    }
    if value < min || value > max {
        min + (value - min).rem_euclid(span)
    } else {
        value
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub delta_ms: f64, // nominal step length
    pub time_scale: f64, // 1 = real time, 0.5 = half speed
    pub bounds: Bounds, // wrap region
}

impl Engine {
    /// Effective step length after time scaling
    pub fn dt(&self) -> f64 {
        self.delta_ms * self.time_scale
    }
}
