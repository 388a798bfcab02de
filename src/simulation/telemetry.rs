//! Per-frame telemetry: speed readouts and the velocity-vector overlay
//!
//! Everything here reads `&System` only. Presentation goes through the
//! [`DrawSurface`] and [`ReadoutSink`] traits so hosts stay thin.

use crate::error::{Error, Result};
use crate::simulation::states::{Body, BodyId, System, NVec2};

/// Digits past the point an f64 speed can still carry
pub const MAX_DECIMALS: u32 = 15;

/// Round half away from zero at `decimals` places, at most [`MAX_DECIMALS`]
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    // f64::round already rounds half away from zero
    (value * factor).round() / factor
}

/// Display speed for one tracked body
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    pub body: BodyId,
    pub name: String,
    pub speed: f64,
}

impl TelemetrySample {
    /// Text shown in the readout
    pub fn label(&self, decimals: u32) -> String {
        format!("{}: {:.*}", self.name, decimals.min(MAX_DECIMALS) as usize, self.speed)
    }
}

/// Line segment in display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: NVec2,
    pub to: NVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: [f32; 3],
    pub width: f32,
}

/// Minimal 2D path API a host drawing context provides
pub trait DrawSurface {
    fn move_to(&mut self, p: NVec2);
    fn line_to(&mut self, p: NVec2);
    fn stroke(&mut self, style: StrokeStyle);
}

/// Host display targets for speed readouts
pub trait ReadoutSink {
    /// Write `text` to the element for `sample.body`. Must fail with
    /// [`Error::MissingElement`] when no such element exists.
    fn write(&mut self, sample: &TelemetrySample, text: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct TelemetryOverlay {
    pub unit_scale: f64, // raw speed -> display units
    pub decimals: u32,
    pub vector_scale: f64, // visual exaggeration of the velocity vector
    pub stroke: StrokeStyle,
}

impl Default for TelemetryOverlay {
    fn default() -> Self {
        Self {
            unit_scale: 1000.0,
            decimals: 0,
            vector_scale: 200.0,
            stroke: StrokeStyle {
                color: [1.0, 0.0, 0.0],
                width: 2.0,
            },
        }
    }
}

impl TelemetryOverlay {
    pub fn display_speed(&self, raw_speed: f64) -> f64 {
        round_half_away(raw_speed * self.unit_scale, self.decimals)
    }

    pub fn sample(&self, body: &Body) -> TelemetrySample {
        TelemetrySample {
            body: body.id,
            name: body.name.clone(),
            speed: self.display_speed(body.speed()),
        }
    }

    /// One sample per tracked body, ascending id
    pub fn samples(&self, sys: &System) -> Vec<TelemetrySample> {
        sys.bodies
            .iter()
            .filter(|b| b.tracked)
            .map(|b| self.sample(b))
            .collect()
    }

    pub fn velocity_segment(&self, body: &Body) -> Segment {
        Segment {
            from: body.x,
            to: body.x + body.v * self.vector_scale,
        }
    }

    /// Stroke the controllable body's velocity vector. The host clears the
    /// surface every frame, so nothing from earlier frames remains.
    pub fn draw<S: DrawSurface + ?Sized>(&self, sys: &System, surface: &mut S) {
        let Some(body) = sys.controllable() else {
            return;
        };
        let seg = self.velocity_segment(body);
        surface.move_to(seg.from);
        surface.line_to(seg.to);
        surface.stroke(self.stroke);
    }

    /// Push every sample to its display target, failing on the first
    /// tracked body the host has no element for
    pub fn publish<R: ReadoutSink + ?Sized>(&self, sys: &System, sink: &mut R) -> Result<()> {
        for sample in self.samples(sys) {
            sink.write(&sample, &sample.label(self.decimals))?;
        }
        Ok(())
    }

    /// Check up front that `has_target` covers every tracked body
    pub fn check_targets<F>(&self, sys: &System, has_target: F) -> Result<()>
    where
        F: Fn(BodyId) -> bool,
    {
        match sys.bodies.iter().find(|b| b.tracked && !has_target(b.id)) {
            Some(b) => Err(Error::MissingElement(b.name.clone())),
            None => Ok(()),
        }
    }
}
