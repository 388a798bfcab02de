//! Build fully-initialized scenes from configuration
//!
//! Takes a `SceneConfig` (YAML-facing) and produces the runtime bundle
//! (`Scene`) containing:
//! - engine settings (`Engine`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`ForceSet`)
//! - controllers: thrust, optional telemetry, optional pointer drag
//!
//! The scene is inserted into Bevy as a `Resource` and consumed by the
//! stepping and visualization systems, but builds without any window.

use std::collections::HashSet;

use bevy::log::info;
use bevy::prelude::Resource;

use crate::configuration::config::{BodyConfig, SceneConfig, ShapeConfig, TelemetryConfig};
use crate::error::{Error, Result};
use crate::simulation::constraint::DragConstraint;
use crate::simulation::engine::{Bounds, Engine};
use crate::simulation::forces::{Attraction, ForceSet};
use crate::simulation::integrator;
use crate::simulation::states::{Appearance, Body, BodyId, NVec2, Shape, System};
use crate::simulation::telemetry::{StrokeStyle, TelemetryOverlay, MAX_DECIMALS};
use crate::simulation::thrust::ThrustController;

/// Bevy resource representing a fully-initialized scene
///
/// The world (`system`) plus everything that drives it. Each step clears
/// the accumulators, drains thrust, accumulates attraction, then hands off
/// to the integrator.
#[derive(Resource)]
pub struct Scene {
    pub engine: Engine,
    pub system: System,
    pub forces: ForceSet,
    pub thrust: ThrustController,
    pub telemetry: Option<TelemetryOverlay>,
    pub drag: Option<DragConstraint>,
}

fn check_finite(owner: &str, field: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::NonFinite { owner: owner.to_string(), field })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositiveParameter(name))
    }
}

/// Reject configurations the step loop cannot run with
pub fn validate(cfg: &SceneConfig) -> Result<()> {
    check_positive("world.width", cfg.world.width)?;
    check_positive("world.height", cfg.world.height)?;

    let p = &cfg.parameters;
    check_finite("parameters", "g", &[p.g])?;
    check_finite("parameters", "thrust_magnitude", &[p.thrust_magnitude])?;
    check_positive("eps2", p.eps2)?;
    check_positive("delta_ms", p.delta_ms)?;
    check_positive("time_scale", p.time_scale)?;

    if let Some(t) = &cfg.telemetry {
        check_finite("telemetry", "unit_scale", &[t.unit_scale])?;
        check_finite("telemetry", "vector_scale", &[t.vector_scale])?;
        check_positive("stroke_width", t.stroke_width as f64)?;
        if t.decimals > MAX_DECIMALS {
            return Err(Error::OutOfRange { field: "decimals", max: MAX_DECIMALS as f64 });
        }
    }

    let mut names = HashSet::new();
    let mut controllable: Option<&str> = None;

    for bc in &cfg.bodies {
        if !names.insert(bc.name.as_str()) {
            return Err(Error::DuplicateName(bc.name.clone()));
        }
        if !(bc.m.is_finite() && bc.m > 0.0) {
            return Err(Error::NonPositiveMass { name: bc.name.clone(), mass: bc.m });
        }
        check_finite(&bc.name, "x", &bc.x)?;
        check_finite(&bc.name, "v", &bc.v)?;
        check_finite(&bc.name, "drag", &[bc.drag])?;

        if bc.controllable {
            if let Some(first) = controllable {
                return Err(Error::MultipleControllable(first.to_string(), bc.name.clone()));
            }
            controllable = Some(bc.name.as_str());
        }
    }
    Ok(())
}

fn build_body(i: usize, bc: &BodyConfig) -> Body {
    let shape = match bc.shape {
        ShapeConfig::Circle { radius } => Shape::Circle { radius },
        ShapeConfig::Rectangle { width, height } => Shape::Rectangle { width, height },
    };
    Body {
        id: BodyId(i),
        name: bc.name.clone(),
        x: NVec2::new(bc.x[0], bc.x[1]),
        v: if bc.anchor { NVec2::zeros() } else { NVec2::new(bc.v[0], bc.v[1]) },
        f: NVec2::zeros(),
        m: bc.m,
        drag: bc.drag,
        shape,
        anchor: bc.anchor,
        wrap: bc.wrap,
        controllable: bc.controllable,
        tracked: bc.tracked,
        appearance: Appearance {
            fill: bc.fill,
            stroke: bc.stroke,
            texture: bc.texture.clone(),
        },
    }
}

fn build_overlay(t: &TelemetryConfig) -> TelemetryOverlay {
    TelemetryOverlay {
        unit_scale: t.unit_scale,
        decimals: t.decimals,
        vector_scale: t.vector_scale,
        stroke: StrokeStyle {
            color: t.stroke_color,
            width: t.stroke_width,
        },
    }
}

impl Scene {
    pub fn build(cfg: SceneConfig) -> Result<Self> {
        validate(&cfg)?;

        // Bodies: map `BodyConfig` -> runtime `Body`, ids in config order
        let bodies: Vec<Body> = cfg.bodies.iter().enumerate().map(|(i, bc)| build_body(i, bc)).collect();

        let system = System {
            bodies,
            t: 0.0,
            steps: 0,
        };

        let parameters = &cfg.parameters;

        let engine = Engine {
            delta_ms: parameters.delta_ms,
            time_scale: parameters.time_scale,
            bounds: Bounds::from_size(cfg.world.width, cfg.world.height),
        };

        let forces = ForceSet::new().with(Attraction {
            g: parameters.g,
            eps2: parameters.eps2,
        });

        let thrust = ThrustController::new(parameters.thrust_magnitude);
        let telemetry = cfg.telemetry.as_ref().map(build_overlay);

        info!(
            "scene built: {} bodies, g = {}, time scale = {}, thrust = {}",
            system.bodies.len(),
            parameters.g,
            parameters.time_scale,
            parameters.thrust_magnitude
        );

        Ok(Self {
            engine,
            system,
            forces,
            thrust,
            telemetry,
            drag: None,
        })
    }

    /// Advance one step: all force contributions land in the accumulators
    /// before the integrator reads them
    pub fn step(&mut self) {
        self.system.clear_forces();
        self.thrust.drain_into(&mut self.system);
        self.forces.apply(&mut self.system);
        integrator::step(&mut self.system, &self.engine);

        if let Some(drag) = &self.drag {
            drag.solve(&mut self.system);
        }
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.system.by_name(name)
    }
}
