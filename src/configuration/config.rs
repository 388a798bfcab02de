//! Configuration types for loading sandbox scenes from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scene. A scene consists of:
//!
//! - [`WorldConfig`]      – viewport size, also the wrap region
//! - [`ParametersConfig`] – coupling constant, step timing and thrust
//! - [`TelemetryConfig`]  – optional HUD: speed readouts and velocity vector
//! - [`BodyConfig`]       – initial state and styling of each body
//! - [`SceneConfig`]      – top-level wrapper used to load a scene from YAML
//!
//! # YAML format
//! A two-body scene matching these types:
//!
//! ```yaml
//! world:
//!   width: 1280.0
//!   height: 720.0
//!
//! parameters:
//!   g: 0.001                # coupling constant
//!   eps2: 1.0e-4            # squared-distance floor
//!   time_scale: 1.0
//!   thrust_magnitude: 1.0e-5
//!
//! bodies:
//!   - name: earth
//!     x: [640.0, 310.0]
//!     m: 1000.0
//!     drag: 1.0
//!     anchor: true
//!     shape: { circle: { radius: 50.0 } }
//!   - name: moon
//!     x: [640.0, 160.0]
//!     v: [1.4, 0.0]
//!     m: 1.0
//!     shape: { circle: { radius: 10.0 } }
//!     texture: image/moon.png
//! ```
//!
//! Omitted fields take the defaults of the attractor plugin the demo was
//! tuned against. `Scene::build` validates the result.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::Result;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
}

/// Global physical and timing parameters
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub g: f64, // coupling constant
    pub eps2: f64, // floor for |r|^2
    pub delta_ms: f64, // nominal step length
    pub time_scale: f64, // 1.0 real time, 0.5 half speed
    pub thrust_magnitude: f64, // force per key press
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: 0.001,
            eps2: 1.0e-4,
            delta_ms: 1000.0 / 60.0,
            time_scale: 1.0,
            thrust_magnitude: 1.0e-5,
        }
    }
}

/// HUD settings. Present only in scenes that show telemetry
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TelemetryConfig {
    pub unit_scale: f64, // raw speed -> display units
    pub decimals: u32, // readout precision
    pub vector_scale: f64, // velocity vector exaggeration
    pub stroke_color: [f32; 3],
    pub stroke_width: f32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            unit_scale: 1000.0,
            decimals: 0,
            vector_scale: 10.0 * 20.0,
            stroke_color: [1.0, 0.0, 0.0],
            stroke_width: 2.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ShapeConfig {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

fn default_fill() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_true() -> bool {
    true
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub x: [f64; 2], // initial position, display coordinates
    #[serde(default)]
    pub v: [f64; 2], // initial velocity, per step
    pub m: f64, // mass, must be > 0
    #[serde(default)]
    pub drag: f64, // linear drag coefficient
    // `circle: { radius: .. }` rather than a `!circle` tag
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub shape: ShapeConfig,
    #[serde(default)]
    pub anchor: bool, // immovable attractor
    #[serde(default = "default_true")]
    pub wrap: bool,
    #[serde(default)]
    pub controllable: bool, // receives thrust
    #[serde(default)]
    pub tracked: bool, // gets a speed readout
    #[serde(default = "default_fill")]
    pub fill: [f32; 3],
    #[serde(default)]
    pub stroke: Option<[f32; 3]>,
    #[serde(default)]
    pub texture: Option<String>,
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub world: WorldConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
    pub bodies: Vec<BodyConfig>,
}

/// Built-in scenes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Earth and moon
    TwoBody,
    /// Earth, moon and a thrustable spaceship
    Spaceship,
    /// Spaceship scene with finer thrust and a speed HUD
    Telemetry,
}

impl SceneConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_yaml_reader(BufReader::new(file))
    }

    /// Build a preset laid out for a `width` x `height` viewport
    pub fn preset(preset: Preset, width: f64, height: f64) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        let world = WorldConfig { width, height };

        let moon = |dy: f64, radius: f64| BodyConfig {
            name: "moon".into(),
            x: [cx, cy - dy],
            v: [1.4, 0.0],
            m: 1.0,
            drag: 0.0,
            shape: ShapeConfig::Circle { radius },
            anchor: false,
            wrap: true,
            controllable: false,
            tracked: false,
            fill: default_fill(),
            stroke: None,
            texture: Some("image/moon.png".into()),
        };

        let earth = |dy: f64, radius: f64, m: f64| BodyConfig {
            name: "earth".into(),
            x: [cx, cy - dy],
            v: [0.0, 0.0],
            m,
            drag: 1.0,
            shape: ShapeConfig::Circle { radius },
            anchor: true,
            wrap: true,
            controllable: false,
            tracked: false,
            fill: [0.2, 0.4, 0.9],
            stroke: None,
            texture: None,
        };

        let spaceship = BodyConfig {
            name: "spaceship".into(),
            x: [cx, cy - 253.0],
            v: [0.0, 0.0],
            m: 0.08,
            drag: 0.0,
            shape: ShapeConfig::Rectangle { width: 5.0, height: 10.0 },
            anchor: false,
            wrap: true,
            controllable: true,
            tracked: false,
            fill: [1.0, 1.0, 1.0],
            stroke: Some([0.0, 0.0, 1.0]),
            texture: None,
        };

        match preset {
            Preset::TwoBody => Self {
                world,
                parameters: ParametersConfig::default(),
                telemetry: None,
                bodies: vec![earth(50.0, 50.0, 1000.0), moon(200.0, 10.0)],
            },
            Preset::Spaceship => Self {
                world,
                parameters: ParametersConfig {
                    time_scale: 0.5,
                    thrust_magnitude: 1.0e-5,
                    ..ParametersConfig::default()
                },
                telemetry: None,
                bodies: vec![earth(0.0, 250.0, 2700.0), moon(400.0, 20.0), spaceship],
            },
            Preset::Telemetry => {
                let mut moon = moon(400.0, 20.0);
                moon.tracked = true;
                let mut spaceship = spaceship;
                spaceship.tracked = true;
                Self {
                    world,
                    parameters: ParametersConfig {
                        time_scale: 0.5,
                        thrust_magnitude: 7.5e-6,
                        ..ParametersConfig::default()
                    },
                    telemetry: Some(TelemetryConfig::default()),
                    bodies: vec![earth(0.0, 250.0, 2700.0), moon, spaceship],
                }
            }
        }
    }
}
