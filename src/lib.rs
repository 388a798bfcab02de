pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use error::{Error, Result};

pub use simulation::states::{Body, BodyId, System, NVec2, Shape};
pub use simulation::forces::{ForceTerm, ForceSet, Attraction};
pub use simulation::thrust::{ThrustCommand, ThrustController, ThrustDirection};
pub use simulation::telemetry::{TelemetryOverlay, TelemetrySample, DrawSurface, ReadoutSink, round_half_away};
pub use simulation::integrator::step;
pub use simulation::scene::Scene;

pub use configuration::config::{SceneConfig, BodyConfig, ParametersConfig, TelemetryConfig, WorldConfig, ShapeConfig, Preset};

pub use visualization::vis2d::run_2d;
