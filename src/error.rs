//! Error definitions for scene setup and overlay wiring.
use thiserror::Error;

/// Failures surfaced by the library. All of them are configuration or wiring
/// faults detected before or outside the step loop; none is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// A body was configured with zero or negative mass.
    #[error("body `{name}` has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    /// A numeric field was NaN or infinite.
    #[error("`{field}` of `{owner}` must be finite")]
    NonFinite { owner: String, field: &'static str },

    /// A parameter that scales time or distance was zero or negative.
    #[error("parameter `{0}` must be positive")]
    NonPositiveParameter(&'static str),

    /// A bounded parameter exceeded its limit.
    #[error("parameter `{field}` must be at most {max}")]
    OutOfRange { field: &'static str, max: f64 },

    /// Two bodies share a name.
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    /// Thrust can only drive a single body.
    #[error("more than one controllable body: `{0}` and `{1}`")]
    MultipleControllable(String, String),

    /// The host has no display element for a tracked body.
    #[error("no display element for body `{0}`")]
    MissingElement(String),

    /// Scene file could not be parsed.
    #[error("yaml error {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Scene file could not be read.
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
