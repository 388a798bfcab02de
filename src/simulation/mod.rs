pub mod states;
pub mod engine;
pub mod forces;
pub mod thrust;
pub mod telemetry;
pub mod integrator;
pub mod constraint;
pub mod scene;
