//! Fixed-step position integrator for the orbit sandbox
//!
//! Velocities are displacement per step, so the force term enters scaled by
//! the squared step length. Linear drag damps the carried-over velocity.

use super::engine::Engine;
use super::states::{System, NVec2};

/// Advance the system by one step
/// For every movable body:
///   v_n+1 = v_n * (1 - drag * time_scale) + (f / m) * dt^2
///   x_n+1 = x_n + v_n+1
/// then wrap positions of bodies flagged `wrap`. Anchors keep `v = 0`.
pub fn step(sys: &mut System, engine: &Engine) {
    let dt = engine.dt();
    let dt2 = dt * dt;

    for b in sys.bodies.iter_mut() {
        if b.anchor {
            b.v = NVec2::zeros();
        } else {
            // drag >= 1 / time_scale stops the body outright
            let keep = (1.0 - b.drag * engine.time_scale).max(0.0);
            b.v = b.v * keep + (b.f / b.m) * dt2;
            b.x += b.v;
        }

        if b.wrap {
            b.x = engine.bounds.wrap(b.x);
        }
    }

    sys.t += dt;
    sys.steps += 1;
}
