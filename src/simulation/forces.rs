//! Force contributors for the orbit sandbox
//!
//! Defines the force-term trait, the set that sums terms into each body's
//! accumulator, and pairwise Newtonian attraction

use crate::simulation::states::{System, NVec2};

/// Collection of force terms (attraction, etc.)
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into the force accumulator of every movable body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute the total force of all terms for every body in `sys`
    /// - `out[i]` is overwritten with the sum, anchors included
    pub fn compute(&self, sys: &System, out: &mut [NVec2]) {
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.accumulate(sys, out);
        }
    }

    /// Evaluate every term against the positions at the start of the step,
    /// then add the totals into the accumulators. Anchors are skipped.
    pub fn apply(&self, sys: &mut System) {
        if self.terms.is_empty() {
            return;
        }
        let mut out = vec![NVec2::zeros(); sys.bodies.len()];
        self.compute(sys, &mut out);

        for (b, f) in sys.bodies.iter_mut().zip(out.iter()) {
            b.apply_force(*f);
        }
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceTerm {
    fn accumulate(&self, sys: &System, out: &mut [NVec2]);
}

/// Pairwise inverse-square attraction
/// `eps2` floors the squared distance so coincident centers stay finite
#[derive(Debug, Clone)]
pub struct Attraction {
    pub g: f64, // coupling constant
    pub eps2: f64, // squared-distance floor
}

impl Attraction {
    /// Force on a body at `xi` with mass `mi` from a body at `xj` with mass `mj`
    pub fn pair_force(&self, xi: NVec2, mi: f64, xj: NVec2, mj: f64) -> NVec2 {
        // displacement from i toward j
        let r = xj - xi;
        let r2 = r.norm_squared();

        // G * mi * mj / max(|r|^2, eps2)
        let magnitude = self.g * mi * mj / r2.max(self.eps2);

        // A zero displacement has no direction; the force is zero then
        match r.try_normalize(0.0) {
            Some(dir) => dir * magnitude,
            None => NVec2::zeros(),
        }
    }
}

impl ForceTerm for Attraction {
    fn accumulate(&self, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n < 2 { // nothing to attract
            return;
        }

        // Unordered pairs (i, j) with i < j, in ascending id order so that
        // the floating-point sums are reproducible
        for i in 0..n {
            let bi = &sys.bodies[i];

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // force on i, pulled toward j
                let fij = self.pair_force(bi.x, bi.m, bj.x, bj.m);

                // Newton's third law: j feels the exact negation
                out[i] += fij;
                out[j] -= fij;
            }
        }
    }
}
