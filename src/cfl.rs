//! CFL bound accumulation.
//!
//! Every assembler reports the largest |s|/h it saw across the interfaces
//! it visited, where s is a signed wave speed and h the effective cell
//! width at that interface. The reciprocal of the bound is the largest
//! stable forward-Euler step; callers of higher-order integrators scale
//! it by their own stability region.

/// Running maximum of |speed| / width over visited interfaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct CflTracker {
    bound: f64,
}

impl CflTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one wave crossing an interface with effective cell width `h`.
    #[inline]
    pub fn observe(&mut self, speed: f64, h: f64) {
        let rate = speed.abs() / h;
        if rate > self.bound {
            self.bound = rate;
        }
    }

    /// The accumulated bound, max |s|/h. Zero when nothing was observed.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Fold another tracker in, keeping the larger bound.
    pub fn merge(&mut self, other: CflTracker) {
        if other.bound > self.bound {
            self.bound = other.bound;
        }
    }

    /// Warn when a proposed step exceeds half the forward-Euler limit.
    pub fn check_step(&self, dt: f64, time: f64) {
        if self.bound > 0.0 && dt > 0.5 / self.bound {
            log::warn!(
                "step size {:.3e} at t = {:.3e} exceeds half the CFL limit {:.3e}",
                dt,
                time,
                1.0 / self.bound
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_keeps_maximum() {
        let mut cfl = CflTracker::new();
        cfl.observe(1.0, 0.5);
        cfl.observe(-3.0, 2.0);
        cfl.observe(0.1, 1.0);
        assert_eq!(cfl.bound(), 2.0);
    }

    #[test]
    fn test_merge_takes_larger() {
        let mut a = CflTracker::new();
        a.observe(1.0, 1.0);
        let mut b = CflTracker::new();
        b.observe(5.0, 1.0);
        a.merge(b);
        assert_eq!(a.bound(), 5.0);
    }

    #[test]
    fn test_empty_tracker_is_zero() {
        assert_eq!(CflTracker::new().bound(), 0.0);
    }

    #[test]
    fn test_check_step_quiet_within_limit() {
        let mut cfl = CflTracker::new();
        cfl.observe(2.0, 1.0);
        // dt = 0.2 is below half the limit 1/2 = 0.5, and an empty
        // tracker never warns regardless of dt.
        cfl.check_step(0.2, 0.0);
        CflTracker::new().check_step(1.0e6, 0.0);
    }

    #[test]
    fn test_check_step_warns_past_half_limit() {
        let mut cfl = CflTracker::new();
        cfl.observe(2.0, 1.0);
        assert!(0.3 > 0.5 / cfl.bound());
        cfl.check_step(0.3, 1.5);
    }
}
