use crate::models::FailureConfig;

/// Usage-dependent failure decision made at the instant a server is
/// granted. The failure chance grows with every use since the last repair
/// and resets when a repair completes; the counters live here and nowhere
/// else.
#[derive(Debug)]
pub struct FailureModel {
    base_probability: f64,
    per_use_increment: f64,
    uses_since_repair: u32,
    failures: u64,
}

impl FailureModel {
    pub fn new(config: &FailureConfig) -> Self {
        Self {
            base_probability: config.base_probability,
            per_use_increment: config.per_use_increment,
            uses_since_repair: 0,
            failures: 0,
        }
    }

    /// Current failure threshold.
    pub fn probability(&self) -> f64 {
        self.base_probability + f64::from(self.uses_since_repair) * self.per_use_increment
    }

    /// Decides a grant: a roll under the threshold is a failure. Usage
    /// advances only on clean grants.
    pub fn check(&mut self, roll: f64) -> bool {
        if roll < self.probability() {
            self.failures += 1;
            true
        } else {
            self.uses_since_repair += 1;
            false
        }
    }

    /// The usage counter resets the instant a repair finishes.
    pub fn repair_complete(&mut self) {
        self.uses_since_repair = 0;
    }

    pub fn uses_since_repair(&self) -> u32 {
        self.uses_since_repair
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}
