use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use crate::error::{Error, Result};
use crate::models::{RushWindow, SimConfig};

/// Source of every random draw the engine makes. Implementations must be
/// deterministic for a fixed seed (or script), so two runs with identical
/// configuration replay identically.
pub trait Sampler {
    /// Gap until the next customer arrival, given the current clock.
    fn interarrival(&mut self, now: f64) -> f64;
    /// Duration of one service. Never negative.
    fn service_duration(&mut self) -> f64;
    /// Uniform draw in [0, 1) for the failure decision.
    fn failure_roll(&mut self) -> f64;
}

/// Production sampler: seeded `StdRng` behind exponential inter-arrival,
/// normal service, and uniform failure draws.
pub struct StdSampler {
    rng: StdRng,
    baseline: Exp<f64>,
    rush: Option<(RushWindow, Exp<f64>)>,
    service: Normal<f64>,
}

impl StdSampler {
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let mean = config.arrivals.mean_interarrival;
        let baseline = Exp::new(1.0 / mean).map_err(|_| Error::InvalidInterarrival(mean))?;
        let rush = match config.arrivals.rush {
            Some(window) => {
                let dist = Exp::new(1.0 / window.mean_interarrival)
                    .map_err(|_| Error::InvalidRushInterarrival(window.mean_interarrival))?;
                Some((window, dist))
            }
            None => None,
        };
        let service = Normal::new(config.service.mean, config.service.std_dev)
            .map_err(|_| Error::InvalidServiceStd(config.service.std_dev))?;

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed.unwrap_or(0)),
            baseline,
            rush,
            service,
        })
    }

    fn rush_active(&self, now: f64) -> bool {
        match &self.rush {
            Some((window, _)) => now >= window.start && now <= window.end,
            None => false,
        }
    }
}

impl Sampler for StdSampler {
    fn interarrival(&mut self, now: f64) -> f64 {
        let dist = match self.rush {
            Some((_, dist)) if self.rush_active(now) => dist,
            _ => self.baseline,
        };
        dist.sample(&mut self.rng)
    }

    fn service_duration(&mut self) -> f64 {
        // A wide std_dev can push the normal below zero; clamped at zero.
        self.service.sample(&mut self.rng).max(0.0)
    }

    fn failure_roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays pre-scripted draws, used to pin exact scenarios in tests.
/// Exhausted scripts fall back to values that keep the run quiet: no more
/// arrivals, zero-length services, no failures.
#[derive(Debug, Default)]
pub struct ScriptedSampler {
    interarrivals: VecDeque<f64>,
    services: VecDeque<f64>,
    rolls: VecDeque<f64>,
}

impl ScriptedSampler {
    pub fn new(
        interarrivals: impl IntoIterator<Item = f64>,
        services: impl IntoIterator<Item = f64>,
        rolls: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            interarrivals: interarrivals.into_iter().collect(),
            services: services.into_iter().collect(),
            rolls: rolls.into_iter().collect(),
        }
    }
}

impl Sampler for ScriptedSampler {
    fn interarrival(&mut self, _now: f64) -> f64 {
        self.interarrivals.pop_front().unwrap_or(f64::INFINITY)
    }

    fn service_duration(&mut self) -> f64 {
        self.services.pop_front().unwrap_or(0.0).max(0.0)
    }

    fn failure_roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimConfig;

    fn sampler_with(config: &SimConfig) -> StdSampler {
        StdSampler::from_config(config).expect("sampler should build")
    }

    #[test]
    fn rush_window_bounds_are_inclusive() {
        let config = SimConfig::default();
        let sampler = sampler_with(&config);
        assert!(!sampler.rush_active(29.99));
        assert!(sampler.rush_active(30.0));
        assert!(sampler.rush_active(40.0));
        assert!(sampler.rush_active(50.0));
        assert!(!sampler.rush_active(50.01));
    }

    #[test]
    fn no_rush_window_never_activates() {
        let mut config = SimConfig::default();
        config.arrivals.rush = None;
        let sampler = sampler_with(&config);
        assert!(!sampler.rush_active(40.0));
    }

    #[test]
    fn zero_std_dev_yields_the_mean() {
        let mut config = SimConfig::default();
        config.service.mean = 4.0;
        config.service.std_dev = 0.0;
        let mut sampler = sampler_with(&config);
        assert_eq!(sampler.service_duration(), 4.0);
    }

    #[test]
    fn negative_service_draws_clamp_to_zero() {
        let mut config = SimConfig::default();
        config.service.mean = -5.0;
        config.service.std_dev = 0.0;
        let mut sampler = sampler_with(&config);
        assert_eq!(sampler.service_duration(), 0.0);
    }

    #[test]
    fn failure_roll_is_a_unit_interval_draw() {
        let mut sampler = sampler_with(&SimConfig::default());
        for _ in 0..100 {
            let roll = sampler.failure_roll();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[test]
    fn seeded_samplers_replay_identically() {
        let mut config = SimConfig::default();
        config.seed = Some(99);
        let mut a = sampler_with(&config);
        let mut b = sampler_with(&config);
        for _ in 0..10 {
            assert_eq!(a.interarrival(0.0), b.interarrival(0.0));
            assert_eq!(a.service_duration(), b.service_duration());
            assert_eq!(a.failure_roll(), b.failure_roll());
        }
    }

    #[test]
    fn scripted_sampler_replays_then_falls_back() {
        let mut sampler = ScriptedSampler::new([1.0, 2.0], [3.0], [0.5]);
        assert_eq!(sampler.interarrival(0.0), 1.0);
        assert_eq!(sampler.interarrival(0.0), 2.0);
        assert_eq!(sampler.interarrival(0.0), f64::INFINITY);
        assert_eq!(sampler.service_duration(), 3.0);
        assert_eq!(sampler.service_duration(), 0.0);
        assert_eq!(sampler.failure_roll(), 0.5);
        assert_eq!(sampler.failure_roll(), 1.0);
    }
}
