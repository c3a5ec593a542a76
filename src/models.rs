use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub servers: usize,
    pub max_wait: f64,
    pub horizon: f64,
    pub seed: Option<u64>,
    pub arrivals: ArrivalConfig,
    pub service: ServiceConfig,
    pub failures: FailureConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            servers: 3,
            max_wait: 1.5,
            horizon: 100.0,
            seed: None,
            arrivals: ArrivalConfig::default(),
            service: ServiceConfig::default(),
            failures: FailureConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ArrivalConfig {
    pub mean_interarrival: f64,
    pub rush: Option<RushWindow>,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            mean_interarrival: 3.0,
            rush: Some(RushWindow::default()),
        }
    }
}

/// Interval of elevated arrival intensity. Both ends are inclusive and the
/// switch is instantaneous: only arrivals drawn while the clock is inside
/// the window use the rush mean.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RushWindow {
    pub start: f64,
    pub end: f64,
    pub mean_interarrival: f64,
}

impl Default for RushWindow {
    fn default() -> Self {
        Self {
            start: 30.0,
            end: 50.0,
            mean_interarrival: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mean: 3.0,
            std_dev: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FailureConfig {
    pub base_probability: f64,
    pub per_use_increment: f64,
    pub repair_duration: f64,
}

impl Default for FailureConfig {
    fn default() -> Self {
        Self {
            base_probability: 0.05,
            per_use_increment: 0.01,
            repair_duration: 10.0,
        }
    }
}
