use serde::Serialize;

use crate::metrics::{QueueSample, Summary};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerStatus {
    Served,
    Abandoned,
}

/// Lifetime record of one customer. Optional fields fill in as the customer
/// progresses; a customer cut off by the horizon keeps `status` empty.
#[derive(Clone, Debug, Serialize)]
pub struct Customer {
    pub id: usize,
    pub arrived_at: f64,
    pub enqueued_at: f64,
    pub queue_exited_at: Option<f64>,
    pub service_duration: Option<f64>,
    pub departed_at: Option<f64>,
    pub abandoned_at: Option<f64>,
    pub status: Option<CustomerStatus>,
}

impl Customer {
    pub fn arrived(id: usize, at: f64) -> Self {
        Self {
            id,
            arrived_at: at,
            enqueued_at: at,
            queue_exited_at: None,
            service_duration: None,
            departed_at: None,
            abandoned_at: None,
            status: None,
        }
    }

    /// Time spent in the wait line. `None` until a server was granted.
    pub fn wait(&self) -> Option<f64> {
        Some(self.queue_exited_at? - self.enqueued_at)
    }

    /// Arrival-to-departure time. `None` until served.
    pub fn system_time(&self) -> Option<f64> {
        Some(self.departed_at? - self.arrived_at)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetadata {
    pub servers: usize,
    pub horizon: f64,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub metadata: RunMetadata,
    pub summary: Summary,
    pub customers: Vec<Customer>,
    pub queue_samples: Vec<QueueSample>,
}
