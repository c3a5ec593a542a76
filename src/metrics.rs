use serde::Serialize;

/// One (timestamp, queue length) observation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QueueSample {
    pub time: f64,
    pub length: usize,
}

/// Aggregate statistics over one run. Means cover served customers only;
/// `None` means nobody was served.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_arrivals: usize,
    pub served: usize,
    pub abandoned: usize,
    pub abandonment_rate: f64,
    pub mean_wait: Option<f64>,
    pub mean_system_time: Option<f64>,
    pub failures: u64,
}

#[derive(Debug, Default)]
pub struct MetricsCollector {
    queue_samples: Vec<QueueSample>,
    waits: Vec<f64>,
    system_times: Vec<f64>,
    arrivals: usize,
    abandoned: usize,
    failures: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_arrival(&mut self) {
        self.arrivals += 1;
    }

    pub fn sample_queue_length(&mut self, time: f64, length: usize) {
        self.queue_samples.push(QueueSample { time, length });
    }

    pub fn record_served(&mut self, wait: f64, system: f64) {
        self.waits.push(wait);
        self.system_times.push(system);
    }

    pub fn record_abandoned(&mut self) {
        self.abandoned += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn queue_samples(&self) -> &[QueueSample] {
        &self.queue_samples
    }

    pub fn take_queue_samples(&mut self) -> Vec<QueueSample> {
        std::mem::take(&mut self.queue_samples)
    }

    pub fn summary(&self) -> Summary {
        let abandonment_rate = if self.arrivals == 0 {
            0.0
        } else {
            self.abandoned as f64 / self.arrivals as f64
        };
        Summary {
            total_arrivals: self.arrivals,
            served: self.waits.len(),
            abandoned: self.abandoned,
            abandonment_rate,
            mean_wait: mean(&self.waits),
            mean_system_time: mean(&self.system_times),
            failures: self.failures,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
