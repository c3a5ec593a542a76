use crate::dists::{Sampler, StdSampler};
use crate::error::{Error, Result};
use crate::events::Event;
use crate::failure::FailureModel;
use crate::metrics::MetricsCollector;
use crate::models::SimConfig;
use crate::pool::{ResourcePool, Waiter};
use crate::scheduler::EventScheduler;
use crate::state::{Customer, CustomerStatus, RunMetadata, SimulationResult};

/// Drives one run: owns the clock, the server pool, the failure model, and
/// every customer record. All state transitions happen inside
/// [`run`](Self::run)'s dispatch loop, one event at a time.
pub struct SimulationEngine {
    config: SimConfig,
    scheduler: EventScheduler,
    pool: ResourcePool,
    failures: FailureModel,
    sampler: Box<dyn Sampler>,
    metrics: MetricsCollector,
    customers: Vec<Customer>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Result<Self> {
        validate_config(&config)?;
        let sampler = Box::new(StdSampler::from_config(&config)?);
        Ok(Self::build(config, sampler))
    }

    /// Engine with caller-supplied draws, used to script exact scenarios.
    pub fn with_sampler(config: SimConfig, sampler: Box<dyn Sampler>) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self::build(config, sampler))
    }

    fn build(config: SimConfig, sampler: Box<dyn Sampler>) -> Self {
        let pool = ResourcePool::new(config.servers);
        let failures = FailureModel::new(&config.failures);
        Self {
            config,
            scheduler: EventScheduler::new(),
            pool,
            failures,
            sampler,
            metrics: MetricsCollector::new(),
            customers: Vec::new(),
        }
    }

    pub fn run(mut self) -> SimulationResult {
        let first = self.sampler.interarrival(0.0);
        self.scheduler.schedule(first, Event::Arrival { customer: 1 });

        while let Some(entry) = self.scheduler.pop_due(self.config.horizon) {
            self.dispatch(entry.event);
        }

        let summary = self.metrics.summary();
        let queue_samples = self.metrics.take_queue_samples();
        SimulationResult {
            metadata: RunMetadata {
                servers: self.config.servers,
                horizon: self.config.horizon,
                seed: self.config.seed,
            },
            summary,
            customers: self.customers,
            queue_samples,
        }
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Arrival { customer } => self.handle_arrival(customer),
            Event::GrantAttempt => self.handle_grant_attempt(),
            Event::WaitTimeout { customer } => self.handle_wait_timeout(customer),
            Event::RepairComplete { customer } => self.handle_repair_complete(customer),
            Event::ServiceComplete { customer } => self.handle_service_complete(customer),
        }
    }

    fn handle_arrival(&mut self, id: usize) {
        let now = self.scheduler.now();
        let gap = self.sampler.interarrival(now);
        self.scheduler
            .schedule(now + gap, Event::Arrival { customer: id + 1 });

        debug_assert_eq!(id, self.customers.len() + 1);
        self.customers.push(Customer::arrived(id, now));
        self.metrics.record_arrival();

        if self.pool.try_seize() {
            self.metrics.sample_queue_length(now, self.pool.queue_len());
            self.grant(id);
        } else {
            let deadline = now + self.config.max_wait;
            let timeout = self
                .scheduler
                .schedule(deadline, Event::WaitTimeout { customer: id });
            self.pool.enqueue(Waiter {
                customer: id,
                enqueued_at: now,
                timeout,
            });
            self.metrics.sample_queue_length(now, self.pool.queue_len());
        }
    }

    /// The customer holds a server from here on, through any repair and
    /// their service, until [`handle_service_complete`] releases it.
    fn grant(&mut self, id: usize) {
        let now = self.scheduler.now();
        self.customers[id - 1].queue_exited_at = Some(now);
        self.metrics.sample_queue_length(now, self.pool.queue_len());

        let roll = self.sampler.failure_roll();
        if self.failures.check(roll) {
            self.metrics.record_failure();
            let done = now + self.config.failures.repair_duration;
            self.scheduler
                .schedule(done, Event::RepairComplete { customer: id });
        } else {
            self.begin_service(id);
        }
    }

    fn begin_service(&mut self, id: usize) {
        let now = self.scheduler.now();
        let duration = self.sampler.service_duration();
        self.customers[id - 1].service_duration = Some(duration);
        self.scheduler
            .schedule(now + duration, Event::ServiceComplete { customer: id });
    }

    fn handle_grant_attempt(&mut self) {
        while let Some(waiter) = self.pool.claim_next() {
            self.scheduler.cancel(waiter.timeout);
            self.grant(waiter.customer);
        }
    }

    fn handle_wait_timeout(&mut self, id: usize) {
        if self.pool.withdraw(id).is_none() {
            return;
        }
        let now = self.scheduler.now();
        let customer = &mut self.customers[id - 1];
        customer.abandoned_at = Some(now);
        customer.status = Some(CustomerStatus::Abandoned);
        self.metrics.record_abandoned();
    }

    fn handle_repair_complete(&mut self, id: usize) {
        self.failures.repair_complete();
        self.begin_service(id);
    }

    fn handle_service_complete(&mut self, id: usize) {
        let now = self.scheduler.now();
        let customer = &mut self.customers[id - 1];
        customer.departed_at = Some(now);
        customer.status = Some(CustomerStatus::Served);
        let wait = customer.queue_exited_at.unwrap_or(customer.enqueued_at) - customer.enqueued_at;
        let system = now - customer.arrived_at;
        self.metrics.record_served(wait, system);

        self.pool.release();
        if self.pool.has_waiters() {
            self.scheduler.schedule(now, Event::GrantAttempt);
        }
    }
}

pub fn run_simulation(config: &SimConfig) -> Result<SimulationResult> {
    Ok(SimulationEngine::new(config.clone())?.run())
}

fn validate_config(config: &SimConfig) -> Result<()> {
    if config.servers == 0 {
        return Err(Error::NoServers);
    }
    ensure_finite("simulation horizon", config.horizon)?;
    if config.horizon <= 0.0 {
        return Err(Error::InvalidHorizon(config.horizon));
    }
    ensure_finite("mean inter-arrival time", config.arrivals.mean_interarrival)?;
    if config.arrivals.mean_interarrival <= 0.0 {
        return Err(Error::InvalidInterarrival(config.arrivals.mean_interarrival));
    }
    if let Some(rush) = config.arrivals.rush {
        ensure_finite("rush window start", rush.start)?;
        ensure_finite("rush window end", rush.end)?;
        ensure_finite("rush mean inter-arrival time", rush.mean_interarrival)?;
        if rush.mean_interarrival <= 0.0 {
            return Err(Error::InvalidRushInterarrival(rush.mean_interarrival));
        }
        if rush.start > rush.end {
            return Err(Error::InvalidRushWindow {
                start: rush.start,
                end: rush.end,
            });
        }
    }
    ensure_finite("service mean", config.service.mean)?;
    if config.service.mean < 0.0 {
        return Err(Error::InvalidServiceMean(config.service.mean));
    }
    ensure_finite("service standard deviation", config.service.std_dev)?;
    if config.service.std_dev < 0.0 {
        return Err(Error::InvalidServiceStd(config.service.std_dev));
    }
    ensure_finite("maximum wait", config.max_wait)?;
    if config.max_wait < 0.0 {
        return Err(Error::InvalidMaxWait(config.max_wait));
    }
    ensure_finite("repair duration", config.failures.repair_duration)?;
    if config.failures.repair_duration < 0.0 {
        return Err(Error::InvalidRepairDuration(config.failures.repair_duration));
    }
    ensure_finite("base failure probability", config.failures.base_probability)?;
    if !(0.0..=1.0).contains(&config.failures.base_probability) {
        return Err(Error::InvalidFailureProbability(
            config.failures.base_probability,
        ));
    }
    ensure_finite("failure increment", config.failures.per_use_increment)?;
    if config.failures.per_use_increment < 0.0 {
        return Err(Error::InvalidFailureIncrement(
            config.failures.per_use_increment,
        ));
    }
    Ok(())
}

fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NotFinite(name))
    }
}
