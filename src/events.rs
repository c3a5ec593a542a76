use std::cmp::Ordering;

/// Identity of a scheduled event, handed back by the scheduler so the
/// entry can be cancelled before it fires.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EventHandle(pub(crate) u64);

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A customer enters the store and requests a server.
    Arrival { customer: usize },
    /// A server was released; hand it to the head of the wait line.
    GrantAttempt,
    /// A waiting customer's patience ran out.
    WaitTimeout { customer: usize },
    /// A failed server finished its repair; service may begin.
    RepairComplete { customer: usize },
    /// A customer's service finished; they leave the system.
    ServiceComplete { customer: usize },
}

/// Heap entry: an event pinned to an absolute virtual time. `seq` is the
/// insertion sequence number; entries at equal times dispatch in insertion
/// order, which keeps runs reproducible for a fixed seed.
#[derive(Clone, Debug)]
pub struct ScheduledEvent {
    pub time: f64,
    pub seq: u64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time: f64, seq: u64, event: Event) -> Self {
        Self { time, seq, event }
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
