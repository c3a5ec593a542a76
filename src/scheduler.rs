use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::events::{Event, EventHandle, ScheduledEvent};

/// Virtual-time event queue. The clock only moves when an event is popped,
/// and never backwards; events at equal times come out in the order they
/// went in.
#[derive(Debug, Default)]
pub struct EventScheduler {
    queue: BinaryHeap<Reverse<ScheduledEvent>>,
    cancelled: HashSet<u64>,
    next_seq: u64,
    now: f64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedules `event` at absolute time `time`. The returned handle can be
    /// passed to [`cancel`](Self::cancel).
    pub fn schedule(&mut self, time: f64, event: Event) -> EventHandle {
        debug_assert!(time >= self.now);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(ScheduledEvent::new(time, seq, event)));
        EventHandle(seq)
    }

    /// Marks an event so it is discarded instead of dispatched. Cancelling
    /// an event that already fired is a no-op.
    pub fn cancel(&mut self, handle: EventHandle) {
        self.cancelled.insert(handle.0);
    }

    /// Pops the earliest live event with time <= `horizon` and advances the
    /// clock to its timestamp. Cancelled entries are dropped as they
    /// surface. Returns `None` when nothing dispatchable remains before the
    /// horizon.
    pub fn pop_due(&mut self, horizon: f64) -> Option<ScheduledEvent> {
        loop {
            match self.queue.peek() {
                Some(Reverse(entry)) if entry.time <= horizon => {}
                _ => return None,
            }
            let Some(Reverse(entry)) = self.queue.pop() else {
                return None;
            };
            if self.cancelled.remove(&entry.seq) {
                continue;
            }
            self.now = entry.time;
            return Some(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut EventScheduler, horizon: f64) -> Vec<(f64, Event)> {
        let mut dispatched = Vec::new();
        while let Some(entry) = scheduler.pop_due(horizon) {
            dispatched.push((entry.time, entry.event));
        }
        dispatched
    }

    #[test]
    fn dispatches_in_time_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(3.0, Event::Arrival { customer: 3 });
        scheduler.schedule(1.0, Event::Arrival { customer: 1 });
        scheduler.schedule(2.0, Event::Arrival { customer: 2 });

        let times: Vec<f64> = drain(&mut scheduler, 10.0)
            .into_iter()
            .map(|(time, _)| time)
            .collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        assert_eq!(scheduler.now(), 3.0);
    }

    #[test]
    fn equal_times_dispatch_in_insertion_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(5.0, Event::ServiceComplete { customer: 1 });
        scheduler.schedule(5.0, Event::WaitTimeout { customer: 2 });
        scheduler.schedule(5.0, Event::GrantAttempt);

        let events: Vec<Event> = drain(&mut scheduler, 10.0)
            .into_iter()
            .map(|(_, event)| event)
            .collect();
        assert_eq!(
            events,
            vec![
                Event::ServiceComplete { customer: 1 },
                Event::WaitTimeout { customer: 2 },
                Event::GrantAttempt,
            ]
        );
    }

    #[test]
    fn cancelled_events_never_dispatch() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(1.0, Event::Arrival { customer: 1 });
        let doomed = scheduler.schedule(2.0, Event::WaitTimeout { customer: 1 });
        scheduler.schedule(3.0, Event::Arrival { customer: 2 });
        scheduler.cancel(doomed);

        let events: Vec<Event> = drain(&mut scheduler, 10.0)
            .into_iter()
            .map(|(_, event)| event)
            .collect();
        assert_eq!(
            events,
            vec![Event::Arrival { customer: 1 }, Event::Arrival { customer: 2 }]
        );
    }

    #[test]
    fn cancel_after_dispatch_is_a_noop() {
        let mut scheduler = EventScheduler::new();
        let handle = scheduler.schedule(1.0, Event::GrantAttempt);
        assert!(scheduler.pop_due(10.0).is_some());
        scheduler.cancel(handle);
        assert!(scheduler.pop_due(10.0).is_none());
    }

    #[test]
    fn horizon_cuts_off_pending_events() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(1.0, Event::Arrival { customer: 1 });
        scheduler.schedule(50.0, Event::Arrival { customer: 2 });

        let dispatched = drain(&mut scheduler, 10.0);
        assert_eq!(dispatched.len(), 1);
        // The clock stays where the last dispatched event left it.
        assert_eq!(scheduler.now(), 1.0);
    }
}
