use std::collections::VecDeque;

use crate::events::EventHandle;

/// One entry in the wait line: who is waiting, since when, and the timeout
/// event racing against their grant.
#[derive(Clone, Copy, Debug)]
pub struct Waiter {
    pub customer: usize,
    pub enqueued_at: f64,
    pub timeout: EventHandle,
}

/// Fixed-capacity bank of interchangeable servers with a single FIFO wait
/// line. `busy` never exceeds `capacity`, and a waiter leaves the line
/// exactly once, through [`claim_next`](Self::claim_next) or
/// [`withdraw`](Self::withdraw).
#[derive(Debug)]
pub struct ResourcePool {
    capacity: usize,
    busy: usize,
    waiters: VecDeque<Waiter>,
}

impl ResourcePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            busy: 0,
            waiters: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn busy(&self) -> usize {
        self.busy
    }

    pub fn queue_len(&self) -> usize {
        self.waiters.len()
    }

    pub fn has_waiters(&self) -> bool {
        !self.waiters.is_empty()
    }

    /// Seizes a server for a newly arrived customer. Refused while anyone
    /// is waiting, so a newcomer can never overtake the line.
    pub fn try_seize(&mut self) -> bool {
        if self.busy < self.capacity && self.waiters.is_empty() {
            self.busy += 1;
            true
        } else {
            false
        }
    }

    pub fn enqueue(&mut self, waiter: Waiter) {
        self.waiters.push_back(waiter);
    }

    /// Moves the head of the line onto a free server, if both exist.
    pub fn claim_next(&mut self) -> Option<Waiter> {
        if self.busy < self.capacity {
            let waiter = self.waiters.pop_front()?;
            self.busy += 1;
            Some(waiter)
        } else {
            None
        }
    }

    /// Removes a waiter that gave up, wherever they stand in the line.
    pub fn withdraw(&mut self, customer: usize) -> Option<Waiter> {
        let idx = self.waiters.iter().position(|w| w.customer == customer)?;
        self.waiters.remove(idx)
    }

    pub fn release(&mut self) {
        debug_assert!(self.busy > 0);
        self.busy = self.busy.saturating_sub(1);
    }
}
