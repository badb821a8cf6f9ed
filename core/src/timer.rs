use alloc::collections::{BTreeMap, BTreeSet};

use crate::Millis;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// One-shot timers ordered by deadline, ties fire in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    next_seq: u64,
    entries: BTreeMap<(Millis, u64), E>,
    deadlines: BTreeMap<u64, Millis>,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            entries: BTreeMap::new(),
            deadlines: BTreeMap::new(),
        }
    }

    pub fn schedule(&mut self, due: Millis, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due, seq), event);
        self.deadlines.insert(seq, due);
        TimerHandle(seq)
    }

    /// Returns `false` when the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(due) => self.entries.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerHandle, Millis, E)> {
        let (&(due, seq), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        let event = self.entries.remove(&(due, seq))?;
        self.deadlines.remove(&seq);
        Some((TimerHandle(seq), due, event))
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|&(due, _)| due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Timers that live and die together.
#[derive(Clone, Debug, Default)]
pub struct TaskGroup {
    handles: BTreeSet<TimerHandle>,
}

impl TaskGroup {
    pub fn schedule<E>(&mut self, queue: &mut TimerQueue<E>, due: Millis, event: E) -> TimerHandle {
        let handle = queue.schedule(due, event);
        self.handles.insert(handle);
        handle
    }

    /// Stops tracking a timer that has fired. Returns `false` for foreign handles.
    pub fn retire(&mut self, handle: TimerHandle) -> bool {
        self.handles.remove(&handle)
    }

    /// Revokes every outstanding timer of the group, returns how many were still pending.
    pub fn cancel_all<E>(&mut self, queue: &mut TimerQueue<E>) -> usize {
        let cancelled = self
            .handles
            .iter()
            .filter(|&&handle| queue.cancel(handle))
            .count();
        self.handles.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
