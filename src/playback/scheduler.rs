use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identifies a one-shot timer armed on a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// One-shot timer source driving the player.
///
/// The host arms nothing itself: it calls `Player::poll_timers` whenever it
/// wakes up, and the player collects expired timers through [`Scheduler::due`].
pub trait Scheduler {
    /// Time elapsed since the scheduler was created
    fn now(&self) -> Duration;

    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Returns `false` when the timer already fired or was never armed.
    /// Callers treat that as a no-op.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Remove and return every timer whose deadline has passed, earliest first
    fn due(&mut self) -> Vec<TimerHandle>;

    /// Deadline of the earliest armed timer
    fn next_deadline(&self) -> Option<Duration>;
}

/// Deadline-ordered timer table shared by both scheduler implementations
#[derive(Debug, Default)]
struct TimerTable {
    next_id: u64,
    by_deadline: BTreeMap<(Duration, u64), TimerHandle>,
    deadlines: BTreeMap<TimerHandle, Duration>,
}

impl TimerTable {
    fn insert(&mut self, deadline: Duration) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let handle = TimerHandle(id);
        self.by_deadline.insert((deadline, id), handle);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn remove(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(deadline) => {
                self.by_deadline.remove(&(deadline, handle.0));
                true
            }
            None => false,
        }
    }

    fn take_due(&mut self, now: Duration) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        loop {
            let Some((&(deadline, id), &handle)) = self.by_deadline.first_key_value() else {
                break;
            };
            if deadline > now {
                break;
            }
            self.by_deadline.remove(&(deadline, id));
            self.deadlines.remove(&handle);
            fired.push(handle);
        }
        fired
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.by_deadline.keys().next().map(|(deadline, _)| *deadline)
    }

    fn len(&self) -> usize {
        self.deadlines.len()
    }
}

/// Scheduler over virtual time, advanced explicitly. Used by tests and by
/// hosts that own their own clock.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    timers: TimerTable,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward. Timers become due but are not dispatched.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.timers.insert(self.now + delay)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(handle)
    }

    fn due(&mut self) -> Vec<TimerHandle> {
        self.timers.take_due(self.now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}

/// Scheduler backed by the monotonic wall clock
#[derive(Debug)]
pub struct InstantScheduler {
    origin: Instant,
    timers: TimerTable,
}

impl InstantScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            timers: TimerTable::default(),
        }
    }
}

impl Default for InstantScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for InstantScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let deadline = self.now() + delay;
        self.timers.insert(deadline)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(handle)
    }

    fn due(&mut self) -> Vec<TimerHandle> {
        let now = self.now();
        self.timers.take_due(now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}
