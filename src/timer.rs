//! Timers fired from the event loop. Each fires at most once per loop
//! iteration, bounding drift to one iteration regardless of how long the
//! callback takes.

use std::time::{Duration, Instant};

/// Identifies a registered timer. Monotonic and non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    interval: Duration,
    last_fire: Instant,
}

/// A set of interval timers, polled once per event-loop iteration.
pub struct Timers {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Timers {
    /// An empty timer set.
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a timer firing every `interval`, starting the countdown
    /// from `now`. Returns a monotonic non-zero id usable with
    /// [`remove`](Timers::remove).
    pub fn add(&mut self, interval: Duration, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        tracing::trace!(id = id.0, interval_ms = interval.as_millis() as u64, "timer registered");
        self.timers.push(Timer {
            id,
            interval,
            last_fire: now,
        });
        id
    }

    /// Remove a timer by id. No-op if the id is unknown.
    pub fn remove(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    /// Number of registered timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if no timers are registered.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Milliseconds until the next timer should fire, or `None` if there
    /// are no timers (the event loop should then wait indefinitely, absent
    /// a pending resize debounce).
    pub fn min_wait_ms(&self, now: Instant) -> Option<u64> {
        self.timers
            .iter()
            .map(|t| {
                let elapsed = now.saturating_duration_since(t.last_fire);
                t.interval.saturating_sub(elapsed).as_millis() as u64
            })
            .min()
    }

    /// Collect the ids of every timer whose interval has elapsed, resetting
    /// their `last_fire` to `now` so a single iteration never fires a timer
    /// twice. Caller is responsible for invoking each id's callback and
    /// marking `needs_render`.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if now.saturating_duration_since(timer.last_fire) >= timer.interval {
                timer.last_fire = now;
                fired.push(timer.id);
            }
        }
        fired
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
