//! Repeating timers behind a handle the controller can cancel.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    time::Duration,
};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::trace;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Opaque identity of one scheduled repeating timer. Handles are never
/// reused by the scheduler that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub trait TickScheduler {
    /// Starts a timer that fires every `period`, first after one full
    /// period.
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Stops the timer. Cancelling an unknown or already cancelled handle
    /// does nothing.
    fn cancel(&mut self, handle: TimerHandle);
}

/// What [`ManualScheduler::advance`] does with periods that elapsed in full
/// during a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissedTicks {
    /// Every elapsed period fires, oldest first.
    #[default]
    Burst,
    /// A late timer fires once and the next period starts from the end of
    /// the step, like tokio's `MissedTickBehavior::Delay`.
    Delay,
}

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    period: Duration,
    next_due: Duration,
}

/// Scheduler on a virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    missed_ticks: MissedTicks,
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerHandle, ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missed_ticks(missed_ticks: MissedTicks) -> Self {
        Self {
            missed_ticks,
            ..Self::default()
        }
    }

    pub fn missed_ticks(&self) -> MissedTicks {
        self.missed_ticks
    }

    /// Virtual time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn until_next_tick(&self) -> Option<Duration> {
        self.timers
            .values()
            .map(|timer| timer.next_due.saturating_sub(self.now))
            .min()
    }

    /// Moves the clock forward and returns the ticks that came due, oldest
    /// first. Ticks due at the same instant are ordered by handle. Under
    /// [`MissedTicks::Delay`] each timer fires at most once per call.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        let target = self.now + by;
        let mut fired = Vec::new();

        loop {
            let due = self
                .timers
                .iter()
                .filter(|(_, timer)| timer.next_due <= target)
                .min_by_key(|(handle, timer)| (timer.next_due, **handle))
                .map(|(handle, _)| *handle);

            let Some(handle) = due else {
                break;
            };
            if let Some(timer) = self.timers.get_mut(&handle) {
                self.now = timer.next_due;
                timer.next_due += timer.period;
                if self.missed_ticks == MissedTicks::Delay && timer.next_due <= target {
                    trace!(%handle, "delaying missed ticks");
                    timer.next_due = target + timer.period;
                }
            }
            fired.push(handle);
        }

        self.now = target;
        fired
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            handle,
            ManualTimer {
                period,
                next_due: self.now + period,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }
}

/// Scheduler backed by tokio timers. Each timer is a task that pushes its
/// handle into the tick channel on every period.
///
/// Must be used from inside a tokio runtime.
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Returns the scheduler and the receiving end of its tick channel. The
    /// channel stays open for as long as the scheduler lives.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (ticks, rx) = mpsc::unbounded_channel();
        (
            Self {
                ticks,
                tasks: HashMap::new(),
                next_id: 0,
            },
            rx,
        )
    }

    pub fn active_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let ticks = self.ticks.clone();
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!(%handle, "timer fired");
                if ticks.send(handle).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
