use std::time::Duration;

/// Identifies one scheduled timer. Unique within the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A cancellable delayed-task API.
///
/// The scheduler does not call back into the simulator itself. Whoever drives the event loop
/// receives the [TimerId] of each elapsed timer and hands it to
/// [crate::simulator::Simulator::on_timer].
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Unknown or already elapsed timers are ignored.
    fn cancel(&mut self, timer: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due: Duration,
}

/// A scheduler on a virtual clock, advanced explicitly by the test that owns it.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
    scheduled_delays: Vec<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Timers that have been scheduled and neither fired nor cancelled.
    pub fn pending(&self) -> &[PendingTimer] {
        &self.pending
    }

    /// Every delay ever passed to [Scheduler::schedule], in order.
    pub fn scheduled_delays(&self) -> &[Duration] {
        &self.scheduled_delays
    }

    /// Jump the clock to the earliest pending timer and fire it.
    pub fn fire_next(&mut self) -> Option<TimerId> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;
        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer.id)
    }

    /// Move the clock forward and fire every timer that is now due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;

        let mut due = self
            .pending
            .iter()
            .filter(|timer| timer.due <= now)
            .copied()
            .collect::<Vec<_>>();
        due.sort_by_key(|timer| (timer.due, timer.id));
        self.pending.retain(|timer| timer.due > now);

        due.into_iter().map(|timer| timer.id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(PendingTimer {
            id,
            due: self.now + delay,
        });
        self.scheduled_delays.push(delay);
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.pending.retain(|pending| pending.id != timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let slow = scheduler.schedule(Duration::from_millis(900));
        let fast = scheduler.schedule(Duration::from_millis(500));

        assert_eq!(Some(fast), scheduler.fire_next());
        assert_eq!(Duration::from_millis(500), scheduler.now());
        assert_eq!(Some(slow), scheduler.fire_next());
        assert_eq!(None, scheduler.fire_next());
    }

    #[test]
    fn advance_only_fires_due_timers() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule(Duration::from_millis(100));
        let second = scheduler.schedule(Duration::from_millis(300));

        assert_eq!(vec![first], scheduler.advance(Duration::from_millis(200)));
        assert_eq!(1, scheduler.pending().len());
        assert_eq!(vec![second], scheduler.advance(Duration::from_millis(100)));
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let timer = scheduler.schedule(Duration::from_millis(100));

        scheduler.cancel(timer);
        scheduler.cancel(timer);

        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(None, scheduler.fire_next());
    }
}
