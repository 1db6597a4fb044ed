use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::scheduler::{Scheduler, TimerId};

/// Scheduler backed by tokio timers.
///
/// Every timer is a spawned task that sleeps and then posts its [TimerId] to [TimerEvents].
/// Scheduling must happen from inside a tokio runtime; a current-thread runtime keeps the whole
/// simulation on one thread.
#[derive(Debug)]
pub struct TokioScheduler {
    sender: UnboundedSender<TimerId>,
    timers: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

/// The receiving end of a [TokioScheduler], polled by the event loop.
#[derive(Debug)]
pub struct TimerEvents {
    receiver: UnboundedReceiver<TimerId>,
}

impl TimerEvents {
    /// Wait for the next elapsed timer. Cancel safe.
    pub async fn next(&mut self) -> Option<TimerId> {
        self.receiver.recv().await
    }
}

impl TokioScheduler {
    pub fn new() -> (Self, TimerEvents) {
        let (sender, receiver) = unbounded_channel();
        (
            Self {
                sender,
                timers: HashMap::new(),
                next_id: 0,
            },
            TimerEvents { receiver },
        )
    }

    /// Number of timer tasks that have not finished yet.
    pub fn active_timers(&self) -> usize {
        self.timers.values().filter(|h| !h.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.timers.retain(|_, handle| !handle.is_finished());

        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(id).is_err() {
                log::trace!("Timer {id:?} elapsed after its event loop was dropped");
            }
        });
        self.timers.insert(id, handle);

        id
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(handle) = self.timers.remove(&timer) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}
