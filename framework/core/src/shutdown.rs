use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::{Receiver, Sender};

/// Broadcasts a request to stop whatever is in flight, for example when the user presses Ctrl-C.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    sender: Sender<()>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self {
            sender: tokio::sync::broadcast::channel(1).0,
        }
    }

    pub fn shutdown(&self) {
        if let Err(e) = self.sender.send(()) {
            // Nobody is listening, so there is nothing left to stop.
            log::debug!("No listeners for shutdown signal: {e:?}");
        }
    }

    pub fn new_listener(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
            triggered: false,
        }
    }
}

#[derive(Debug)]
pub struct ShutdownListener {
    receiver: Receiver<()>,
    triggered: bool,
}

impl ShutdownListener {
    /// Point in time check for the shutdown signal. Once this has returned true it keeps doing so.
    pub fn should_shutdown(&mut self) -> bool {
        if !self.triggered {
            self.triggered = match self.receiver.try_recv() {
                Ok(()) | Err(TryRecvError::Closed) | Err(TryRecvError::Lagged(_)) => true,
                Err(TryRecvError::Empty) => false,
            };
        }
        self.triggered
    }

    /// Wait for the shutdown signal. Safe to race against other futures in a `select!`.
    pub async fn wait_for_shutdown(&mut self) {
        if self.triggered {
            return;
        }
        match self.receiver.recv().await {
            Ok(()) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => log::debug!("Shutdown handle dropped, treating as shutdown"),
        }
        self.triggered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_sees_shutdown() {
        let handle = ShutdownHandle::new();
        let mut listener = handle.new_listener();
        assert!(!listener.should_shutdown());

        handle.shutdown();

        assert!(listener.should_shutdown());
        assert!(listener.should_shutdown());
    }

    #[tokio::test]
    async fn wait_returns_after_shutdown() {
        let handle = ShutdownHandle::new();
        let mut listener = handle.new_listener();

        handle.shutdown();
        listener.wait_for_shutdown().await;

        assert!(listener.should_shutdown());
    }

    #[tokio::test]
    async fn dropped_handle_counts_as_shutdown() {
        let handle = ShutdownHandle::new();
        let mut listener = handle.new_listener();
        drop(handle);

        listener.wait_for_shutdown().await;

        assert!(listener.should_shutdown());
    }
}
