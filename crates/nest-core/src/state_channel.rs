//! Single-slot publish/subscribe for "latest value wins" state.
//!
//! Publishing replaces whatever value was held; subscribers never see a
//! backlog, only the most recent state. No async runtime is needed to
//! publish or to poll.

use tokio::sync::watch;

#[derive(Debug)]
pub struct StateChannel<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> StateChannel<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replaces the held value and marks it changed for every subscriber.
    pub fn publish(&self, value: T) {
        self.sender.send_replace(value);
    }

    pub fn latest(&self) -> T {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> StateReceiver<T> {
        StateReceiver {
            inner: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Observer handle returned by [`StateChannel::subscribe`].
#[derive(Debug, Clone)]
pub struct StateReceiver<T> {
    inner: watch::Receiver<T>,
}

impl<T: Clone> StateReceiver<T> {
    pub fn latest(&self) -> T {
        self.inner.borrow().clone()
    }

    /// `true` when a value was published since this receiver last looked.
    pub fn has_changed(&self) -> bool {
        self.inner.has_changed().unwrap_or(false)
    }

    /// Returns the newest value if it has not been seen yet.
    pub fn take_update(&mut self) -> Option<T> {
        if self.has_changed() {
            Some(self.inner.borrow_and_update().clone())
        } else {
            None
        }
    }
}
