//! Load-complete notification fan-out.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Message sent to channel subscribers once a load has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadComplete;

/// Observer callback. Runs synchronously on the loading thread.
pub type LoadObserver = Box<dyn Fn() + Send + Sync>;

/// Publishes [`LoadComplete`] to observers and channel subscribers.
///
/// Observers run in registration order, before channel subscribers are
/// sent to. Subscribers whose receiver was dropped are pruned on publish.
#[derive(Default)]
pub struct LoadNotifier {
    observers: Vec<LoadObserver>,
    subscribers: Vec<UnboundedSender<LoadComplete>>,
}

impl LoadNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback run on every publish.
    pub fn on_load_complete(&mut self, observer: impl Fn() + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Opens a channel that receives one message per publish.
    pub fn subscribe(&mut self) -> UnboundedReceiver<LoadComplete> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self) {
        for observer in &self.observers {
            observer();
        }

        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(LoadComplete).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            tracing::debug!("[LoadNotifier] Pruned {} closed subscriber(s)", dropped);
        }
    }
}

impl std::fmt::Debug for LoadNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadNotifier")
            .field("observers", &self.observers.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
