//! Cart change notifications.
//!
//! A deliberately payloadless signal: subscribers re-read the cart through
//! the manager's getters instead of trusting event data. Fan-out is
//! tab-local and best-effort; dead subscribers are dropped on publish.

use std::sync::{Mutex, mpsc};
use std::time::Duration;

/// Marker sent on every cart mutation. Carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChanged;

/// Receiving end of the cart's change channel.
#[derive(Debug)]
pub struct CartSubscription {
    receiver: mpsc::Receiver<CartChanged>,
}

impl CartSubscription {
    pub(crate) fn new(receiver: mpsc::Receiver<CartChanged>) -> Self {
        Self { receiver }
    }

    /// Non-blocking poll for a pending notification.
    pub fn try_recv(&self) -> Result<CartChanged, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Wait up to `timeout` for the next notification.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<CartChanged, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Subscriber list owned by the cart manager.
#[derive(Debug, Default)]
pub(crate) struct ChangeChannel {
    subscribers: Mutex<Vec<mpsc::Sender<CartChanged>>>,
}

impl ChangeChannel {
    pub(crate) fn subscribe(&self) -> CartSubscription {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        CartSubscription::new(rx)
    }

    pub(crate) fn publish(&self) {
        let Ok(mut subs) = self.subscribers.lock() else {
            tracing::warn!("cart change channel poisoned; notification dropped");
            return;
        };
        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(CartChanged).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_a_published_signal() {
        let channel = ChangeChannel::default();
        let a = channel.subscribe();
        let b = channel.subscribe();

        channel.publish();

        assert_eq!(a.try_recv().unwrap(), CartChanged);
        assert_eq!(b.try_recv().unwrap(), CartChanged);
    }

    #[test]
    fn dropped_subscribers_do_not_block_publishing() {
        let channel = ChangeChannel::default();
        let kept = channel.subscribe();
        drop(channel.subscribe());

        channel.publish();
        channel.publish();

        assert!(kept.try_recv().is_ok());
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn no_signal_without_a_publish() {
        let channel = ChangeChannel::default();
        let sub = channel.subscribe();
        assert!(sub.try_recv().is_err());
    }
}
