use std::sync::Arc;

use tokio::sync::broadcast;

use socialconnect_types::events::Notification;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Fans notifications out to every subscriber (toast surfaces, loggers).
/// Cloning shares the same channel.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    /// Subscribers that fall more than `capacity` events behind see `Lagged`
    broadcast_tx: broadcast::Sender<Notification>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (broadcast_tx, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(DispatcherInner { broadcast_tx }),
        }
    }

    /// Subscribe to notifications. Only events sent after this call are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.broadcast_tx.subscribe()
    }

    /// Send a notification to all current subscribers. Having none is fine.
    pub fn broadcast(&self, event: Notification) {
        let _ = self.inner.broadcast_tx.send(event);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_without_subscribers_is_silent() {
        let dispatcher = Dispatcher::new();
        dispatcher.broadcast(Notification::PostLiked {
            post_id: 1,
            like_count: 1,
        });
    }

    #[test]
    fn clones_share_one_channel() {
        let dispatcher = Dispatcher::with_capacity(8);
        let mut rx = dispatcher.subscribe();

        dispatcher.clone().broadcast(Notification::PostCreated {
            post_id: 5,
            author_id: 3,
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            Notification::PostCreated {
                post_id: 5,
                author_id: 3
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let dispatcher = Dispatcher::with_capacity(0);
        let mut rx = dispatcher.subscribe();
        dispatcher.broadcast(Notification::PostLiked {
            post_id: 1,
            like_count: 2,
        });
        assert!(rx.try_recv().is_ok());
    }
}
