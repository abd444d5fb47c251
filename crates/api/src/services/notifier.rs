use medsync_core::errors::{ClinicError, ClinicResult};
use medsync_core::models::appointment::ScheduleSnapshot;
use tokio::sync::broadcast;
use tracing::debug;

pub type SnapshotSender = broadcast::Sender<String>;
pub type SnapshotReceiver = broadcast::Receiver<String>;

const DEFAULT_CAPACITY: usize = 100;

/// Fans the serialized schedule out to every websocket subscriber.
///
/// Delivery is at-most-once: a receiver that falls more than the channel
/// capacity behind loses the oldest messages.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: SnapshotSender,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns how many subscribers the message was queued for.
    pub fn publish(&self, snapshot: &ScheduleSnapshot) -> ClinicResult<usize> {
        let message =
            serde_json::to_string(snapshot).map_err(|err| ClinicError::Internal(Box::new(err)))?;

        match self.sender.send(message) {
            Ok(delivered) => {
                debug!("Broadcast schedule to {} subscribers", delivered);
                Ok(delivered)
            }
            Err(_) => {
                debug!("No subscribers for schedule update");
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let notifier = Notifier::default();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        let delivered = notifier.publish(&ScheduleSnapshot::default()).unwrap();
        assert_eq!(delivered, 2);

        let expected = r#"{"appointments":[],"resolvedSchedule":[]}"#;
        assert_eq!(first.recv().await.unwrap(), expected);
        assert_eq!(second.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_publish_without_subscribers_is_not_an_error() {
        let notifier = Notifier::default();
        assert_eq!(notifier.subscriber_count(), 0);
        assert_eq!(notifier.publish(&ScheduleSnapshot::default()).unwrap(), 0);
    }
}
