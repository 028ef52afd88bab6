use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::ProfileId;
use crate::types::{ViewId, WindowId};

/// Shell-level lifecycle events, published after the state change is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    WindowOpened(WindowId),
    WindowClosed(WindowId),
    ViewOpened { window: WindowId, view: ViewId },
    ViewClosed { window: WindowId, view: ViewId },
    ViewSelected { window: WindowId, view: ViewId },
    SettingsUpdated(ProfileId),
    ProfileCreated(ProfileId),
    ProfileDeleted(ProfileId),
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::WindowOpened(WindowId(1)));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::WindowOpened(WindowId(1))));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[tokio::test]
    async fn view_events_keep_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let window = WindowId(1);

        bus.publish(Event::ViewOpened {
            window,
            view: ViewId(3),
        });
        bus.publish(Event::ViewSelected {
            window,
            view: ViewId(3),
        });
        bus.publish(Event::ViewClosed {
            window,
            view: ViewId(3),
        });

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, Event::ViewOpened { view: ViewId(3), .. }));
        let e2 = rx.recv().await.unwrap();
        assert!(matches!(e2, Event::ViewSelected { view: ViewId(3), .. }));
        let e3 = rx.recv().await.unwrap();
        assert!(matches!(e3, Event::ViewClosed { view: ViewId(3), .. }));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.publish(Event::SettingsUpdated(ProfileId::from("p"))), 2);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
