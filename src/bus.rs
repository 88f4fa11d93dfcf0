use std::collections::VecDeque;

use crate::apps::AppId;

/// In-process shell bus.
///
/// Collaborators that want a window opened or closed (start menu, desktop
/// icons, content panes) publish here instead of reaching into the registry;
/// the shell drains the queue once per tick and forwards each request. The
/// window manager itself publishes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    OpenApp(AppId),
    CloseApp(AppId),
}

#[derive(Debug, Default)]
pub struct ShellBus {
    queue: VecDeque<BusEvent>,
}

impl ShellBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: BusEvent) {
        tracing::debug!(?event, "bus publish");
        self.queue.push_back(event);
    }

    /// Drain everything published since the last tick, in publish order.
    pub fn drain(&mut self) -> Vec<BusEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_publish_order() {
        let mut bus = ShellBus::new();
        bus.publish(BusEvent::OpenApp(AppId::Notes));
        bus.publish(BusEvent::OpenApp(AppId::Browser));
        bus.publish(BusEvent::CloseApp(AppId::Notes));
        assert_eq!(
            bus.drain(),
            vec![
                BusEvent::OpenApp(AppId::Notes),
                BusEvent::OpenApp(AppId::Browser),
                BusEvent::CloseApp(AppId::Notes),
            ]
        );
        assert!(bus.is_empty());
    }
}
