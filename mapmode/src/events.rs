//! Notifications emitted to host application code.

use crate::model::{LayerId, MapId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PmEvent {
    GlobalDragModeToggled { enabled: bool, map: MapId },
    GlobalRemovalModeToggled { enabled: bool, map: MapId },
    GlobalEditModeToggled { enabled: bool, map: MapId },
    /// A layer was deleted by the removal click handler
    Remove { layer: LayerId, map: MapId },
}

impl PmEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PmEvent::GlobalDragModeToggled { .. } => "pm:globaldragmodetoggled",
            PmEvent::GlobalRemovalModeToggled { .. } => "pm:globalremovalmodetoggled",
            PmEvent::GlobalEditModeToggled { .. } => "pm:globaleditmodetoggled",
            PmEvent::Remove { .. } => "pm:remove",
        }
    }
}

pub type ListenerId = u32;

type Listener = Box<dyn FnMut(&PmEvent)>;

/// Synchronous fan-out of `PmEvent`s in subscription order
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: ListenerId,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn FnMut(&PmEvent)>) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: PmEvent) {
        log::trace!("emit {}", event.name());
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listeners.len()).finish()
    }
}
