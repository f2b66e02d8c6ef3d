//! Per-layer click listeners attached by the modes.

use crate::model::LayerId;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickAction {
    Remove,
    ToggleSelect,
}

/// Listeners per layer, kept in attach order. Attaching twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ClickListeners {
    by_layer: HashMap<LayerId, Vec<ClickAction>>,
}

impl ClickListeners {
    pub fn on(&mut self, layer: LayerId, action: ClickAction) -> bool {
        let actions = self.by_layer.entry(layer).or_default();
        if actions.contains(&action) {
            return false;
        }
        actions.push(action);
        true
    }

    pub fn off(&mut self, layer: LayerId, action: ClickAction) -> bool {
        let Some(actions) = self.by_layer.get_mut(&layer) else { return false };
        let before = actions.len();
        actions.retain(|&a| a != action);
        let removed = actions.len() != before;
        if actions.is_empty() {
            self.by_layer.remove(&layer);
        }
        removed
    }

    /// Detach `action` from every layer
    pub fn off_all(&mut self, action: ClickAction) {
        self.by_layer.retain(|_, actions| {
            actions.retain(|&a| a != action);
            !actions.is_empty()
        });
    }

    pub fn actions(&self, layer: LayerId) -> Vec<ClickAction> {
        self.by_layer.get(&layer).cloned().unwrap_or_default()
    }

    /// Drop everything attached to a layer that left the map
    pub fn forget(&mut self, layer: LayerId) {
        self.by_layer.remove(&layer);
    }
}
