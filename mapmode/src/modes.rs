//! Global mode flags and their layer-added subscriptions.

use crate::events::PmEvent;
use crate::model::MapId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Removal,
    Edit,
    Drag,
    Selection,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Removal, Mode::Edit, Mode::Drag, Mode::Selection];

    /// Modes re-applied when a layer is added, in re-application order
    pub const RESYNCED: [Mode; 3] = [Mode::Removal, Mode::Edit, Mode::Drag];

    /// Toolbar button reflecting the mode
    pub fn button(self) -> Option<&'static str> {
        match self {
            Mode::Removal => Some("deleteLayer"),
            Mode::Edit => Some("editPolygon"),
            Mode::Drag => Some("dragMode"),
            Mode::Selection => None,
        }
    }

    pub fn toggled_event(self, enabled: bool, map: MapId) -> Option<PmEvent> {
        match self {
            Mode::Removal => Some(PmEvent::GlobalRemovalModeToggled { enabled, map }),
            Mode::Edit => Some(PmEvent::GlobalEditModeToggled { enabled, map }),
            Mode::Drag => Some(PmEvent::GlobalDragModeToggled { enabled, map }),
            Mode::Selection => None,
        }
    }

    fn listens_for_layer_added(self) -> bool {
        self != Mode::Selection
    }
}

/// One controller's mode flags.
///
/// A mode's flag and its layer-added subscription change together, so for
/// every resynced mode `is_enabled(m) == is_subscribed(m)` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeState {
    enabled: BTreeSet<Mode>,
    layer_added: BTreeSet<Mode>,
}

impl ModeState {
    pub fn new() -> Self {
        ModeState::default()
    }

    pub fn is_enabled(&self, mode: Mode) -> bool {
        self.enabled.contains(&mode)
    }

    pub fn is_subscribed(&self, mode: Mode) -> bool {
        self.layer_added.contains(&mode)
    }

    /// Whether any mode needs the layer-added notification
    pub fn listens_for_layer_added(&self) -> bool {
        !self.layer_added.is_empty()
    }

    /// Returns false when the mode was already enabled
    pub(crate) fn enable(&mut self, mode: Mode) -> bool {
        if mode.listens_for_layer_added() {
            self.layer_added.insert(mode);
        }
        self.enabled.insert(mode)
    }

    /// Returns false when the mode was already disabled
    pub(crate) fn disable(&mut self, mode: Mode) -> bool {
        self.layer_added.remove(&mode);
        self.enabled.remove(&mode)
    }

    pub fn enabled_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.enabled.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_tracks_subscription() {
        let mut state = ModeState::new();
        assert!(state.enable(Mode::Drag));
        assert!(!state.enable(Mode::Drag));
        assert!(state.is_enabled(Mode::Drag) && state.is_subscribed(Mode::Drag));
        assert!(state.listens_for_layer_added());

        assert!(state.disable(Mode::Drag));
        assert!(!state.disable(Mode::Drag));
        assert!(!state.is_subscribed(Mode::Drag));
        assert!(!state.listens_for_layer_added());
    }

    #[test]
    fn test_selection_never_subscribes() {
        let mut state = ModeState::new();
        state.enable(Mode::Selection);
        assert!(state.is_enabled(Mode::Selection));
        assert!(!state.listens_for_layer_added());
    }

    #[test]
    fn test_buttons() {
        assert_eq!(Mode::Drag.button(), Some("dragMode"));
        assert_eq!(Mode::Removal.button(), Some("deleteLayer"));
        assert_eq!(Mode::Edit.button(), Some("editPolygon"));
        assert_eq!(Mode::Selection.button(), None);
    }
}
