//! Selection mode: per-layer selected flag and pre-highlight color.

use crate::click::ClickAction;
use crate::controller::{skipped, ModeController};
use crate::host::{Draw, MapHost, Toolbar};
use crate::model::{Color, Layer, LayerId};
use crate::modes::Mode;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct LayerMark {
    /// Captured on first selection-mode entry; kept for the layer's life
    original_color: Option<Color>,
    selected: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    marks: HashMap<LayerId, LayerMark>,
}

impl SelectionTracker {
    pub fn is_selected(&self, id: LayerId) -> bool {
        self.marks.get(&id).is_some_and(|m| m.selected)
    }

    pub fn original_color(&self, id: LayerId) -> Option<&Color> {
        self.marks.get(&id).and_then(|m| m.original_color.as_ref())
    }

    /// Record the layer's color unless one is already known
    pub fn capture(&mut self, id: LayerId, layer: &Layer) {
        let mark = self.marks.entry(id).or_default();
        if mark.original_color.is_none() {
            mark.original_color = layer.base_color().cloned();
        }
    }

    pub fn stamp(&mut self, id: LayerId, color: Option<Color>) {
        self.marks.entry(id).or_default().original_color = color;
    }

    /// Flip the selected flag; returns the color to paint, if known
    pub fn flip(&mut self, id: LayerId, highlight: &Color) -> Option<Color> {
        let mark = self.marks.entry(id).or_default();
        mark.selected = !mark.selected;
        if mark.selected {
            Some(highlight.clone())
        } else {
            mark.original_color.clone()
        }
    }

    /// Clear every selected flag; returns the layers with a color to restore
    pub fn reset_all(&mut self) -> Vec<(LayerId, Color)> {
        let mut restore: Vec<(LayerId, Color)> = self
            .marks
            .iter_mut()
            .filter_map(|(&id, mark)| {
                mark.selected = false;
                mark.original_color.clone().map(|c| (id, c))
            })
            .collect();
        restore.sort_by_key(|(id, _)| *id);
        restore
    }

    pub fn forget(&mut self, id: LayerId) {
        self.marks.remove(&id);
    }
}

impl<H: MapHost, T: Toolbar, D: Draw> ModeController<H, T, D> {
    pub fn global_selection_enabled(&self) -> bool {
        self.modes.is_enabled(Mode::Selection)
    }

    pub fn toggle_global_selection_mode(&mut self) {
        self.toggle_mode(Mode::Selection);
    }

    pub fn enable_global_selection_mode(&mut self) {
        self.modes.enable(Mode::Selection);
        for id in self.find_layers() {
            if let Some(layer) = self.host.layer(id) {
                self.selection.capture(id, layer);
                self.clicks.on(id, ClickAction::ToggleSelect);
            }
        }
    }

    /// Unselect everything, restore original colors, detach the selection listeners
    pub fn disable_global_selection_mode(&mut self) {
        self.modes.disable(Mode::Selection);
        for (id, color) in self.selection.reset_all() {
            if self.host.layer(id).is_none() {
                continue;
            }
            if let Err(e) = self.host.set_color(id, &color) {
                skipped("restore color", e);
            }
        }
        self.clicks.off_all(ClickAction::ToggleSelect);
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn original_color(&self, id: LayerId) -> Option<&Color> {
        self.selection.original_color(id)
    }

    /// Selected managed layers in registry order
    pub fn selected_layers(&self) -> Vec<LayerId> {
        self.find_layers()
            .into_iter()
            .filter(|&id| self.selection.is_selected(id))
            .collect()
    }

    pub(crate) fn toggle_selected(&mut self, id: LayerId) {
        let Some(color) = self.selection.flip(id, &self.options.highlight_color) else { return };
        if let Err(e) = self.host.set_color(id, &color) {
            skipped("paint selection", e);
        }
    }
}
