//! Global interaction modes applied across every managed layer of one map.

use crate::click::{ClickAction, ClickListeners};
use crate::config::PmOptions;
use crate::error::{HostError, ShapeError};
use crate::events::{EventBus, PmEvent};
use crate::host::{Draw, DrawOptions, EditOptions, MapHost, Shape, Toolbar, ToolbarOptions};
use crate::modes::{Mode, ModeState};
use crate::model::{Layer, LayerId, PathStyle};
use crate::registry::{find_managed_layers, is_relevant, is_removal_eligible};
use crate::selection::SelectionTracker;
use crate::store::{DrawRecorder, MemoryToolbar};

/// Owns the mode state of one map and drives its host, toolbar and draw tool.
///
/// Every operation runs to completion before returning. A layer that vanishes
/// between enumeration and action is skipped; the rest of the operation proceeds.
pub struct ModeController<H: MapHost, T: Toolbar = MemoryToolbar, D: Draw = DrawRecorder> {
    pub(crate) host: H,
    toolbar: T,
    draw: D,
    pub(crate) modes: ModeState,
    pub(crate) clicks: ClickListeners,
    pub(crate) selection: SelectionTracker,
    events: EventBus,
    pub(crate) options: PmOptions,
    edit_options: EditOptions,
}

pub(crate) fn skipped(action: &str, err: HostError) {
    log::debug!("{} skipped: {}", action, err);
}

impl<H: MapHost> ModeController<H> {
    pub fn new(host: H, options: PmOptions) -> Self {
        ModeController::with_collaborators(host, MemoryToolbar::default(), DrawRecorder::default(), options)
    }
}

impl<H: MapHost, T: Toolbar, D: Draw> ModeController<H, T, D> {
    pub fn with_collaborators(host: H, toolbar: T, draw: D, options: PmOptions) -> Self {
        let edit_options = options.edit.clone();
        ModeController {
            host,
            toolbar,
            draw,
            modes: ModeState::new(),
            clicks: ClickListeners::default(),
            selection: SelectionTracker::default(),
            events: EventBus::new(),
            options,
            edit_options,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct host access. Layers added this way must be announced with `layer_added`.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn toolbar(&self) -> &T {
        &self.toolbar
    }

    pub fn draw(&self) -> &D {
        &self.draw
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }

    pub fn options(&self) -> &PmOptions {
        &self.options
    }

    /// Click listeners currently attached to a layer, in attach order
    pub fn click_actions(&self, id: LayerId) -> Vec<ClickAction> {
        self.clicks.actions(id)
    }

    pub fn find_layers(&self) -> Vec<LayerId> {
        find_managed_layers(&self.host)
    }

    // Layer membership

    /// Add a layer to the map and dispatch the layer-added notification
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = self.host.add_layer(layer);
        self.layer_added(id);
        id
    }

    /// Layer-added notification. No-op unless a mode is subscribed.
    pub fn layer_added(&mut self, id: LayerId) {
        if !self.modes.listens_for_layer_added() {
            return;
        }
        self.resync_active_modes(id);
    }

    /// Forget per-layer bookkeeping for a layer the host removed
    pub fn layer_removed(&mut self, id: LayerId) {
        self.clicks.forget(id);
        self.selection.forget(id);
    }

    /// Re-apply every active mode from scratch so `new_layer` picks it up
    pub fn resync_active_modes(&mut self, new_layer: LayerId) {
        if !self.host.layer(new_layer).is_some_and(is_relevant) {
            return;
        }
        for mode in Mode::RESYNCED {
            if self.modes.is_enabled(mode) {
                log::debug!("resync {:?} mode for layer {}", mode, new_layer);
                self.disable_mode(mode);
                self.enable_mode(mode);
            }
        }
    }

    fn announce(&mut self, mode: Mode, enabled: bool) {
        if let Some(button) = mode.button() {
            self.toolbar.toggle_button(button, enabled);
        }
        if let Some(event) = mode.toggled_event(enabled, self.host.map_id()) {
            self.events.emit(event);
        }
    }

    // Generic mode entry points

    pub fn mode_enabled(&self, mode: Mode) -> bool {
        self.modes.is_enabled(mode)
    }

    /// Enable a mode; edit mode reuses the options of its last enable
    pub fn enable_mode(&mut self, mode: Mode) {
        match mode {
            Mode::Removal => self.enable_global_removal_mode(),
            Mode::Edit => self.enable_global_edit_mode(self.edit_options.clone()),
            Mode::Drag => self.enable_global_drag_mode(),
            Mode::Selection => self.enable_global_selection_mode(),
        }
    }

    pub fn disable_mode(&mut self, mode: Mode) {
        match mode {
            Mode::Removal => self.disable_global_removal_mode(),
            Mode::Edit => self.disable_global_edit_mode(),
            Mode::Drag => self.disable_global_drag_mode(),
            Mode::Selection => self.disable_global_selection_mode(),
        }
    }

    pub fn toggle_mode(&mut self, mode: Mode) {
        if self.modes.is_enabled(mode) {
            self.disable_mode(mode);
        } else {
            self.enable_mode(mode);
        }
    }

    // Removal mode

    pub fn global_removal_enabled(&self) -> bool {
        self.modes.is_enabled(Mode::Removal)
    }

    pub fn enable_global_removal_mode(&mut self) {
        self.modes.enable(Mode::Removal);
        for id in self.host.layer_ids() {
            if self.host.layer(id).is_some_and(is_removal_eligible) {
                self.clicks.on(id, ClickAction::Remove);
            }
        }
        self.announce(Mode::Removal, true);
    }

    pub fn disable_global_removal_mode(&mut self) {
        self.modes.disable(Mode::Removal);
        self.clicks.off_all(ClickAction::Remove);
        self.announce(Mode::Removal, false);
    }

    pub fn toggle_global_removal_mode(&mut self) {
        self.toggle_mode(Mode::Removal);
    }

    // Edit mode

    pub fn global_edit_enabled(&self) -> bool {
        self.modes.is_enabled(Mode::Edit)
    }

    pub fn enable_global_edit_mode(&mut self, options: EditOptions) {
        let layers = self.find_layers();
        self.modes.enable(Mode::Edit);
        self.edit_options = options;

        for &id in &layers {
            if let Err(e) = self.host.enable_layer_edit(id, &self.edit_options) {
                skipped("enable edit", e);
            }
        }
        // Association reads the edit state of the other layers, so it runs
        // only after every layer is in edit mode.
        for &id in &layers {
            if let Err(e) = self.host.associate_shared_vertices(id) {
                skipped("associate shared vertices", e);
            }
        }

        self.announce(Mode::Edit, true);
    }

    pub fn disable_global_edit_mode(&mut self) {
        let layers = self.find_layers();
        self.modes.disable(Mode::Edit);
        for id in layers {
            if let Err(e) = self.host.disable_layer_edit(id) {
                skipped("disable edit", e);
            }
        }
        self.announce(Mode::Edit, false);
    }

    pub fn toggle_global_edit_mode(&mut self, options: EditOptions) {
        if self.global_edit_enabled() {
            self.disable_global_edit_mode();
        } else {
            self.enable_global_edit_mode(options);
        }
    }

    // Drag mode

    pub fn global_drag_mode_enabled(&self) -> bool {
        self.modes.is_enabled(Mode::Drag)
    }

    pub fn enable_global_drag_mode(&mut self) {
        let layers = self.find_layers();
        self.modes.enable(Mode::Drag);
        for id in layers {
            if let Err(e) = self.host.enable_layer_drag(id) {
                skipped("enable drag", e);
            }
        }
        self.announce(Mode::Drag, true);
    }

    pub fn disable_global_drag_mode(&mut self) {
        let layers = self.find_layers();
        self.modes.disable(Mode::Drag);
        for id in layers {
            if let Err(e) = self.host.disable_layer_drag(id) {
                skipped("disable drag", e);
            }
        }
        self.announce(Mode::Drag, false);
    }

    pub fn toggle_global_drag_mode(&mut self) {
        self.toggle_mode(Mode::Drag);
    }

    // Clicks

    /// Dispatch a click on a layer to its attached listeners
    pub fn click(&mut self, id: LayerId) {
        for action in self.clicks.actions(id) {
            if self.host.layer(id).is_none() {
                break;
            }
            match action {
                ClickAction::Remove => self.remove_on_click(id),
                ClickAction::ToggleSelect => self.toggle_selected(id),
            }
        }
    }

    fn remove_on_click(&mut self, id: LayerId) {
        let Some(layer) = self.host.layer(id) else { return };
        if layer.temp || self.host.is_dragging(id) {
            return;
        }
        match self.host.remove_layer(id) {
            Ok(_) => {
                self.layer_removed(id);
                let map = self.host.map_id();
                self.events.emit(PmEvent::Remove { layer: id, map });
            }
            Err(e) => skipped("remove layer", e),
        }
    }

    // Toolbar and draw tool

    pub fn add_controls(&mut self, options: &ToolbarOptions) {
        self.toolbar.add_controls(options);
    }

    pub fn remove_controls(&mut self) {
        self.toolbar.remove_controls();
    }

    pub fn toggle_controls(&mut self) {
        self.toolbar.toggle_controls();
    }

    pub fn controls_visible(&self) -> bool {
        self.toolbar.is_visible()
    }

    /// Start drawing `shape` ("Poly" is accepted for "Polygon")
    pub fn enable_draw(&mut self, shape: &str, options: &DrawOptions) -> Result<Shape, ShapeError> {
        let shape: Shape = shape.parse()?;
        self.draw.enable(shape, options);
        Ok(shape)
    }

    pub fn disable_draw(&mut self, shape: &str) -> Result<Shape, ShapeError> {
        let shape: Shape = shape.parse()?;
        self.draw.disable(shape);
        Ok(shape)
    }

    pub fn set_path_options(&mut self, options: PathStyle) {
        self.draw.set_path_options(&options);
    }
}
