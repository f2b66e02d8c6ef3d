//! Integration tests for the global removal/edit/drag/selection modes.

use mapmode::{
    ClickAction, EditOptions, HostError, LatLng, Layer, LayerId, LayerStore, MapHost, Mode,
    ModeController, PmEvent, PmOptions,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn controller() -> ModeController<LayerStore> {
    ModeController::new(LayerStore::new(7), PmOptions::default())
}

fn square(lat: f64, lng: f64, size: f64) -> Layer {
    Layer::polygon(
        vec![vec![
            LatLng::new(lat, lng),
            LatLng::new(lat, lng + size),
            LatLng::new(lat + size, lng + size),
            LatLng::new(lat + size, lng),
        ]],
        Some("red".into()),
    )
}

fn record<H: MapHost>(c: &mut ModeController<H>) -> Rc<RefCell<Vec<PmEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    c.events_mut().subscribe(Box::new(move |e: &PmEvent| sink.borrow_mut().push(e.clone())));
    seen
}

proptest! {
    #[test]
    fn toggle_parity_per_mode(seq in proptest::collection::vec(0usize..4, 0..40)) {
        let mut c = controller();
        c.add_layer(square(0.0, 0.0, 1.0));
        c.add_layer(Layer::marker(LatLng::new(5.0, 5.0)));

        let mut counts = [0usize; 4];
        for i in seq {
            let mode = Mode::ALL[i];
            match mode {
                Mode::Removal => c.toggle_global_removal_mode(),
                Mode::Edit => c.toggle_global_edit_mode(EditOptions::default()),
                Mode::Drag => c.toggle_global_drag_mode(),
                Mode::Selection => c.toggle_global_selection_mode(),
            }
            counts[i] += 1;

            for (j, m) in Mode::ALL.iter().enumerate() {
                prop_assert_eq!(c.mode_enabled(*m), counts[j] % 2 == 1);
                if *m != Mode::Selection {
                    prop_assert_eq!(c.modes().is_subscribed(*m), c.mode_enabled(*m));
                }
            }
        }
    }
}

#[test]
fn toggled_events_and_buttons() {
    let mut c = controller();
    let seen = record(&mut c);

    c.toggle_global_drag_mode();
    c.toggle_global_removal_mode();
    c.toggle_global_edit_mode(EditOptions::default());
    c.toggle_global_drag_mode();

    assert_eq!(
        *seen.borrow(),
        vec![
            PmEvent::GlobalDragModeToggled { enabled: true, map: 7 },
            PmEvent::GlobalRemovalModeToggled { enabled: true, map: 7 },
            PmEvent::GlobalEditModeToggled { enabled: true, map: 7 },
            PmEvent::GlobalDragModeToggled { enabled: false, map: 7 },
        ]
    );
    assert!(!c.toolbar().button_active("dragMode"));
    assert!(c.toolbar().button_active("deleteLayer"));
    assert!(c.toolbar().button_active("editPolygon"));
}

#[test]
fn drag_mode_reaches_layers_added_later() {
    let mut c = controller();
    let a = c.add_layer(square(0.0, 0.0, 1.0));
    c.enable_global_drag_mode();
    assert!(c.host().drag_enabled(a));

    let b = c.add_layer(square(5.0, 5.0, 1.0));
    assert!(c.host().drag_enabled(b));

    c.disable_global_drag_mode();
    assert!(!c.host().drag_enabled(a));
    assert!(!c.host().drag_enabled(b));
    assert!(!c.modes().listens_for_layer_added());

    let late = c.add_layer(square(9.0, 9.0, 1.0));
    assert!(!c.host().drag_enabled(late));
}

#[test]
fn edit_mode_reaches_layers_added_later_with_same_options() {
    let mut c = controller();
    let opts = EditOptions { snappable: false, ..EditOptions::default() };
    c.enable_global_edit_mode(opts.clone());

    let a = c.add_layer(square(0.0, 0.0, 1.0));
    assert!(c.host().edit_enabled(a));
    assert_eq!(c.host().get(a).and_then(|l| l.edit.clone()), Some(opts));

    c.disable_global_edit_mode();
    let b = c.add_layer(square(3.0, 3.0, 1.0));
    assert!(!c.host().edit_enabled(a));
    assert!(!c.host().edit_enabled(b));
}

#[test]
fn edit_mode_associates_shared_vertices_after_all_layers_enabled() {
    let mut c = controller();
    let a = c.add_layer(square(0.0, 0.0, 1.0));
    let b = c.add_layer(square(0.0, 1.0, 1.0)); // shares an edge with a
    let far = c.add_layer(square(10.0, 10.0, 1.0));

    c.enable_global_edit_mode(EditOptions::default());
    assert_eq!(c.host().shared_with(a), &[b]);
    assert_eq!(c.host().shared_with(b), &[a]);
    assert!(c.host().shared_with(far).is_empty());
}

#[test]
fn removal_mode_click_removes_and_notifies() {
    let mut c = controller();
    let a = c.add_layer(square(0.0, 0.0, 1.0));
    let kept = c.add_layer(square(3.0, 3.0, 1.0).prevent_removal());
    let group = c.add_layer(Layer::group(vec![a]));
    c.enable_global_removal_mode();
    let seen = record(&mut c);

    assert_eq!(c.click_actions(a), vec![ClickAction::Remove]);
    assert!(c.click_actions(kept).is_empty());
    assert!(c.click_actions(group).is_empty());

    c.click(kept);
    assert!(c.host().contains(kept));

    c.click(a);
    assert!(!c.host().contains(a));
    assert_eq!(*seen.borrow(), vec![PmEvent::Remove { layer: a, map: 7 }]);
}

#[test]
fn removal_click_ignores_dragged_layer() {
    let mut c = controller();
    let a = c.add_layer(square(0.0, 0.0, 1.0));
    c.enable_global_removal_mode();
    c.host_mut().set_dragging(a, true);

    c.click(a);
    assert!(c.host().contains(a));

    c.host_mut().set_dragging(a, false);
    c.click(a);
    assert!(!c.host().contains(a));
}

#[test]
fn removal_mode_picks_up_added_layer_and_drops_on_disable() {
    let mut c = controller();
    c.enable_global_removal_mode();
    let a = c.add_layer(Layer::marker(LatLng::new(1.0, 1.0)));
    assert_eq!(c.click_actions(a), vec![ClickAction::Remove]);

    c.disable_global_removal_mode();
    assert!(c.click_actions(a).is_empty());
    let b = c.add_layer(Layer::marker(LatLng::new(2.0, 2.0)));
    assert!(c.click_actions(b).is_empty());
    c.click(a);
    assert!(c.host().contains(a));
}

#[test]
fn resync_is_a_full_disable_enable_cycle() {
    let mut c = controller();
    c.enable_global_drag_mode();
    c.enable_global_removal_mode();
    let seen = record(&mut c);

    c.add_layer(square(0.0, 0.0, 1.0));
    assert_eq!(
        *seen.borrow(),
        vec![
            PmEvent::GlobalRemovalModeToggled { enabled: false, map: 7 },
            PmEvent::GlobalRemovalModeToggled { enabled: true, map: 7 },
            PmEvent::GlobalDragModeToggled { enabled: false, map: 7 },
            PmEvent::GlobalDragModeToggled { enabled: true, map: 7 },
        ]
    );
    assert!(c.global_drag_mode_enabled() && c.global_removal_enabled());
}

#[test]
fn irrelevant_layers_do_not_trigger_resync() {
    let mut c = controller();
    c.enable_global_drag_mode();
    let seen = record(&mut c);

    let temp = c.add_layer(square(0.0, 0.0, 1.0).transient());
    let plain = c.add_layer(square(2.0, 2.0, 1.0).unmanaged());
    c.add_layer(Layer::tile());

    assert!(seen.borrow().is_empty());
    assert!(!c.host().drag_enabled(temp));
    assert!(!c.host().drag_enabled(plain));
}

#[test]
fn host_added_layer_needs_notification() {
    let mut c = controller();
    c.enable_global_drag_mode();
    let id = c.host_mut().insert(square(0.0, 0.0, 1.0));
    assert!(!c.host().drag_enabled(id));
    c.layer_added(id);
    assert!(c.host().drag_enabled(id));
}

#[test]
fn leaving_selection_mode_keeps_removal_listeners() {
    let mut c = controller();
    let a = c.add_layer(square(0.0, 0.0, 1.0));
    c.enable_global_removal_mode();
    c.toggle_global_selection_mode();
    assert_eq!(c.click_actions(a), vec![ClickAction::Remove, ClickAction::ToggleSelect]);

    c.toggle_global_selection_mode();
    assert_eq!(c.click_actions(a), vec![ClickAction::Remove]);
}

/// Host whose drag behavior reports one layer as gone although it is still listed
struct FlakyHost {
    inner: LayerStore,
    vanished: Option<LayerId>,
}

impl MapHost for FlakyHost {
    fn map_id(&self) -> u32 {
        self.inner.map_id()
    }
    fn layer_ids(&self) -> Vec<LayerId> {
        self.inner.layer_ids()
    }
    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.inner.layer(id)
    }
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.inner.add_layer(layer)
    }
    fn remove_layer(&mut self, id: LayerId) -> Result<Layer, HostError> {
        self.inner.remove_layer(id)
    }
    fn set_color(&mut self, id: LayerId, color: &mapmode::Color) -> Result<(), HostError> {
        self.inner.set_color(id, color)
    }
    fn enable_layer_edit(&mut self, id: LayerId, options: &EditOptions) -> Result<(), HostError> {
        self.inner.enable_layer_edit(id, options)
    }
    fn disable_layer_edit(&mut self, id: LayerId) -> Result<(), HostError> {
        self.inner.disable_layer_edit(id)
    }
    fn associate_shared_vertices(&mut self, id: LayerId) -> Result<(), HostError> {
        self.inner.associate_shared_vertices(id)
    }
    fn enable_layer_drag(&mut self, id: LayerId) -> Result<(), HostError> {
        if Some(id) == self.vanished {
            return Err(HostError::LayerNotFound(id));
        }
        self.inner.enable_layer_drag(id)
    }
    fn disable_layer_drag(&mut self, id: LayerId) -> Result<(), HostError> {
        if Some(id) == self.vanished {
            return Err(HostError::LayerNotFound(id));
        }
        self.inner.disable_layer_drag(id)
    }
    fn is_dragging(&self, id: LayerId) -> bool {
        self.inner.is_dragging(id)
    }
}

#[test]
fn vanished_layer_is_skipped_without_aborting() {
    let mut store = LayerStore::new(1);
    let a = store.insert(square(0.0, 0.0, 1.0));
    let gone = store.insert(square(2.0, 2.0, 1.0));
    let b = store.insert(square(4.0, 4.0, 1.0));
    let mut c = ModeController::new(FlakyHost { inner: store, vanished: Some(gone) }, PmOptions::default());

    c.toggle_global_drag_mode();
    assert!(c.global_drag_mode_enabled());
    assert!(c.host().inner.drag_enabled(a));
    assert!(!c.host().inner.drag_enabled(gone));
    assert!(c.host().inner.drag_enabled(b));

    c.toggle_global_drag_mode();
    assert!(!c.global_drag_mode_enabled());
    assert!(!c.host().inner.drag_enabled(a));
    assert!(!c.host().inner.drag_enabled(b));
}
