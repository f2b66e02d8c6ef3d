//! In-memory host map, toolbar and draw tool. Used by the wasm binding and by tests.

use crate::error::HostError;
use crate::host::{Draw, DrawOptions, EditOptions, MapHost, Shape, Toolbar, ToolbarOptions};
use crate::model::{Color, LatLng, Layer, LayerId, MapId, PathStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A layer on the map plus the state of its low-level edit/drag behaviors
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredLayer {
    pub layer: Layer,
    pub edit: Option<EditOptions>,
    pub drag: bool,
    pub dragging: bool,
    pub shared_with: Vec<LayerId>,
}

impl StoredLayer {
    fn new(layer: Layer) -> Self {
        StoredLayer { layer, edit: None, drag: false, dragging: false, shared_with: Vec::new() }
    }
}

/// Layers keyed by id; ids are never reused
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LayerStore {
    map_id: MapId,
    layers: Vec<Option<StoredLayer>>, // id is index
}

impl LayerStore {
    pub fn new(map_id: MapId) -> Self {
        LayerStore { map_id, layers: Vec::new() }
    }

    /// Put a layer on the map without notifying anyone
    pub fn insert(&mut self, layer: Layer) -> LayerId {
        let id = self.layers.len() as LayerId;
        self.layers.push(Some(StoredLayer::new(layer)));
        id
    }

    pub fn get(&self, id: LayerId) -> Option<&StoredLayer> {
        self.layers.get(id as usize).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, id: LayerId) -> Result<&mut StoredLayer, HostError> {
        self.layers
            .get_mut(id as usize)
            .and_then(|slot| slot.as_mut())
            .ok_or(HostError::LayerNotFound(id))
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.layers.iter().filter(|l| l.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn edit_enabled(&self, id: LayerId) -> bool {
        self.get(id).is_some_and(|l| l.edit.is_some())
    }

    pub fn drag_enabled(&self, id: LayerId) -> bool {
        self.get(id).is_some_and(|l| l.drag)
    }

    pub fn shared_with(&self, id: LayerId) -> &[LayerId] {
        self.get(id).map_or(&[], |l| l.shared_with.as_slice())
    }

    pub fn color(&self, id: LayerId) -> Option<&Color> {
        self.get(id).and_then(|l| l.layer.style.color.as_ref())
    }

    /// Mark a layer as being dragged by the user
    pub fn set_dragging(&mut self, id: LayerId, dragging: bool) -> bool {
        match self.get_mut(id) {
            Ok(l) => {
                l.dragging = dragging;
                true
            }
            Err(_) => false,
        }
    }

    fn unlink(&mut self, id: LayerId) {
        for other in self.layers.iter_mut().flatten() {
            other.shared_with.retain(|&s| s != id);
        }
    }
}

fn shares_vertex(a: &[LatLng], b: &[LatLng]) -> bool {
    a.iter().any(|p| b.iter().any(|q| p == q))
}

impl MapHost for LayerStore {
    fn map_id(&self) -> MapId {
        self.map_id
    }

    fn layer_ids(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.as_ref().map(|_| i as LayerId))
            .collect()
    }

    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.get(id).map(|l| &l.layer)
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.insert(layer)
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<Layer, HostError> {
        let stored = self
            .layers
            .get_mut(id as usize)
            .and_then(|slot| slot.take())
            .ok_or(HostError::LayerNotFound(id))?;
        self.unlink(id);
        Ok(stored.layer)
    }

    fn set_color(&mut self, id: LayerId, color: &Color) -> Result<(), HostError> {
        let l = self.get_mut(id)?;
        l.layer.style.color = Some(color.clone());
        Ok(())
    }

    fn enable_layer_edit(&mut self, id: LayerId, options: &EditOptions) -> Result<(), HostError> {
        let l = self.get_mut(id)?;
        if !l.layer.kind.is_geometry() {
            return Err(HostError::Unsupported(id, "edit"));
        }
        l.edit = Some(options.clone());
        Ok(())
    }

    fn disable_layer_edit(&mut self, id: LayerId) -> Result<(), HostError> {
        let l = self.get_mut(id)?;
        l.edit = None;
        l.shared_with.clear();
        self.unlink(id);
        Ok(())
    }

    fn associate_shared_vertices(&mut self, id: LayerId) -> Result<(), HostError> {
        let stored = self.get(id).ok_or(HostError::LayerNotFound(id))?;
        if stored.edit.is_none() {
            return Err(HostError::EditNotEnabled(id));
        }
        let own = stored.layer.geometry.vertices();

        let mut partners = Vec::new();
        for (i, other) in self.layers.iter().enumerate() {
            let Some(other) = other else { continue };
            let oid = i as LayerId;
            if oid == id || other.edit.is_none() {
                continue;
            }
            if shares_vertex(&own, &other.layer.geometry.vertices()) {
                partners.push(oid);
            }
        }

        for &p in &partners {
            let other = self.get_mut(p)?;
            if !other.shared_with.contains(&id) {
                other.shared_with.push(id);
            }
        }
        let l = self.get_mut(id)?;
        for p in partners {
            if !l.shared_with.contains(&p) {
                l.shared_with.push(p);
            }
        }
        Ok(())
    }

    fn enable_layer_drag(&mut self, id: LayerId) -> Result<(), HostError> {
        let l = self.get_mut(id)?;
        if !l.layer.kind.is_geometry() {
            return Err(HostError::Unsupported(id, "drag"));
        }
        l.drag = true;
        Ok(())
    }

    fn disable_layer_drag(&mut self, id: LayerId) -> Result<(), HostError> {
        let l = self.get_mut(id)?;
        l.drag = false;
        l.dragging = false;
        Ok(())
    }

    fn is_dragging(&self, id: LayerId) -> bool {
        self.get(id).is_some_and(|l| l.dragging)
    }
}

/// Toolbar that only remembers button states and visibility
#[derive(Clone, Debug, Default)]
pub struct MemoryToolbar {
    pub buttons: BTreeMap<String, bool>,
    pub options: Option<ToolbarOptions>,
    pub visible: bool,
}

impl MemoryToolbar {
    pub fn button_active(&self, name: &str) -> bool {
        self.buttons.get(name).copied().unwrap_or(false)
    }
}

impl Toolbar for MemoryToolbar {
    fn toggle_button(&mut self, name: &str, active: bool) {
        self.buttons.insert(name.to_string(), active);
    }

    fn add_controls(&mut self, options: &ToolbarOptions) {
        self.options = Some(options.clone());
        self.visible = true;
    }

    fn remove_controls(&mut self) {
        self.visible = false;
    }

    fn toggle_controls(&mut self) {
        self.visible = !self.visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Draw tool stand-in recording which shape is active
#[derive(Clone, Debug, Default)]
pub struct DrawRecorder {
    pub active: Option<(Shape, DrawOptions)>,
    pub path_options: PathStyle,
}

impl DrawRecorder {
    pub fn active_shape(&self) -> Option<Shape> {
        self.active.as_ref().map(|(s, _)| *s)
    }
}

impl Draw for DrawRecorder {
    fn enable(&mut self, shape: Shape, options: &DrawOptions) {
        self.active = Some((shape, options.clone()));
    }

    fn disable(&mut self, shape: Shape) {
        if self.active.as_ref().is_some_and(|(s, _)| *s == shape) {
            self.active = None;
        }
    }

    fn set_path_options(&mut self, options: &PathStyle) {
        self.path_options = options.clone();
    }
}
