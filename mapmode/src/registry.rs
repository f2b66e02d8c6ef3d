//! Which layers on the map this crate may act on.

use crate::host::MapHost;
use crate::model::{Layer, LayerId, LayerKind};

/// Managed, non-transient layers of a supported geometry kind, in host order
pub fn find_managed_layers<H: MapHost + ?Sized>(host: &H) -> Vec<LayerId> {
    host.layer_ids()
        .into_iter()
        .filter(|&id| host.layer(id).is_some_and(is_managed_geometry))
        .collect()
}

fn is_managed_geometry(layer: &Layer) -> bool {
    layer.kind.is_geometry() && layer.is_managed() && !layer.temp
}

/// Layers the layer-added handler reacts to
pub fn is_relevant(layer: &Layer) -> bool {
    layer.is_managed() && !layer.temp
}

/// Removal mode attaches its click handler only to layers passing this gate
pub fn is_removal_eligible(layer: &Layer) -> bool {
    match layer.pm {
        Some(caps) => !caps.prevent_removal && layer.kind != LayerKind::LayerGroup,
        None => false,
    }
}
