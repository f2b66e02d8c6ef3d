//! Merge the selected polygons into one layer.

use crate::algorithms::dissolve::{dissolve, has_area};
use crate::click::ClickAction;
use crate::controller::{skipped, ModeController};
use crate::error::MergeError;
use crate::geometry::point::{Point, Polygon};
use crate::host::{Draw, MapHost, Toolbar};
use crate::model::{LatLng, Layer, LayerId};

/// Host rings ([lat, lng]) to a planar polygon (x = lng, y = lat)
pub fn to_planar(rings: &[Vec<LatLng>]) -> Option<Polygon> {
    let mut rings = rings
        .iter()
        .map(|ring| ring.iter().map(|ll| Point::new(ll.lng, ll.lat)).collect::<Vec<_>>());
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

/// Planar ring back to host order
pub fn to_latlngs(ring: &[Point]) -> Vec<LatLng> {
    ring.iter().map(|p| LatLng::new(p.y, p.x)).collect()
}

impl<H: MapHost, T: Toolbar, D: Draw> ModeController<H, T, D> {
    /// Replace the selected polygons with their union.
    ///
    /// Fails without touching the map when nothing is selected, when a selected
    /// polygon has no area, or when the union is not a single contiguous region. The new layer takes the first
    /// input's original color and is immediately selectable.
    pub fn merge_selected_polygons(&mut self) -> Result<LayerId, MergeError> {
        let inputs: Vec<(LayerId, Polygon)> = self
            .selected_layers()
            .into_iter()
            .filter_map(|id| {
                let rings = self.host.layer(id)?.polygon_rings()?;
                Some((id, to_planar(rings)?))
            })
            .collect();
        if inputs.is_empty() {
            log::warn!("merge: no polygon selected");
            return Err(MergeError::NothingSelected);
        }

        let tolerance = self.options.merge_tolerance;
        if let Some((id, _)) = inputs.iter().find(|(_, p)| !has_area(p, tolerance)) {
            log::warn!("merge: selected layer {} has no area", id);
            return Err(MergeError::Degenerate);
        }

        let polygons: Vec<Polygon> = inputs.iter().map(|(_, p)| p.clone()).collect();
        let regions = dissolve(&polygons, tolerance);
        let region = match regions.as_slice() {
            [one] => one,
            [] => return Err(MergeError::Degenerate),
            many => {
                log::warn!("merge: union has {} separate regions", many.len());
                return Err(MergeError::NotContiguous { regions: many.len() });
            }
        };

        let color = self.selection.original_color(inputs[0].0).cloned();
        let ring = to_latlngs(&region.exterior);

        for (id, _) in &inputs {
            match self.host.remove_layer(*id) {
                Ok(_) => self.layer_removed(*id),
                Err(e) => skipped("remove merged input", e),
            }
        }

        let merged = self.add_layer(Layer::polygon(vec![ring], color.clone()));
        self.selection.stamp(merged, color);
        if self.global_selection_enabled() {
            self.clicks.on(merged, ClickAction::ToggleSelect);
        }
        log::info!("merged {} polygons into layer {}", inputs.len(), merged);
        Ok(merged)
    }
}
