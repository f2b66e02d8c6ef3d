//! Narrow interfaces to the collaborators this crate drives but does not own:
//! the host map, its toolbar, and the drawing tool.

use crate::error::{HostError, ShapeError};
use crate::model::{Color, Layer, LayerId, MapId, PathStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Options handed to the per-layer edit behavior
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditOptions {
    pub snappable: bool,
    pub snap_distance: f64,
    pub allow_self_intersection: bool,
    pub prevent_marker_removal: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        EditOptions {
            snappable: true,
            snap_distance: 20.0,
            allow_self_intersection: true,
            prevent_marker_removal: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub snappable: bool,
    pub snap_distance: Option<f64>,
    pub finish_on: Option<String>,
    pub path_options: Option<PathStyle>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarOptions {
    pub position: String,
    /// Button name -> shown
    pub buttons: BTreeMap<String, bool>,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        ToolbarOptions { position: "topleft".to_string(), buttons: BTreeMap::new() }
    }
}

/// Draw tool shapes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Marker,
    CircleMarker,
    Line,
    Rectangle,
    #[default]
    Polygon,
    Cut,
    Circle,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Marker => "Marker",
            Shape::CircleMarker => "CircleMarker",
            Shape::Line => "Line",
            Shape::Rectangle => "Rectangle",
            Shape::Polygon => "Polygon",
            Shape::Cut => "Cut",
            Shape::Circle => "Circle",
        }
    }
}

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // legacy alias
            "Poly" | "Polygon" | "" => Ok(Shape::Polygon),
            "Marker" => Ok(Shape::Marker),
            "CircleMarker" => Ok(Shape::CircleMarker),
            "Line" => Ok(Shape::Line),
            "Rectangle" => Ok(Shape::Rectangle),
            "Cut" => Ok(Shape::Cut),
            "Circle" => Ok(Shape::Circle),
            other => Err(ShapeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The map this controller is attached to.
///
/// The host owns every layer. Per-layer actions may fail with
/// `HostError::LayerNotFound` when the layer disappeared after enumeration.
pub trait MapHost {
    fn map_id(&self) -> MapId;

    /// All layers currently on the map, in host iteration order
    fn layer_ids(&self) -> Vec<LayerId>;

    fn layer(&self, id: LayerId) -> Option<&Layer>;

    fn add_layer(&mut self, layer: Layer) -> LayerId;

    fn remove_layer(&mut self, id: LayerId) -> Result<Layer, HostError>;

    fn set_color(&mut self, id: LayerId, color: &Color) -> Result<(), HostError>;

    fn enable_layer_edit(&mut self, id: LayerId, options: &EditOptions) -> Result<(), HostError>;

    fn disable_layer_edit(&mut self, id: LayerId) -> Result<(), HostError>;

    /// Link vertices this layer shares with other layers in edit mode.
    /// Requires edit mode to be active on the layer.
    fn associate_shared_vertices(&mut self, id: LayerId) -> Result<(), HostError>;

    fn enable_layer_drag(&mut self, id: LayerId) -> Result<(), HostError>;

    fn disable_layer_drag(&mut self, id: LayerId) -> Result<(), HostError>;

    /// True while the user is dragging the layer
    fn is_dragging(&self, id: LayerId) -> bool;
}

pub trait Toolbar {
    /// Reflect a mode's state on its button
    fn toggle_button(&mut self, name: &str, active: bool);

    fn add_controls(&mut self, options: &ToolbarOptions);

    fn remove_controls(&mut self);

    fn toggle_controls(&mut self);

    fn is_visible(&self) -> bool;
}

pub trait Draw {
    fn enable(&mut self, shape: Shape, options: &DrawOptions);

    fn disable(&mut self, shape: Shape);

    fn set_path_options(&mut self, options: &PathStyle);
}
