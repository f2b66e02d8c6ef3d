//! Global interaction modes (removal, edit, drag, selection) for the managed
//! geometry layers of a map, and merging of selected polygons.

pub mod model;
pub mod error;
pub mod config;
pub mod events;
pub mod host;
pub mod registry;
pub mod modes;
pub mod click;
pub mod controller;
pub mod selection;
pub mod merge;
pub mod store;
pub mod geometry {
    pub mod intersect;
    pub mod point;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod dissolve;
    pub mod winding;
}

pub use click::ClickAction;
pub use config::PmOptions;
pub use controller::ModeController;
pub use error::{ConfigError, HostError, MergeError, ShapeError};
pub use events::{EventBus, ListenerId, PmEvent};
pub use host::{Draw, DrawOptions, EditOptions, MapHost, Shape, Toolbar, ToolbarOptions};
pub use model::{Capabilities, Color, Geometry, LatLng, Layer, LayerId, LayerKind, MapId, PathStyle};
pub use modes::{Mode, ModeState};
pub use store::{DrawRecorder, LayerStore, MemoryToolbar};
