use serde::{Deserialize, Serialize};
use std::fmt;

pub type LayerId = u32;
pub type MapId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// CSS color string as understood by the host renderer ("blue", "#3388ff", ...)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Marker,
    CircleMarker,
    Circle,
    Polyline,
    Polygon,
    Rectangle,
    LayerGroup,
    Tile,
}

impl LayerKind {
    /// Kinds that carry vector geometry the modes can act on
    pub fn is_geometry(self) -> bool {
        !matches!(self, LayerKind::LayerGroup | LayerKind::Tile)
    }

    pub fn is_polygon(self) -> bool {
        matches!(self, LayerKind::Polygon | LayerKind::Rectangle)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    Point(LatLng),
    Circle { center: LatLng, radius: f64 },
    Line(Vec<LatLng>),
    /// First ring is the exterior, the rest are holes. Rings are not closed.
    Polygon(Vec<Vec<LatLng>>),
    Group(Vec<LayerId>),
    Raster,
}

impl Geometry {
    /// Every vertex of the geometry, in ring order
    pub fn vertices(&self) -> Vec<LatLng> {
        match self {
            Geometry::Point(p) => vec![*p],
            Geometry::Circle { center, .. } => vec![*center],
            Geometry::Line(pts) => pts.clone(),
            Geometry::Polygon(rings) => rings.iter().flatten().copied().collect(),
            Geometry::Group(_) | Geometry::Raster => Vec::new(),
        }
    }
}

/// Per-layer capability record; its presence on a layer is the management marker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub prevent_removal: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    pub color: Option<Color>,
    pub weight: Option<f64>,
    pub fill_color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub geometry: Geometry,
    /// Explicit color property; takes precedence over `style.color`
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub style: PathStyle,
    #[serde(default)]
    pub pm: Option<Capabilities>,
    #[serde(default)]
    pub temp: bool,
}

impl Layer {
    pub fn polygon(rings: Vec<Vec<LatLng>>, color: Option<Color>) -> Self {
        Layer {
            kind: LayerKind::Polygon,
            geometry: Geometry::Polygon(rings),
            color: None,
            style: PathStyle { color, ..PathStyle::default() },
            pm: Some(Capabilities::default()),
            temp: false,
        }
    }

    pub fn marker(at: LatLng) -> Self {
        Layer {
            kind: LayerKind::Marker,
            geometry: Geometry::Point(at),
            color: None,
            style: PathStyle::default(),
            pm: Some(Capabilities::default()),
            temp: false,
        }
    }

    pub fn polyline(points: Vec<LatLng>, color: Option<Color>) -> Self {
        Layer {
            kind: LayerKind::Polyline,
            geometry: Geometry::Line(points),
            color: None,
            style: PathStyle { color, ..PathStyle::default() },
            pm: Some(Capabilities::default()),
            temp: false,
        }
    }

    pub fn group(members: Vec<LayerId>) -> Self {
        Layer {
            kind: LayerKind::LayerGroup,
            geometry: Geometry::Group(members),
            color: None,
            style: PathStyle::default(),
            pm: Some(Capabilities::default()),
            temp: false,
        }
    }

    pub fn tile() -> Self {
        Layer {
            kind: LayerKind::Tile,
            geometry: Geometry::Raster,
            color: None,
            style: PathStyle::default(),
            pm: None,
            temp: false,
        }
    }

    /// Drop the management marker
    pub fn unmanaged(mut self) -> Self {
        self.pm = None;
        self
    }

    pub fn transient(mut self) -> Self {
        self.temp = true;
        self
    }

    pub fn prevent_removal(mut self) -> Self {
        if let Some(caps) = self.pm.as_mut() {
            caps.prevent_removal = true;
        }
        self
    }

    pub fn is_managed(&self) -> bool {
        self.pm.is_some()
    }

    /// Color shown before any selection highlighting
    pub fn base_color(&self) -> Option<&Color> {
        self.color.as_ref().or(self.style.color.as_ref())
    }

    pub fn polygon_rings(&self) -> Option<&[Vec<LatLng>]> {
        match &self.geometry {
            Geometry::Polygon(rings) if self.kind.is_polygon() => Some(rings),
            _ => None,
        }
    }
}
