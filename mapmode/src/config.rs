use crate::error::ConfigError;
use crate::geometry::tolerance::EPS_SNAP;
use crate::host::EditOptions;
use crate::model::Color;
use serde::{Deserialize, Serialize};

/// Controller options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmOptions {
    /// Style color of selected layers
    pub highlight_color: Color,
    /// Vertex snapping distance used when merging polygons, in map units
    pub merge_tolerance: f64,
    /// Edit options used when edit mode is re-enabled without explicit options
    pub edit: EditOptions,
}

impl Default for PmOptions {
    fn default() -> Self {
        PmOptions {
            highlight_color: Color::from("blue"),
            merge_tolerance: EPS_SNAP,
            edit: EditOptions::default(),
        }
    }
}

impl PmOptions {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let opts: PmOptions = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.merge_tolerance.is_finite() || self.merge_tolerance <= 0.0 {
            return Err(ConfigError::OutOfRange { param: "merge_tolerance", got: self.merge_tolerance });
        }
        if !self.edit.snap_distance.is_finite() || self.edit.snap_distance < 0.0 {
            return Err(ConfigError::OutOfRange { param: "edit.snap_distance", got: self.edit.snap_distance });
        }
        Ok(())
    }
}
