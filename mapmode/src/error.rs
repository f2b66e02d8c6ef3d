use crate::model::LayerId;

/// Failures reported by a `MapHost` for a single layer action
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("layer {0} is not on the map")]
    LayerNotFound(LayerId),
    #[error("layer {0} is not in edit mode")]
    EditNotEnabled(LayerId),
    #[error("layer {0} does not support {1}")]
    Unsupported(LayerId, &'static str),
}

/// User-facing merge preconditions. Display strings are shown to the end user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("You must select the polygons to merge!")]
    NothingSelected,
    #[error("Merged polygons must be contiguous!")]
    NotContiguous { regions: usize },
    #[error("Merged polygons have no area!")]
    Degenerate,
}

impl MergeError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            MergeError::NothingSelected => "nothing_selected",
            MergeError::NotContiguous { .. } => "not_contiguous",
            MergeError::Degenerate => "degenerate",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("option '{param}' out of range: {got}")]
    OutOfRange { param: &'static str, got: f64 },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("unknown shape '{0}'")]
    Unknown(String),
}
