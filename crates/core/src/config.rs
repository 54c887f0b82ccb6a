use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration for a grid and everything used to display and interact with
/// it. Every section has sensible defaults, so a partial config (or none at
/// all) is fine.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate,
)]
#[serde(default)]
pub struct GridConfig {
    /// Dimensions of the grid, in vertices
    #[validate]
    pub size: GridSize,

    /// How the grid maps onto the screen
    #[validate]
    pub geometry: GeometryConfig,

    /// How close the pointer needs to be to a feature to select it
    #[validate]
    pub selection: SelectionConfig,

    /// The surface the grid is displayed on
    #[validate]
    pub canvas: CanvasConfig,
}

/// Dimensions of a [TriangleGrid](crate::TriangleGrid). The grid is `width`
/// vertices wide and `height` rows tall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridSize {
    #[validate(range(min = 1, max = 10000))]
    pub width: i32,

    #[validate(range(min = 1, max = 10000))]
    pub height: i32,
}

/// Config for [GridGeometry](crate::GridGeometry)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_edge_length_is_number"))]
#[serde(default)]
pub struct GeometryConfig {
    /// Length of every edge, in pixels
    #[validate(range(min = 0.001, max = 1000000.0))]
    pub edge_length: f64,
}

/// Pixel thresholds for selecting features with a pointer. Vertices take
/// priority over edges, which take priority over faces. See
/// [Picker](crate::Picker).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SelectionConfig {
    /// A vertex is selected if the pointer is strictly closer than this
    #[validate(range(min = 0.0))]
    pub vertex_radius: f64,

    /// An edge is selected if the pointer is strictly closer than this (and
    /// not close enough to a vertex)
    #[validate(range(min = 0.0))]
    pub edge_width: f64,
}

/// Size of the drawing surface, in pixels
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CanvasConfig {
    #[validate(range(min = 1.0))]
    pub width: f64,

    #[validate(range(min = 1.0))]
    pub height: f64,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self { edge_length: 100.0 }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            vertex_radius: 15.0,
            edge_width: 3.0,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

/// NaN passes every range check, so it needs its own
fn validate_edge_length_is_number(
    config: &GeometryConfig,
) -> Result<(), ValidationError> {
    if config.edge_length.is_nan() {
        Err(ValidationError::new("edge_length_nan"))
    } else {
        Ok(())
    }
}
