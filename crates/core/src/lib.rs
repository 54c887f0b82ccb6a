//! Trigrid is a triangle grid system. Vertices of the grid live on a
//! hexagonal lattice and are addressed with cube coordinates; edges and faces
//! are addressed relative to a vertex. This crate contains the grid data
//! structure, conversions between grid space and screen space, and hit-testing
//! of screen points. Presentation is up to you, via [render::GridVisitor].
//!
//! ```
//! use trigrid::{GridGeometry, Picker, SelectionConfig, TriangleGrid};
//!
//! let mut grid = TriangleGrid::with_data(10, 10, |_| false).unwrap();
//! let geometry = GridGeometry::new(50.0).unwrap();
//! let picker = Picker::new(geometry, SelectionConfig::default()).unwrap();
//!
//! // Select whatever is under a screen point
//! let pick = picker.pick(&grid, geometry.screen_to_grid(120.0, 80.0));
//! if let Some(feature) = pick.selection {
//!     *grid.get_mut(feature).unwrap() = true;
//! }
//! ```
//!
//! See [GridConfig] for everything that can be configured, and [grid] for a
//! description of the coordinate systems.

mod config;
pub mod geometry;
pub mod grid;
pub mod render;
mod select;
mod util;

pub use crate::{
    config::{
        CanvasConfig, GeometryConfig, GridConfig, GridSize, SelectionConfig,
    },
    geometry::{GridGeometry, Point2},
    grid::{
        CubeCoordinate, DirectedCoordinate, Direction, Feature,
        FractionalCoordinate, Orientation, TriangleGrid,
    },
    render::Viewport,
    select::{Pick, Picker},
};
