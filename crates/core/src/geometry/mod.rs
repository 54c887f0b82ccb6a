//! Conversion between grid space and screen space, and hit-testing of screen
//! points against grid features. See [crate::grid] for a description of the
//! coordinate systems involved.

mod hexagon;
mod unit;

pub use self::{
    hexagon::{Hexagon, TriangleShape},
    unit::Point2,
};

use crate::{
    config::GeometryConfig,
    geometry::hexagon::HALF_SQRT_3,
    grid::{CubeCoordinate, DirectedCoordinate, Direction, FractionalCoordinate},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maps grid coordinates onto a 2D plane and back, for one particular edge
/// length. Rows of the grid run horizontally, and each row is shifted half an
/// edge to the right relative to the one above it (in cube terms, the `a`
/// axis points right and the `b` axis points down-right).
///
/// A geometry is immutable and cheap to copy. If you need a different scale,
/// make a new one.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    hexagon: Hexagon,
}

impl GridGeometry {
    /// Create a geometry with the given edge length, in pixels. Returns an
    /// error if the length is not a positive finite number.
    pub fn new(edge_length: f64) -> anyhow::Result<Self> {
        Self::from_config(GeometryConfig { edge_length })
    }

    pub fn from_config(config: GeometryConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid geometry config")?;
        Ok(Self {
            hexagon: Hexagon::new(config.edge_length),
        })
    }

    /// Length of every edge in the grid, in pixels
    pub fn edge_length(&self) -> f64 {
        self.hexagon.edge_length()
    }

    /// Horizontal distance between two adjacent vertices in the same row
    pub fn column_spacing(&self) -> f64 {
        self.edge_length()
    }

    /// Vertical distance between two adjacent rows
    pub fn row_spacing(&self) -> f64 {
        self.edge_length() * HALF_SQRT_3
    }

    /// How far each odd row is shifted right, relative to the even rows
    pub fn odd_row_offset(&self) -> f64 {
        self.edge_length() / 2.0
    }

    /// The hexagon around every vertex. Use this to get the shapes of edges
    /// and faces relative to their owning node.
    pub fn hexagon(&self) -> &Hexagon {
        &self.hexagon
    }

    /// Project a grid point into screen space. The origin vertex lands on
    /// `(0, 0)`.
    pub fn grid_to_screen(
        &self,
        coordinate: impl Into<FractionalCoordinate>,
    ) -> Point2 {
        let coordinate = coordinate.into();
        Point2 {
            x: coordinate.a * self.column_spacing()
                + coordinate.b * self.odd_row_offset(),
            y: coordinate.b * self.row_spacing(),
        }
    }

    /// Inverse of [Self::grid_to_screen]. The output is generally not on a
    /// vertex; use one of the `nearest_*`/`face_at` methods to figure out
    /// what's under it.
    pub fn screen_to_grid(&self, x: f64, y: f64) -> FractionalCoordinate {
        let b = y / self.row_spacing();
        let a = (x - b * self.odd_row_offset()) / self.column_spacing();
        FractionalCoordinate::new_ab(a, b)
    }

    /// Find the vertex closest to a point. Also returns the distance between
    /// the two, in pixels.
    pub fn nearest_vertex(
        &self,
        point: FractionalCoordinate,
    ) -> (CubeCoordinate, f64) {
        let vertex = point.round();
        let residual = point - FractionalCoordinate::from(vertex);
        let distance = self.grid_to_screen(residual).length();
        (vertex, distance)
    }

    /// Find the edge closest to a point, out of the edges touching its
    /// nearest vertex. Returns the edge as a (vertex, direction) pair, along
    /// with an approximate distance to it, in pixels.
    ///
    /// Each edge runs along a line where one of the three components is
    /// constant. The component with the smallest residual tells us which of
    /// the three edge lines the point is closest to, and the sign of another
    /// residual tells us which side of the vertex it's on.
    pub fn nearest_edge(
        &self,
        point: FractionalCoordinate,
    ) -> (DirectedCoordinate, f64) {
        match point.round_tie() {
            // Exactly between two vertices: measure from both ends
            Some([first, second]) => {
                let from_first = self.edge_from(first, point);
                let from_second = self.edge_from(second, point);
                if from_second.1 < from_first.1 {
                    from_second
                } else {
                    from_first
                }
            }
            None => self.edge_from(point.round(), point),
        }
    }

    /// Find the edge closest to a point out of the six touching `vertex`
    fn edge_from(
        &self,
        vertex: CubeCoordinate,
        point: FractionalCoordinate,
    ) -> (DirectedCoordinate, f64) {
        let residual = point - FractionalCoordinate::from(vertex);
        let r_a = residual.a * self.column_spacing();
        let r_b = residual.b * self.row_spacing();
        let r_c = residual.c * self.column_spacing();
        let (abs_a, abs_b, abs_c) = (r_a.abs(), r_b.abs(), r_c.abs());

        let direction = if abs_a < abs_b && abs_a < abs_c {
            // Constant a: the NW-SE line
            if r_b < 0.0 {
                Direction::NW
            } else {
                Direction::SE
            }
        } else if abs_b < abs_a && abs_b < abs_c {
            // Constant b: the horizontal line
            if r_a < 0.0 {
                Direction::W
            } else {
                Direction::E
            }
        } else if r_b < 0.0 {
            // Constant c: the NE-SW line
            Direction::NE
        } else {
            Direction::SW
        };

        let distance = abs_a.min(abs_b).min(abs_c);
        (DirectedCoordinate::new(vertex, direction), distance)
    }

    /// Find the face that contains a point. The lattice cell anchored at
    /// `point.floor()` is a rhombus made of two faces, split along its short
    /// diagonal. The returned face is addressed from one of its corners.
    pub fn face_at(&self, point: FractionalCoordinate) -> DirectedCoordinate {
        let floor = point.floor();
        let cell_a = point.a - floor.a() as f64;
        let cell_b = point.b - floor.b() as f64;
        if 1.0 - cell_a > cell_b {
            DirectedCoordinate::new(floor, Direction::SE)
        } else {
            DirectedCoordinate::new(floor.neighbor(Direction::E), Direction::SW)
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            hexagon: Hexagon::new(GeometryConfig::default().edge_length),
        }
    }
}
