//! This module holds the lattice coordinate types and the triangle grid data
//! structure built on top of them.
//!
//! ## Coordinate Systems
//!
//! Trigrid juggles four coordinate systems. Only the first is used to address
//! things in the grid; the rest exist to get in and out of it.
//!
//! ### Cube Coordinates
//!
//! Every vertex of the triangular lattice is named by a [CubeCoordinate]: an
//! integer triple `(a, b, c)` with `a + b + c = 0`. This is the [cube
//! coordinate system described by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube),
//! applied to the vertices of a triangle lattice rather than the centers of
//! hexagon tiles. (The two are the same lattice: every vertex is the center of
//! the hexagon formed by the six triangles around it.)
//!
//! Each vertex has six neighbors, one per [Direction]. Edges and faces have no
//! coordinate of their own; they are addressed with a [DirectedCoordinate]:
//!
//! - The edge `(p, d)` is the segment from `p` to `p.neighbor(d)`. Every edge
//!   has two names, one from each endpoint.
//! - The face `(p, d)` is the triangle between `p.neighbor(d.previous())` and
//!   `p.neighbor(d)`. Every face has three names, one from each corner.
//!
//! ### Offset Coordinates
//!
//! The grid itself is a rectangle, stored as rows of vertices. Offset
//! coordinates `(x, y)` are column/row indices into that rectangle. Rows line
//! up with the `b` axis, and every odd row is shifted half a column to the
//! right:
//!
//! ```text
//! x = a + floor(b / 2)      a = x - floor(y / 2)
//! y = b                     b = y
//! ```
//!
//! See [CubeCoordinate::from_offset] and [CubeCoordinate::to_offset].
//!
//! ### Fractional Coordinates
//!
//! A [FractionalCoordinate] is a real-valued triple on (approximately) the
//! plane `a + b + c = 0`. These come out of inverse-projecting a screen point,
//! and are also used for camera positions. Rounding one gives the nearest
//! vertex; flooring one gives the reference vertex of the face it falls in.
//!
//! ### Screen Coordinates
//!
//! Screen space is a 2D pixel space with `y` growing **downward**, which is
//! what most drawing surfaces use. The mapping between grid space and screen
//! space depends on the edge length, so it lives in
//! [GridGeometry](crate::GridGeometry) rather than here.

mod coordinate;
mod triangle_grid;

pub use self::{coordinate::*, triangle_grid::*};
