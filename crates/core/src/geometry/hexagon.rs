use crate::{geometry::Point2, Direction, Orientation};
use serde::{Deserialize, Serialize};

/// √3/2, the ratio between a triangle's height and its edge length
pub(crate) const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// The hexagon formed by the six triangles around a vertex, in screen space
/// and relative to that vertex. Vertex `i` of the hexagon sits exactly where
/// the vertex's neighbor in direction `i` is drawn, so the hexagon doubles as
/// a lookup table for edge endpoints and face shapes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hexagon {
    edge_length: f64,
    vertices: [Point2; 6],
}

impl Hexagon {
    pub fn new(edge_length: f64) -> Self {
        let half_edge = edge_length / 2.0;
        let half_height = edge_length * HALF_SQRT_3;
        Self {
            edge_length,
            // Screen y grows downward, so the north vertices are negative
            vertices: [
                Point2::new(-half_edge, -half_height),
                Point2::new(half_edge, -half_height),
                Point2::new(edge_length, 0.0),
                Point2::new(half_edge, half_height),
                Point2::new(-half_edge, half_height),
                Point2::new(-edge_length, 0.0),
            ],
        }
    }

    /// Length of each side, which is also the distance from the center to
    /// each vertex
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    pub fn half_edge(&self) -> f64 {
        self.edge_length / 2.0
    }

    /// Distance from the center to the middle of the top (or bottom) side
    pub fn half_height(&self) -> f64 {
        self.edge_length * HALF_SQRT_3
    }

    /// Distance between the two flat sides (top and bottom)
    pub fn height(&self) -> f64 {
        self.half_height() * 2.0
    }

    /// Distance between the two pointy ends (left and right)
    pub fn width(&self) -> f64 {
        self.edge_length * 2.0
    }

    /// All six vertices, indexed by [Direction::index]
    pub fn vertices(&self) -> &[Point2; 6] {
        &self.vertices
    }

    pub fn vertex(&self, direction: Direction) -> Point2 {
        self.vertices[direction.index()]
    }

    /// Get the shape of the face with the given orientation, relative to the
    /// node that owns it
    pub fn triangle(&self, orientation: Orientation) -> TriangleShape {
        let (left, right) = match orientation {
            Orientation::PointyUp => (Direction::NW, Direction::NE),
            Orientation::PointyDown => (Direction::SE, Direction::SW),
        };
        TriangleShape {
            vertices: [Point2::ORIGIN, self.vertex(left), self.vertex(right)],
        }
    }
}

/// A triangle relative to some origin. The first vertex is always the origin
/// itself, i.e. the vertex of the node that owns the face.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangleShape {
    pub vertices: [Point2; 3],
}

impl TriangleShape {
    /// Move the triangle so it's relative to a new origin
    pub fn translate(self, offset: Point2) -> Self {
        Self {
            vertices: self.vertices.map(|vertex| vertex + offset),
        }
    }

    /// Average of the three vertices
    pub fn centroid(&self) -> Point2 {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_dimensions() {
        let hexagon = Hexagon::new(10.0);
        assert_approx_eq!(hexagon.width(), 20.0);
        assert_approx_eq!(hexagon.height(), 17.320508);
        assert_approx_eq!(hexagon.half_edge(), 5.0);
        assert_approx_eq!(hexagon.half_height(), 8.660254);
        for vertex in hexagon.vertices() {
            assert_approx_eq!(vertex.length(), 10.0);
        }
    }

    #[test]
    fn test_opposite_vertices() {
        let hexagon = Hexagon::new(4.0);
        for direction in Direction::iter() {
            assert_eq!(
                hexagon.vertex(direction),
                -hexagon.vertex(direction.opposite())
            );
        }
    }

    #[test]
    fn test_triangles() {
        let hexagon = Hexagon::new(10.0);
        let up = hexagon.triangle(Orientation::PointyUp);
        assert_eq!(up.vertices[0], Point2::ORIGIN);
        // Pointy-up faces sit above their vertex, pointy-down below
        assert!(up.centroid().y < 0.0);
        assert!(hexagon.triangle(Orientation::PointyDown).centroid().y > 0.0);

        let moved = up.translate(Point2::new(5.0, 5.0));
        assert_eq!(moved.vertices[0], Point2::new(5.0, 5.0));
        assert_approx_eq!(moved.vertices[2].x, 10.0);
    }
}
