//! Helpers for drawing grids onto a 2D surface. The core doesn't draw
//! anything itself; it walks the grid and tells a [GridVisitor] where each
//! feature goes. Turning that into pixels (or SVG, or whatever) is up to the
//! visitor.

mod color;
#[cfg(feature = "svg")]
pub mod svg;

pub use self::color::Color3;

use crate::{
    config::CanvasConfig,
    geometry::{GridGeometry, Point2, TriangleShape},
    grid::{
        CubeCoordinate, DirectedCoordinate, Direction, Edge, Face,
        FractionalCoordinate, Orientation, TriangleGrid, Vertex,
    },
    timed,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A window onto the grid. The camera is the grid point that shows up in the
/// center of the canvas; moving it pans the view. All screen positions coming
/// out of a viewport are relative to the top-left corner of the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub camera: FractionalCoordinate,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport for a canvas, with the camera on the origin vertex.
    /// Returns an error if the canvas config is invalid.
    pub fn new(canvas: CanvasConfig) -> anyhow::Result<Self> {
        canvas.validate().context("invalid canvas config")?;
        Ok(Self {
            camera: FractionalCoordinate::ORIGIN,
            width: canvas.width,
            height: canvas.height,
        })
    }

    fn center(&self) -> Point2 {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// The screen position of the canvas's top-left corner, in unpanned
    /// grid screen space
    pub fn offset(&self, geometry: &GridGeometry) -> Point2 {
        geometry.grid_to_screen(self.camera) - self.center()
    }

    /// Get the canvas position of a grid point
    pub fn to_screen(
        &self,
        geometry: &GridGeometry,
        coordinate: impl Into<FractionalCoordinate>,
    ) -> Point2 {
        geometry.grid_to_screen(coordinate) - self.offset(geometry)
    }

    /// Get the grid point under a canvas position, e.g. a mouse pointer.
    /// Inverse of [Self::to_screen].
    pub fn to_grid(
        &self,
        geometry: &GridGeometry,
        pointer: Point2,
    ) -> FractionalCoordinate {
        let relative = pointer - self.center();
        geometry.screen_to_grid(relative.x, relative.y) + self.camera
    }

    /// Move the camera so that the given position (in unpanned grid screen
    /// space) is in the center of the canvas
    pub fn pan_to(&mut self, geometry: &GridGeometry, x: f64, y: f64) {
        self.camera = geometry.screen_to_grid(x, y);
    }

    /// Is a canvas position close enough to the canvas that something drawn
    /// there could show up? Anything anchored more than one edge length
    /// outside the canvas can't reach back into it.
    pub fn is_visible(&self, geometry: &GridGeometry, point: Point2) -> bool {
        let margin = geometry.edge_length();
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }
}

/// Callbacks for [draw_grid]. Each one gets the canvas position of the node
/// the feature belongs to, the feature itself, its address, and where it
/// extends to **relative to that position**.
///
/// All methods do nothing by default, so a visitor only needs to implement
/// the features it cares about.
pub trait GridVisitor<T> {
    fn draw_face(
        &mut self,
        _origin: Point2,
        _face: &Face<T>,
        _address: DirectedCoordinate,
        _shape: TriangleShape,
    ) {
    }

    /// `end` is the far endpoint of the edge
    fn draw_edge(
        &mut self,
        _origin: Point2,
        _edge: &Edge<T>,
        _address: DirectedCoordinate,
        _end: Point2,
    ) {
    }

    fn draw_vertex(
        &mut self,
        _origin: Point2,
        _vertex: &Vertex<T>,
        _coordinate: CubeCoordinate,
    ) {
    }
}

/// Walk a grid and hand every visible feature to a visitor. All faces are
/// visited first, then all edges, then all vertices, so each layer is drawn
/// on top of the one before. Within each pass, nodes go in row-major order.
pub fn draw_grid<T, V: GridVisitor<T>>(
    grid: &TriangleGrid<T>,
    geometry: &GridGeometry,
    viewport: &Viewport,
    visitor: &mut V,
) {
    timed!("Grid draw", log::Level::Trace, {
        let hexagon = geometry.hexagon();
        let visible_nodes = move || {
            grid.nodes().filter_map(move |(coordinate, node)| {
                let origin = viewport.to_screen(geometry, coordinate);
                viewport
                    .is_visible(geometry, origin)
                    .then(|| (coordinate, origin, node))
            })
        };

        for (coordinate, origin, node) in visible_nodes() {
            for orientation in [Orientation::PointyUp, Orientation::PointyDown]
            {
                if let Some(face) = node.face(orientation) {
                    visitor.draw_face(
                        origin,
                        face,
                        DirectedCoordinate::new(
                            coordinate,
                            orientation.direction(),
                        ),
                        hexagon.triangle(orientation),
                    );
                }
            }
        }

        for (coordinate, origin, node) in visible_nodes() {
            for (i, edge) in node.edges().iter().enumerate() {
                if let Some(edge) = edge {
                    let direction = Direction::from_index(i);
                    visitor.draw_edge(
                        origin,
                        edge,
                        DirectedCoordinate::new(coordinate, direction),
                        hexagon.vertex(direction),
                    );
                }
            }
        }

        for (coordinate, origin, node) in visible_nodes() {
            visitor.draw_vertex(origin, node.vertex(), coordinate);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[derive(Debug, PartialEq)]
    enum Call {
        Face(DirectedCoordinate),
        Edge(DirectedCoordinate),
        Vertex(CubeCoordinate),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl<T> GridVisitor<T> for Recorder {
        fn draw_face(
            &mut self,
            _: Point2,
            _: &Face<T>,
            address: DirectedCoordinate,
            _: TriangleShape,
        ) {
            self.calls.push(Call::Face(address));
        }

        fn draw_edge(
            &mut self,
            _: Point2,
            _: &Edge<T>,
            address: DirectedCoordinate,
            _: Point2,
        ) {
            self.calls.push(Call::Edge(address));
        }

        fn draw_vertex(
            &mut self,
            _: Point2,
            _: &Vertex<T>,
            coordinate: CubeCoordinate,
        ) {
            self.calls.push(Call::Vertex(coordinate));
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(CanvasConfig {
            width: 800.0,
            height: 600.0,
        })
        .unwrap()
    }

    #[test]
    fn test_viewport_centers_camera() {
        let geometry = GridGeometry::new(10.0).unwrap();
        let mut viewport = viewport();
        let center = viewport.to_screen(&geometry, CubeCoordinate::ORIGIN);
        assert_eq!(center, Point2::new(400.0, 300.0));

        viewport.pan_to(&geometry, 15.0, 8.660254037844386);
        let center = viewport
            .to_screen(&geometry, CubeCoordinate::from_offset(1, 1));
        assert_approx_eq!(center.x, 400.0);
        assert_approx_eq!(center.y, 300.0);
    }

    #[test]
    fn test_viewport_round_trip() {
        let geometry = GridGeometry::new(25.0).unwrap();
        let mut viewport = viewport();
        viewport.pan_to(&geometry, 130.0, -42.0);
        let pointer = Point2::new(123.0, 456.0);
        let grid_point = viewport.to_grid(&geometry, pointer);
        let back = viewport.to_screen(&geometry, grid_point);
        assert_approx_eq!(back.x, pointer.x);
        assert_approx_eq!(back.y, pointer.y);
    }

    #[test]
    fn test_draw_order() {
        let grid = TriangleGrid::new(3, 3).unwrap();
        let geometry = GridGeometry::new(10.0).unwrap();
        let mut recorder = Recorder::default();
        draw_grid(&grid, &geometry, &viewport(), &mut recorder);

        let calls = recorder.calls;
        assert_eq!(
            calls.len(),
            grid.len() + grid.edge_count() + grid.face_count()
        );
        // Faces, then edges, then vertices
        let faces = grid.face_count();
        let edges = grid.edge_count();
        assert!(calls[..faces].iter().all(|c| matches!(c, Call::Face(_))));
        assert!(calls[faces..faces + edges]
            .iter()
            .all(|c| matches!(c, Call::Edge(_))));
        assert_eq!(
            calls[faces + edges],
            Call::Vertex(CubeCoordinate::ORIGIN),
            "vertices should be row-major"
        );
    }

    #[test]
    fn test_draw_skips_offscreen_nodes() {
        let grid = TriangleGrid::new(100, 100).unwrap();
        let geometry = GridGeometry::new(100.0).unwrap();
        let mut recorder = Recorder::default();
        // Camera on the origin, so only the first few rows/columns fit
        draw_grid(&grid, &geometry, &viewport(), &mut recorder);
        let vertices = recorder
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Vertex(_)))
            .count();
        assert!(vertices > 0);
        assert!(vertices < 100, "drew {} vertices", vertices);
    }
}
