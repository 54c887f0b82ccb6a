use crate::{
    config::SelectionConfig,
    geometry::{GridGeometry, Point2, TriangleShape},
    grid::{
        CubeCoordinate, DirectedCoordinate, Edge, Face, TriangleGrid, Vertex,
    },
    render::{draw_grid, Color3, GridVisitor, Viewport},
};
use svg::{
    node::{
        element::{Circle, Group, Line, Polygon},
        Comment,
    },
    Document,
};

const FACE_COLOR: Color3 = Color3::new_int(211, 211, 211);
const EDGE_COLOR: Color3 = Color3::BLACK;
const VERTEX_COLOR: Color3 = Color3::WHITE;
const VERTEX_OUTLINE_COLOR: Color3 = Color3::BLACK;
/// Any feature with a `true` payload gets this color instead of its default
const HIGHLIGHT_COLOR: Color3 = Color3::new_int(255, 0, 0);

/// Render a grid as an SVG, as seen through the given viewport. Features
/// whose payload is `true` are highlighted. Vertices and edges are drawn at
/// the size that [Picker](crate::Picker) uses for selection, so what you see
/// is what you can click.
pub fn grid_to_svg(
    grid: &TriangleGrid<bool>,
    geometry: &GridGeometry,
    viewport: &Viewport,
    selection_config: &SelectionConfig,
) -> Document {
    let mut renderer = SvgRenderer::new(*selection_config);
    draw_grid(grid, geometry, viewport, &mut renderer);

    let document = Document::new()
        .set("viewBox", (0.0, 0.0, viewport.width, viewport.height))
        .set("width", viewport.width)
        .set("height", viewport.height)
        .add(Comment::new(format!(
            "{}x{} grid, edge length {}",
            grid.width(),
            grid.height(),
            geometry.edge_length()
        )));
    renderer.finish(document)
}

/// A [GridVisitor] that collects SVG elements for each layer of the grid.
/// Elements are buffered per layer, then attached to a document at the end.
#[derive(Debug)]
pub struct SvgRenderer {
    selection_config: SelectionConfig,
    faces: Vec<Polygon>,
    edges: Vec<Line>,
    vertices: Vec<Circle>,
}

impl SvgRenderer {
    pub fn new(selection_config: SelectionConfig) -> Self {
        Self {
            selection_config,
            faces: Vec::new(),
            edges: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Add everything that's been drawn so far to a document, one group per
    /// layer
    pub fn finish(self, document: Document) -> Document {
        let faces = self.faces.into_iter().fold(
            Group::new().set("id", "faces"),
            |group, face| group.add(face),
        );
        let edges = self.edges.into_iter().fold(
            Group::new()
                .set("id", "edges")
                .set("stroke-width", self.selection_config.edge_width)
                .set("stroke-linecap", "round"),
            |group, edge| group.add(edge),
        );
        let vertices = self.vertices.into_iter().fold(
            Group::new()
                .set("id", "vertices")
                .set("stroke", VERTEX_OUTLINE_COLOR.to_html()),
            |group, vertex| group.add(vertex),
        );
        document.add(faces).add(edges).add(vertices)
    }
}

fn color(highlighted: bool, default: Color3) -> String {
    if highlighted {
        HIGHLIGHT_COLOR.to_html()
    } else {
        default.to_html()
    }
}

impl GridVisitor<bool> for SvgRenderer {
    fn draw_face(
        &mut self,
        origin: Point2,
        face: &Face<bool>,
        _address: DirectedCoordinate,
        shape: TriangleShape,
    ) {
        let points = shape
            .translate(origin)
            .vertices
            .iter()
            .map(|vertex| (vertex.x, vertex.y))
            .collect::<Vec<_>>();
        self.faces.push(
            Polygon::new()
                .set("points", points)
                .set("fill", color(face.data, FACE_COLOR)),
        );
    }

    fn draw_edge(
        &mut self,
        origin: Point2,
        edge: &Edge<bool>,
        _address: DirectedCoordinate,
        end: Point2,
    ) {
        let end = origin + end;
        self.edges.push(
            Line::new()
                .set("x1", origin.x)
                .set("y1", origin.y)
                .set("x2", end.x)
                .set("y2", end.y)
                .set("stroke", color(edge.data, EDGE_COLOR)),
        );
    }

    fn draw_vertex(
        &mut self,
        origin: Point2,
        vertex: &Vertex<bool>,
        _coordinate: CubeCoordinate,
    ) {
        self.vertices.push(
            Circle::new()
                .set("cx", origin.x)
                .set("cy", origin.y)
                .set("r", self.selection_config.vertex_radius)
                .set("fill", color(vertex.data, VERTEX_COLOR)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CanvasConfig, Direction, Feature};

    #[test]
    fn test_grid_to_svg() {
        let mut grid = TriangleGrid::with_data(2, 2, |_| false).unwrap();
        *grid
            .get_mut(Feature::Edge(DirectedCoordinate::new(
                CubeCoordinate::ORIGIN,
                Direction::E,
            )))
            .unwrap() = true;
        let geometry = GridGeometry::new(50.0).unwrap();
        let viewport = Viewport::new(CanvasConfig::default()).unwrap();

        let svg = grid_to_svg(
            &grid,
            &geometry,
            &viewport,
            &SelectionConfig::default(),
        )
        .to_string();
        assert_eq!(svg.matches("<polygon").count(), grid.face_count());
        assert_eq!(svg.matches("<line").count(), grid.edge_count());
        assert_eq!(svg.matches("<circle").count(), grid.len());
        assert_eq!(svg.matches(&HIGHLIGHT_COLOR.to_html()).count(), 1);
    }
}
