use crate::{
    config::GridSize,
    grid::{CubeCoordinate, DirectedCoordinate, Direction},
    timed,
};
use anyhow::Context;
use derive_more::Display;
use log::debug;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A lattice vertex. Vertices have no intrinsic geometry; all they hold is
/// whatever payload the application attached to them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Vertex<T> {
    pub data: T,
}

/// A segment between two adjacent vertices. See [Vertex] regarding payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Edge<T> {
    pub data: T,
}

/// A triangle between three mutually adjacent vertices. See [Vertex]
/// regarding payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Face<T> {
    pub data: T,
}

/// A reference to one addressable slot in a grid. This is used to hand out
/// addresses during grid construction, and to report what was hit during
/// selection.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Feature {
    #[display(fmt = "vertex {}", _0)]
    Vertex(CubeCoordinate),
    /// The segment from `coordinate` to its neighbor in `direction`
    #[display(fmt = "edge {}", _0)]
    Edge(DirectedCoordinate),
    /// The triangle between the neighbors of `coordinate` in
    /// `direction.previous()` and `direction`. A node's own pointy-up face is
    /// its NE face, and its own pointy-down face is its SW face.
    #[display(fmt = "face {}", _0)]
    Face(DirectedCoordinate),
}

/// The two triangle orientations. Each node owns at most one face of each.
///
/// Names follow the hexagon wedge each one is cut from, **not** where the
/// apex points on screen: the pointy-up face spans the north-west and
/// north-east neighbors, the pointy-down face spans the south-east and
/// south-west neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    PointyUp,
    PointyDown,
}

impl Orientation {
    /// The direction under which a node addresses its own face of this
    /// orientation. See [Feature::Face] for how face directions work.
    pub fn direction(self) -> Direction {
        match self {
            Self::PointyUp => Direction::NE,
            Self::PointyDown => Direction::SW,
        }
    }
}

/// Which node owns the face `(p, d)`, and in which slot, indexed by `d`. The
/// direction is the step from `p` to the owner, or `None` if `p` owns it.
const FACE_OWNERS: [(Option<Direction>, Orientation); 6] = [
    (Some(Direction::NW), Orientation::PointyDown),
    (None, Orientation::PointyUp),
    (Some(Direction::NE), Orientation::PointyDown),
    (Some(Direction::SE), Orientation::PointyUp),
    (None, Orientation::PointyDown),
    (Some(Direction::SW), Orientation::PointyUp),
];

/// Everything anchored at one lattice position: exactly one vertex, the edges
/// leaving it in the three canonical directions, and its two faces. Edges and
/// faces that would reach outside the grid are trimmed at construction, and
/// show up here as `None`.
#[derive(Clone, Debug)]
pub struct GridNode<T> {
    vertex: Vertex<T>,
    edges: [Option<Edge<T>>; 3],
    face_up: Option<Face<T>>,
    face_down: Option<Face<T>>,
}

impl<T> GridNode<T> {
    pub fn vertex(&self) -> &Vertex<T> {
        &self.vertex
    }

    /// Edges in the canonical directions, indexed by [Direction::index]
    pub fn edges(&self) -> &[Option<Edge<T>>; 3] {
        &self.edges
    }

    /// The edge leaving this node in the given direction. Only the canonical
    /// directions are stored on a node, so this is always `None` for the other
    /// three. Use [TriangleGrid::edge] to resolve any direction.
    pub fn edge(&self, direction: Direction) -> Option<&Edge<T>> {
        self.edges.get(direction.index())?.as_ref()
    }

    pub fn face_up(&self) -> Option<&Face<T>> {
        self.face_up.as_ref()
    }

    pub fn face_down(&self) -> Option<&Face<T>> {
        self.face_down.as_ref()
    }

    pub fn face(&self, orientation: Orientation) -> Option<&Face<T>> {
        match orientation {
            Orientation::PointyUp => self.face_up(),
            Orientation::PointyDown => self.face_down(),
        }
    }

    fn face_mut(&mut self, orientation: Orientation) -> Option<&mut Face<T>> {
        match orientation {
            Orientation::PointyUp => self.face_up.as_mut(),
            Orientation::PointyDown => self.face_down.as_mut(),
        }
    }
}

/// A rectangular triangle grid. The grid is `width` vertices wide and
/// `height` vertices tall, stored in row-major order in a flat vector. See the
/// [module-level docs](crate::grid) for how offset positions map to cube
/// coordinates.
///
/// The structure of the grid (which edges and faces exist) is computed once
/// during construction and never changes. Payloads can be modified through
/// [Self::get_mut].
#[derive(Clone, Debug)]
pub struct TriangleGrid<T = ()> {
    size: GridSize,
    nodes: Vec<GridNode<T>>,
}

impl TriangleGrid {
    /// Create a new grid with no payload. Returns an error if either dimension
    /// is not positive (or unreasonably large).
    pub fn new(width: i32, height: i32) -> anyhow::Result<Self> {
        Self::with_data(width, height, |_| ())
    }
}

impl<T> TriangleGrid<T> {
    /// Create a new grid, initializing every vertex, edge and face via the
    /// given function. See [Self::from_size].
    pub fn with_data(
        width: i32,
        height: i32,
        initializer: impl FnMut(Feature) -> T,
    ) -> anyhow::Result<Self> {
        Self::from_size(GridSize { width, height }, initializer)
    }

    /// Create a new grid of the given size. Returns an error if the size is
    /// invalid.
    ///
    /// `initializer` is called once for every vertex, edge and face that ends
    /// up in the grid, with the address of that slot. Nodes are visited in
    /// row-major order; within a node the order is vertex, then the edges in
    /// canonical order, then the pointy-up face, then the pointy-down face.
    pub fn from_size(
        size: GridSize,
        mut initializer: impl FnMut(Feature) -> T,
    ) -> anyhow::Result<Self> {
        size.validate().context("invalid grid size")?;

        let nodes = timed!(
            "Grid construction",
            Self::build_nodes(size, &mut initializer)
        );
        let grid = Self { size, nodes };
        debug!(
            "Built {}x{} grid with {} edges and {} faces",
            size.width,
            size.height,
            grid.edge_count(),
            grid.face_count()
        );
        Ok(grid)
    }

    /// Allocate every node and trim the edges and faces that reach outside
    /// the grid. A feature exists iff all of its vertices are in bounds, which
    /// only depends on the static bounds, so this is a single pass.
    fn build_nodes(
        size: GridSize,
        initializer: &mut impl FnMut(Feature) -> T,
    ) -> Vec<GridNode<T>> {
        let mut nodes =
            Vec::with_capacity(size.width as usize * size.height as usize);

        for y in 0..size.height {
            for x in 0..size.width {
                let coordinate = CubeCoordinate::from_offset(x, y);
                let neighbor_exists = |direction: Direction| {
                    node_index(size, coordinate.neighbor(direction)).is_some()
                };

                let vertex = Vertex {
                    data: initializer(Feature::Vertex(coordinate)),
                };
                let edges = [Direction::NW, Direction::NE, Direction::E].map(
                    |direction| {
                        neighbor_exists(direction).then(|| Edge {
                            data: initializer(Feature::Edge(
                                DirectedCoordinate::new(coordinate, direction),
                            )),
                        })
                    },
                );
                let mut face = |orientation: Orientation| Face {
                    data: initializer(Feature::Face(DirectedCoordinate::new(
                        coordinate,
                        orientation.direction(),
                    ))),
                };
                let face_up = (neighbor_exists(Direction::NW)
                    && neighbor_exists(Direction::NE))
                .then(|| face(Orientation::PointyUp));
                let face_down = (neighbor_exists(Direction::SE)
                    && neighbor_exists(Direction::SW))
                .then(|| face(Orientation::PointyDown));

                nodes.push(GridNode {
                    vertex,
                    edges,
                    face_up,
                    face_down,
                });
            }
        }

        nodes
    }

    /// Number of vertices along each row
    pub fn width(&self) -> i32 {
        self.size.width
    }

    /// Number of rows
    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Get the number of nodes (equivalently, vertices) in the grid
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, since construction rejects empty grids
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of edges that survived trimming
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.edges.iter().flatten().count())
            .sum()
    }

    /// Total number of faces that survived trimming
    pub fn face_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| {
                node.face_up.iter().count() + node.face_down.iter().count()
            })
            .sum()
    }

    /// Does the given vertex fall inside this grid?
    pub fn contains(&self, coordinate: CubeCoordinate) -> bool {
        node_index(self.size, coordinate).is_some()
    }

    /// Get the node at an offset position, or `None` if it's out of bounds
    pub fn node(&self, x: i32, y: i32) -> Option<&GridNode<T>> {
        if x < 0 || x >= self.width() || y < 0 || y >= self.height() {
            return None;
        }
        self.node_at(CubeCoordinate::from_offset(x, y))
    }

    /// Get the node anchored at a vertex, or `None` if it's out of bounds
    pub fn node_at(&self, coordinate: CubeCoordinate) -> Option<&GridNode<T>> {
        let index = node_index(self.size, coordinate)?;
        Some(&self.nodes[index])
    }

    fn node_at_mut(
        &mut self,
        coordinate: CubeCoordinate,
    ) -> Option<&mut GridNode<T>> {
        let index = node_index(self.size, coordinate)?;
        Some(&mut self.nodes[index])
    }

    /// Iterate over every node along with its coordinate, in row-major order
    pub fn nodes(
        &self,
    ) -> impl Iterator<Item = (CubeCoordinate, &GridNode<T>)> + '_ {
        let width = self.size.width as usize;
        self.nodes.iter().enumerate().map(move |(i, node)| {
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            (CubeCoordinate::from_offset(x, y), node)
        })
    }

    pub fn vertex(&self, coordinate: CubeCoordinate) -> Option<&Vertex<T>> {
        self.node_at(coordinate).map(GridNode::vertex)
    }

    /// Get the edge from `coordinate` to its neighbor in `direction`. Edges in
    /// the non-canonical directions are stored on the node at the other end.
    /// Returns `None` if either end is outside the grid.
    pub fn edge(
        &self,
        coordinate: CubeCoordinate,
        direction: Direction,
    ) -> Option<&Edge<T>> {
        let (owner, slot) = edge_slot(coordinate, direction)?;
        self.node_at(owner)?.edges[slot].as_ref()
    }

    /// Get the face between `coordinate`'s neighbors in `direction.previous()`
    /// and `direction`. Only two of the six faces around a vertex are stored
    /// on its own node; the rest are looked up on a neighbor. Returns `None`
    /// if any corner of the face is outside the grid.
    pub fn face(
        &self,
        coordinate: CubeCoordinate,
        direction: Direction,
    ) -> Option<&Face<T>> {
        let (owner, orientation) = face_slot(coordinate, direction)?;
        self.node_at(owner)?.face(orientation)
    }

    /// Get the payload of any feature, or `None` if it isn't in the grid
    pub fn get(&self, feature: Feature) -> Option<&T> {
        match feature {
            Feature::Vertex(coordinate) => {
                self.vertex(coordinate).map(|vertex| &vertex.data)
            }
            Feature::Edge(DirectedCoordinate {
                coordinate,
                direction,
            }) => self.edge(coordinate, direction).map(|edge| &edge.data),
            Feature::Face(DirectedCoordinate {
                coordinate,
                direction,
            }) => self.face(coordinate, direction).map(|face| &face.data),
        }
    }

    /// Get a mutable reference to the payload of any feature, or `None` if it
    /// isn't in the grid
    pub fn get_mut(&mut self, feature: Feature) -> Option<&mut T> {
        match feature {
            Feature::Vertex(coordinate) => self
                .node_at_mut(coordinate)
                .map(|node| &mut node.vertex.data),
            Feature::Edge(DirectedCoordinate {
                coordinate,
                direction,
            }) => {
                let (owner, slot) = edge_slot(coordinate, direction)?;
                let edge = self.node_at_mut(owner)?.edges[slot].as_mut()?;
                Some(&mut edge.data)
            }
            Feature::Face(DirectedCoordinate {
                coordinate,
                direction,
            }) => {
                let (owner, orientation) = face_slot(coordinate, direction)?;
                let face = self.node_at_mut(owner)?.face_mut(orientation)?;
                Some(&mut face.data)
            }
        }
    }
}

/// Get the index of a vertex in the flat node list, or `None` if it's out of
/// bounds
fn node_index(size: GridSize, coordinate: CubeCoordinate) -> Option<usize> {
    let (x, y) = coordinate.checked_offset()?;
    if x < 0 || x >= size.width || y < 0 || y >= size.height {
        None
    } else {
        Some(y as usize * size.width as usize + x as usize)
    }
}

/// Find the node and edge slot that store the edge `(coordinate, direction)`.
/// `None` if the owner can't even be represented.
fn edge_slot(
    coordinate: CubeCoordinate,
    direction: Direction,
) -> Option<(CubeCoordinate, usize)> {
    if direction.is_canonical() {
        Some((coordinate, direction.index()))
    } else {
        // The far end owns it, in the opposite (canonical) direction
        let owner = coordinate.checked_neighbor(direction)?;
        Some((owner, direction.opposite().index()))
    }
}

/// Find the node and face slot that store the face `(coordinate, direction)`
fn face_slot(
    coordinate: CubeCoordinate,
    direction: Direction,
) -> Option<(CubeCoordinate, Orientation)> {
    let (step, orientation) = FACE_OWNERS[direction.index()];
    let owner = match step {
        Some(step) => coordinate.checked_neighbor(step)?,
        None => coordinate,
    };
    Some((owner, orientation))
}
