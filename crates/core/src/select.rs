use crate::{
    config::SelectionConfig,
    geometry::GridGeometry,
    grid::{Feature, FractionalCoordinate, TriangleGrid},
};
use anyhow::Context;
use derive_more::Display;
use log::trace;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Resolves pointer positions to grid features. A picker applies a fixed
/// priority: anything within [SelectionConfig::vertex_radius] of a vertex
/// selects that vertex, then anything within [SelectionConfig::edge_width]
/// of an edge selects that edge, and everything else selects whichever face
/// it falls in.
///
/// If the highest-priority candidate doesn't exist in the grid (e.g. the
/// pointer is near a vertex just past the border), nothing is selected. Lower
/// priorities are **not** considered in that case.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Picker {
    geometry: GridGeometry,
    config: SelectionConfig,
}

/// The result of a pick: the grid position that was tested, and the feature
/// under it, if any
#[derive(Copy, Clone, Debug, Display, PartialEq, Serialize, Deserialize)]
#[display(fmt = "{} -> {:?}", point, selection)]
pub struct Pick {
    pub point: FractionalCoordinate,
    pub selection: Option<Feature>,
}

impl Picker {
    /// Returns an error if the selection config is invalid
    pub fn new(
        geometry: GridGeometry,
        config: SelectionConfig,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid selection config")?;
        Ok(Self { geometry, config })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Figure out which feature of the grid is under a point. Use
    /// [Viewport::to_grid](crate::Viewport::to_grid) to get a grid point from
    /// a pointer position.
    pub fn pick<T>(
        &self,
        grid: &TriangleGrid<T>,
        point: FractionalCoordinate,
    ) -> Pick {
        let candidate = self.candidate(point);
        let selection = grid.get(candidate).and(Some(candidate));
        let pick = Pick { point, selection };
        trace!("Picked {} (candidate {})", pick, candidate);
        pick
    }

    /// Get the highest-priority feature under a point, regardless of whether
    /// it's actually in the grid
    fn candidate(&self, point: FractionalCoordinate) -> Feature {
        let (vertex, vertex_distance) = self.geometry.nearest_vertex(point);
        if vertex_distance < self.config.vertex_radius {
            return Feature::Vertex(vertex);
        }

        let (edge, edge_distance) = self.geometry.nearest_edge(point);
        if edge_distance < self.config.edge_width {
            return Feature::Edge(edge);
        }

        Feature::Face(self.geometry.face_at(point))
    }
}
