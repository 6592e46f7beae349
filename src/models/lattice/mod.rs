//! Lattice model
//!
//! The board graph: hex corners plus hex centers on a rectangular odd-q
//! arrangement, their adjacency, and six precomputed directional rays per
//! vertex. A lattice is generated once per board and never mutated.

mod generation;
mod rays;

use std::collections::BTreeMap;

use tracing::debug;

use super::constants::DIRECTION_COUNT;
use super::errors::{GameError, GameResult};
use super::navigation_types::Direction;
use super::vertex::{Vertex, VertexId, VertexKind};

use generation::build_topology;
use rays::build_rays;

/// `rays[vertex][direction]` is the ordered list of vertices walked in that
/// direction. An empty list means no movement is possible.
pub type RayTable = BTreeMap<VertexId, [Vec<VertexId>; DIRECTION_COUNT]>;

/// A hex of the board and the Center vertex injected at its middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexCenter {
    pub column: u32,
    pub row: u32,
    pub vertex: VertexId,
}

/// Generated board graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    columns: u32,
    rows: u32,
    hex_size: f64,
    vertices: Vec<Vertex>,
    index: BTreeMap<VertexId, usize>,
    adjacency: BTreeMap<VertexId, Vec<VertexId>>,
    rays: RayTable,
    hex_centers: Vec<HexCenter>,
}

/// Generate the lattice for a `columns` x `rows` board.
///
/// `hex_size` only scales pixel coordinates; topology depends on the
/// dimensions alone. Identical inputs always produce an identical lattice.
pub fn generate_lattice(columns: u32, rows: u32, hex_size: f64) -> GameResult<Lattice> {
    if columns == 0 || rows == 0 {
        return Err(GameError::InvalidConfiguration(format!(
            "board must have at least one column and row, got {}x{}",
            columns, rows
        )));
    }
    if !hex_size.is_finite() || hex_size <= 0.0 {
        return Err(GameError::InvalidConfiguration(format!(
            "hex size must be a positive number, got {}",
            hex_size
        )));
    }

    let topology = build_topology(columns, rows, hex_size);
    let rays = build_rays(&topology);

    let lattice = Lattice {
        columns,
        rows,
        hex_size,
        vertices: topology.vertices,
        index: topology.index,
        adjacency: topology.adjacency,
        rays,
        hex_centers: topology.hex_centers,
    };

    debug!(
        columns,
        rows,
        vertices = lattice.vertices.len(),
        edges = lattice.edge_count(),
        "generated lattice"
    );
    Ok(lattice)
}

impl Lattice {
    // ========== Accessor Methods ==========

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn hex_size(&self) -> f64 {
        self.hex_size
    }

    /// All vertices in generation order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.get(&id).map(|&i| &self.vertices[i])
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Fail fast on ids that do not belong to this lattice
    pub fn require(&self, id: VertexId) -> GameResult<&Vertex> {
        self.vertex(id).ok_or(GameError::UnknownVertex(id))
    }

    pub fn adjacency(&self) -> &BTreeMap<VertexId, Vec<VertexId>> {
        &self.adjacency
    }

    /// Sorted neighbor ids; empty for unknown vertices
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rays(&self) -> &RayTable {
        &self.rays
    }

    /// The ray from `id` in `direction`, or None for unknown vertices
    pub fn ray(&self, id: VertexId, direction: Direction) -> Option<&[VertexId]> {
        self.rays.get(&id).map(|r| r[direction.index()].as_slice())
    }

    pub fn hex_centers(&self) -> &[HexCenter] {
        &self.hex_centers
    }

    // ========== End Accessor Methods ==========

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn count_of(&self, kind: VertexKind) -> usize {
        self.vertices.iter().filter(|v| v.kind == kind).count()
    }

    /// Default start and target: the left-most and right-most corners.
    pub fn default_endpoints(&self) -> (VertexId, VertexId) {
        let corners = || {
            self.vertices
                .iter()
                .filter(|v| v.kind == VertexKind::Corner)
                .map(|v| v.id)
        };
        // Every hex has corners, so neither iterator is empty.
        let start = corners().min_by_key(|id| (id.x, id.y)).unwrap_or(self.vertices[0].id);
        let target = corners().max_by_key(|id| (id.x, id.y)).unwrap_or(self.vertices[0].id);
        (start, target)
    }
}
