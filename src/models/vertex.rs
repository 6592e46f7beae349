use std::fmt;

/// Stable key of a lattice vertex.
///
/// Coordinates are in integer lattice units: `x` counts half hex sizes,
/// `y` counts half hex heights. Centers and corners never share a key, and
/// the key of a given position is identical across regenerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    pub x: i32,
    pub y: i32,
}

impl VertexId {
    pub const fn new(x: i32, y: i32) -> Self {
        VertexId { x, y }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Hex corner, part of the triangular lattice
    Corner,
    /// Hex center, connected only to its hex's six corners
    Center,
}

/// A position on the board, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    pub kind: VertexKind,
}

impl Vertex {
    pub fn is_center(&self) -> bool {
        self.kind == VertexKind::Center
    }
}
