use std::collections::{BTreeMap, BTreeSet};

use crate::models::vertex::{Vertex, VertexId, VertexKind};

use super::HexCenter;

/// Corner offsets of a flat-top hex, in lattice units, at 0, 60, ... 300 degrees.
const CORNER_OFFSETS: [(i32, i32); 6] = [(2, 0), (1, 1), (-1, 1), (-2, 0), (-1, -1), (1, -1)];

/// Vertex set and edges before rays are traced.
pub struct Topology {
    pub vertices: Vec<Vertex>,
    pub index: BTreeMap<VertexId, usize>,
    pub adjacency: BTreeMap<VertexId, Vec<VertexId>>,
    pub hex_centers: Vec<HexCenter>,
}

impl Topology {
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.get(&id).map(|&i| &self.vertices[i])
    }

    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Lattice position of the center of the hex at (column, row), odd-q layout.
/// Odd columns are shifted down by half a hex.
fn center_of(column: u32, row: u32) -> VertexId {
    let column = column as i32;
    let row = row as i32;
    VertexId::new(3 * column, 2 * row + (column & 1))
}

/// Build vertices and adjacency for a rectangular board of flat-top hexes.
/// Corners shared between hexes are deduplicated by their lattice key.
pub fn build_topology(columns: u32, rows: u32, hex_size: f64) -> Topology {
    let half_width = hex_size / 2.0;
    let half_height = hex_size * 3f64.sqrt() / 2.0;

    let mut vertices = Vec::new();
    let mut index = BTreeMap::new();
    let mut edges: BTreeMap<VertexId, BTreeSet<VertexId>> = BTreeMap::new();
    let mut hex_centers = Vec::with_capacity((columns * rows) as usize);

    let mut insert = |id: VertexId, kind: VertexKind, vertices: &mut Vec<Vertex>| {
        index.entry(id).or_insert_with(|| {
            vertices.push(Vertex {
                id,
                x: f64::from(id.x) * half_width,
                y: f64::from(id.y) * half_height,
                kind,
            });
            vertices.len() - 1
        });
    };

    let mut link = |a: VertexId, b: VertexId| {
        edges.entry(a).or_default().insert(b);
        edges.entry(b).or_default().insert(a);
    };

    for column in 0..columns {
        for row in 0..rows {
            let center = center_of(column, row);
            insert(center, VertexKind::Center, &mut vertices);
            hex_centers.push(HexCenter {
                column,
                row,
                vertex: center,
            });

            let corners =
                CORNER_OFFSETS.map(|(dx, dy)| VertexId::new(center.x + dx, center.y + dy));
            for corner in corners {
                insert(corner, VertexKind::Corner, &mut vertices);
            }

            for i in 0..corners.len() {
                // Hex edge
                link(corners[i], corners[(i + 1) % corners.len()]);
                // Hub-spoke
                link(center, corners[i]);
            }
        }
    }

    let adjacency = edges
        .into_iter()
        .map(|(id, neighbors)| (id, neighbors.into_iter().collect()))
        .collect();

    Topology {
        vertices,
        index,
        adjacency,
        hex_centers,
    }
}
