use std::collections::{BTreeMap, BTreeSet};

use crate::models::constants::DIRECTION_COUNT;
use crate::models::navigation_types::Direction;
use crate::models::vertex::{Vertex, VertexId};

use super::generation::Topology;
use super::RayTable;

/// A neighbor only continues a direction if it lies within half a sector of it.
const HALF_SECTOR_DEGREES: f64 = 30.0;

/// Screen-space angle from one vertex to another, in [0, 360).
fn bearing(from: &Vertex, to: &Vertex) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees().rem_euclid(360.0)
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// The neighbor of `from` whose bearing is closest to `direction`, if any lies
/// inside the direction's sector.
pub fn step(topology: &Topology, from: VertexId, direction: Direction) -> Option<VertexId> {
    let origin = topology.vertex(from)?;
    let wanted = direction.angle_degrees();

    topology
        .neighbors(from)
        .iter()
        .filter_map(|id| {
            let neighbor = topology.vertex(*id)?;
            let off = angular_distance(bearing(origin, neighbor), wanted);
            (off < HALF_SECTOR_DEGREES).then_some((*id, off))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Walk the graph from `origin` in `direction` until the board edge.
fn trace(topology: &Topology, origin: VertexId, direction: Direction) -> Vec<VertexId> {
    let mut ray = Vec::new();
    let mut seen = BTreeSet::from([origin]);
    let mut current = origin;

    while let Some(next) = step(topology, current, direction) {
        if !seen.insert(next) {
            break;
        }
        ray.push(next);
        current = next;
    }
    ray
}

/// Precompute the six rays of every vertex.
pub fn build_rays(topology: &Topology) -> RayTable {
    let mut rays = BTreeMap::new();
    for vertex in &topology.vertices {
        let per_direction: [Vec<VertexId>; DIRECTION_COUNT] =
            Direction::ALL.map(|d| trace(topology, vertex.id, d));
        rays.insert(vertex.id, per_direction);
    }
    rays
}
