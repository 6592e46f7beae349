use std::collections::{BTreeMap, BTreeSet};

use crate::models::board_object::ObjectId;
use crate::models::errors::{GameError, GameResult};
use crate::models::lattice::RayTable;
use crate::models::navigation_types::Direction;
use crate::models::vertex::VertexId;

/// Optional hazard lookups. Leaving both out reduces path computation to
/// plain obstacle and target handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hazards<'a> {
    pub black_holes: Option<&'a BTreeSet<VertexId>>,
    pub enemy_zones: Option<&'a BTreeMap<VertexId, ObjectId>>,
}

impl<'a> Hazards<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(
        black_holes: &'a BTreeSet<VertexId>,
        enemy_zones: &'a BTreeMap<VertexId, ObjectId>,
    ) -> Self {
        Hazards {
            black_holes: Some(black_holes),
            enemy_zones: Some(enemy_zones),
        }
    }

    fn is_black_hole(&self, v: &VertexId) -> bool {
        self.black_holes.is_some_and(|set| set.contains(v))
    }

    fn zone_owner(&self, v: &VertexId) -> Option<ObjectId> {
        self.enemy_zones.and_then(|map| map.get(v).copied())
    }
}

/// Entry into an enemy kill zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
    /// Index into `PathResult::path` of the zone vertex
    pub vertex_index: usize,
    pub enemy_id: ObjectId,
}

/// Realized movement along a ray. `path` excludes the starting position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResult {
    pub path: Vec<VertexId>,
    pub stopped_by_obstacle: bool,
    pub reached_target: bool,
    pub hit_black_hole: bool,
    pub engaged_enemy: Option<Engagement>,
}

impl PathResult {
    /// Where the token ends up, or None if it never moved
    pub fn end(&self) -> Option<VertexId> {
        self.path.last().copied()
    }

    pub fn steps(&self) -> u32 {
        self.path.len() as u32
    }
}

/// Walk the ray for `direction` from `position`, taking at most `max_steps`.
///
/// Each candidate vertex is checked in order:
/// 1. blocking: stop before it
/// 2. black hole: include it and stop
/// 3. enemy zone: include it and stop, recording the engagement
/// 4. target: include it and stop
///
/// Hazards therefore win over the target when they share a vertex.
pub fn compute_path(
    rays: &RayTable,
    position: VertexId,
    direction: Direction,
    max_steps: u32,
    blocking: &BTreeSet<VertexId>,
    target: VertexId,
    hazards: Hazards<'_>,
) -> GameResult<PathResult> {
    let ray = &rays.get(&position).ok_or(GameError::UnknownVertex(position))?[direction.index()];
    let mut result = PathResult::default();

    for &next in ray.iter().take(max_steps as usize) {
        if blocking.contains(&next) {
            result.stopped_by_obstacle = true;
            break;
        }
        if hazards.is_black_hole(&next) {
            result.path.push(next);
            result.hit_black_hole = true;
            break;
        }
        if let Some(enemy_id) = hazards.zone_owner(&next) {
            result.path.push(next);
            result.engaged_enemy = Some(Engagement {
                vertex_index: result.path.len() - 1,
                enemy_id,
            });
            break;
        }
        result.path.push(next);
        if next == target {
            result.reached_target = true;
            break;
        }
    }

    Ok(result)
}
