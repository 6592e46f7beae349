//! Board object placement
//!
//! Difficulty-driven random placement of obstacles, black holes, enemies and
//! power-ups on a generated lattice, certified to leave the target reachable.

mod budget;
mod connectivity;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::models::board_object::{BoardObjects, Enemy, Marker, ObjectId};
use crate::models::constants::{DIRECTION_COUNT, MAX_VISION_RANGE, PLACEMENT_ATTEMPTS};
use crate::models::errors::{GameError, GameResult};
use crate::models::lattice::Lattice;
use crate::models::navigation_types::{Difficulty, Direction};
use crate::models::ship::Ship;
use crate::models::vertex::VertexId;

pub use budget::{
    obstacle_pct, obstacle_value_range, power_up_pct, power_up_value_range, PlacementBudget,
};
pub use connectivity::is_reachable;

/// Populate a board with hazards and pickups.
///
/// Every draw comes from `rng`, so a seeded generator reproduces the board.
/// Placement is retried until `start` can reach `target` over non-blocking
/// vertices; black holes and kill zones do not count as blocking.
///
/// # Errors
///
/// * `UnknownVertex` if `start` or `target` is not in the lattice
/// * `InvalidConfiguration` if `start == target`
/// * `PlacementFailed` if no attempt leaves the target reachable
pub fn generate_board_objects<R: Rng + ?Sized>(
    lattice: &Lattice,
    start: VertexId,
    target: VertexId,
    difficulty: Difficulty,
    rng: &mut R,
) -> GameResult<BoardObjects> {
    lattice.require(start)?;
    lattice.require(target)?;
    if start == target {
        return Err(GameError::InvalidConfiguration(
            "start and target must be different vertices".to_string(),
        ));
    }

    let eligible: Vec<VertexId> = lattice
        .vertices()
        .iter()
        .map(|v| v.id)
        .filter(|id| *id != start && *id != target)
        .collect();
    let budget = PlacementBudget::for_board(eligible.len(), difficulty);
    debug!(
        eligible = eligible.len(),
        planned = budget.total(),
        obstacle_class = budget.obstacle_class(),
        "placement budget"
    );

    for attempt in 1..=PLACEMENT_ATTEMPTS {
        let objects = place_once(lattice, &eligible, budget, difficulty, rng);
        if is_reachable(lattice, start, target, objects.blocking_set()) {
            debug!(
                attempt,
                obstacles = objects.obstacles.len(),
                black_holes = objects.black_holes.len(),
                enemies = objects.enemies.len(),
                power_ups = objects.power_ups.len(),
                threat = objects.total_threat(),
                "placed board objects"
            );
            return Ok(objects);
        }
        warn!(attempt, "placement left the target unreachable, retrying");
    }

    Err(GameError::PlacementFailed {
        attempts: PLACEMENT_ATTEMPTS,
    })
}

/// One randomized placement. Shuffling the eligible vertices and dealing
/// them out in slices guarantees no two objects share a vertex.
fn place_once<R: Rng + ?Sized>(
    lattice: &Lattice,
    eligible: &[VertexId],
    budget: PlacementBudget,
    difficulty: Difficulty,
    rng: &mut R,
) -> BoardObjects {
    let mut pool = eligible.to_vec();
    pool.shuffle(rng);
    let mut deal = pool.into_iter();
    let mut next_id = 0u32;
    let mut new_id = || {
        next_id += 1;
        ObjectId(next_id)
    };

    let hazard_values = obstacle_value_range(difficulty);
    let pickup_values = power_up_value_range(difficulty);

    let mut markers = |count: usize, values: &std::ops::RangeInclusive<u8>, rng: &mut R| {
        deal.by_ref()
            .take(count)
            .map(|vertex| Marker {
                id: new_id(),
                vertex,
                value: rng.gen_range(values.clone()),
            })
            .collect::<Vec<_>>()
    };

    let obstacles = markers(budget.obstacles, &hazard_values, rng);
    let black_holes = markers(budget.black_holes, &hazard_values, rng);
    let enemy_markers = markers(budget.enemies, &hazard_values, rng);
    let power_ups = markers(budget.power_ups, &pickup_values, rng);

    let enemies = enemy_markers
        .into_iter()
        .map(|m| {
            let facing = Direction::ALL[rng.gen_range(0..DIRECTION_COUNT)];
            let vision_range = rng.gen_range(1..=MAX_VISION_RANGE);
            let zone = lattice
                .ray(m.vertex, facing)
                .map(|ray| ray.iter().take(vision_range as usize).copied().collect())
                .unwrap_or_default();
            Enemy {
                id: m.id,
                vertex: m.vertex,
                value: m.value,
                facing,
                vision_range,
                zone,
                ship: Ship::enemy(m.value),
            }
        })
        .collect();

    BoardObjects::new(obstacles, power_ups, black_holes, enemies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lattice::generate_lattice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn d(value: u8) -> Difficulty {
        Difficulty::new(value).unwrap()
    }

    fn board(difficulty: u8, seed: u64) -> (Lattice, VertexId, VertexId, BoardObjects) {
        let lattice = generate_lattice(7, 6, 10.0).unwrap();
        let (start, target) = lattice.default_endpoints();
        let mut rng = StdRng::seed_from_u64(seed);
        let objects =
            generate_board_objects(&lattice, start, target, d(difficulty), &mut rng).unwrap();
        (lattice, start, target, objects)
    }

    #[test]
    fn same_seed_same_board() {
        let (_, _, _, a) = board(6, 11);
        let (_, _, _, b) = board(6, 11);
        assert_eq!(a, b);
    }

    #[test]
    fn no_overlap_and_endpoints_free() {
        for seed in 0..10 {
            let (_, start, target, objects) = board(9, seed);
            let occupied: Vec<_> = objects.occupied().collect();
            let unique: BTreeSet<_> = occupied.iter().copied().collect();
            assert_eq!(occupied.len(), unique.len());
            assert!(!unique.contains(&start));
            assert!(!unique.contains(&target));
        }
    }

    #[test]
    fn enemy_zone_is_prefix_of_facing_ray() {
        let (lattice, _, _, objects) = board(10, 3);
        assert!(!objects.enemies.is_empty());
        for enemy in &objects.enemies {
            let ray = lattice.ray(enemy.vertex, enemy.facing).unwrap();
            assert!(enemy.zone.len() <= enemy.vision_range as usize);
            assert_eq!(&ray[..enemy.zone.len()], enemy.zone.as_slice());
            assert!((1..=6).contains(&enemy.vision_range));
            assert!(objects.blocking_set().contains(&enemy.vertex));
        }
    }

    #[test]
    fn values_fall_in_difficulty_ranges() {
        let (_, _, _, objects) = board(2, 5);
        for m in objects.obstacles.iter().chain(&objects.black_holes) {
            assert!((1..=4).contains(&m.value));
        }
        for p in &objects.power_ups {
            assert!((7..=10).contains(&p.value));
        }
        assert!(objects.enemies.is_empty());
    }

    #[test]
    fn start_equal_to_target_is_rejected() {
        let lattice = generate_lattice(3, 3, 10.0).unwrap();
        let (start, _) = lattice.default_endpoints();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_board_objects(&lattice, start, start, d(5), &mut rng),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let lattice = generate_lattice(3, 3, 10.0).unwrap();
        let (start, _) = lattice.default_endpoints();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_board_objects(&lattice, start, VertexId::new(500, 500), d(5), &mut rng),
            Err(GameError::UnknownVertex(_))
        ));
    }
}
