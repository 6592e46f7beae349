use std::collections::{BTreeMap, BTreeSet, VecDeque};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starlattice::models::board_object::{BoardObjects, ObjectId};
use starlattice::models::constants::BoardSize;
use starlattice::models::lattice::Lattice;
use starlattice::models::navigation_types::{Difficulty, Direction};
use starlattice::models::ship::Ship;
use starlattice::models::vertex::{VertexId, VertexKind};
use starlattice::services::combat::{
    ApproachAdvantage, CombatConfig, CombatEngine, CombatResult, Combatant, FixedDice,
};
use starlattice::services::navigation::{available_directions, Hazards};
use starlattice::services::placement::{obstacle_pct, power_up_pct};
use starlattice::{compute_path, generate_board_objects, generate_lattice, GameError};

fn board(lattice: &Lattice, seed: u64, difficulty: u8) -> Option<BoardObjects> {
    let (start, target) = lattice.default_endpoints();
    let difficulty = Difficulty::new(difficulty).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    match generate_board_objects(lattice, start, target, difficulty, &mut rng) {
        Ok(objects) => Some(objects),
        Err(GameError::PlacementFailed { .. }) => None,
        Err(e) => panic!("unexpected placement error: {}", e),
    }
}

/// Plain BFS, written separately from the placement check
fn reachable(
    lattice: &Lattice,
    from: VertexId,
    to: VertexId,
    blocking: &BTreeSet<VertexId>,
) -> bool {
    let mut visited = BTreeSet::new();
    let mut frontier = VecDeque::new();
    visited.insert(from);
    frontier.push_back(from);
    while let Some(at) = frontier.pop_front() {
        if at == to {
            return true;
        }
        for next in lattice.neighbors(at) {
            if !blocking.contains(next) && visited.insert(*next) {
                frontier.push_back(*next);
            }
        }
    }
    false
}

proptest! {
    /// Property: hex centers have six neighbours, corners at most six
    #[test]
    fn vertex_degrees(columns in 1u32..8, rows in 1u32..8) {
        let lattice = generate_lattice(columns, rows, 40.0).unwrap();
        for vertex in lattice.vertices() {
            let degree = lattice.neighbors(vertex.id).len();
            match vertex.kind {
                VertexKind::Center => prop_assert_eq!(degree, 6),
                VertexKind::Corner => prop_assert!(degree <= 6 && degree >= 2),
            }
        }
    }

    /// Property: generation is a pure function of its inputs
    #[test]
    fn lattice_regeneration_is_identical(
        columns in 1u32..8,
        rows in 1u32..8,
        size in 1.0f64..100.0
    ) {
        let a = generate_lattice(columns, rows, size).unwrap();
        let b = generate_lattice(columns, rows, size).unwrap();
        prop_assert_eq!(a.vertices().len(), b.vertices().len());
        prop_assert_eq!(a.edge_count(), b.edge_count());
        prop_assert_eq!(a, b);
    }

    /// Property: rays are simple paths along lattice edges
    #[test]
    fn rays_are_well_formed(columns in 1u32..7, rows in 1u32..7) {
        let lattice = generate_lattice(columns, rows, 40.0).unwrap();
        for vertex in lattice.vertices() {
            for direction in Direction::ALL {
                let ray = lattice.ray(vertex.id, direction).unwrap();
                let unique: BTreeSet<_> = ray.iter().collect();
                prop_assert_eq!(unique.len(), ray.len());
                prop_assert!(!unique.contains(&vertex.id));

                let mut previous = vertex.id;
                for &next in ray {
                    prop_assert!(lattice.neighbors(previous).contains(&next));
                    let both_centers = lattice.vertex(previous).unwrap().is_center()
                        && lattice.vertex(next).unwrap().is_center();
                    prop_assert!(!both_centers);
                    previous = next;
                }
            }
        }
    }

    /// Property: empty hazard lookups behave exactly like omitted ones
    #[test]
    fn empty_hazards_match_no_hazards(
        seed in any::<u64>(),
        difficulty in 1u8..=10,
        steps in 1u32..10
    ) {
        let lattice = generate_lattice(5, 4, 40.0).unwrap();
        let Some(objects) = board(&lattice, seed, difficulty) else { return Ok(()); };
        let (_, target) = lattice.default_endpoints();
        let holes = BTreeSet::new();
        let zones: BTreeMap<VertexId, ObjectId> = BTreeMap::new();
        let blocking = objects.blocking_set();

        for vertex in lattice.vertices() {
            for direction in Direction::ALL {
                let rays = lattice.rays();
                let bare = compute_path(
                    rays,
                    vertex.id,
                    direction,
                    steps,
                    blocking,
                    target,
                    Hazards::none(),
                )
                .unwrap();
                let empty = compute_path(
                    rays,
                    vertex.id,
                    direction,
                    steps,
                    blocking,
                    target,
                    Hazards::new(&holes, &zones),
                )
                .unwrap();
                prop_assert_eq!(bare, empty);
            }
        }
    }

    /// Property: paths never enter a blocking vertex; hazards end the path on themselves
    #[test]
    fn paths_respect_obstacles_and_include_hazards(
        seed in any::<u64>(),
        difficulty in 3u8..=10,
        steps in 1u32..12
    ) {
        let lattice = generate_lattice(7, 6, 40.0).unwrap();
        let Some(objects) = board(&lattice, seed, difficulty) else { return Ok(()); };
        let (_, target) = lattice.default_endpoints();
        let blocking = objects.blocking_set();
        let hazards = Hazards::new(objects.black_hole_set(), objects.enemy_zone_map());

        for vertex in lattice.vertices() {
            let open = available_directions(vertex.id, lattice.rays(), blocking).unwrap();
            for direction in Direction::ALL {
                let ray = lattice.ray(vertex.id, direction).unwrap();
                let listed = open.iter().any(|a| a.direction == direction);
                prop_assert_eq!(listed, ray.first().is_some_and(|v| !blocking.contains(v)));

                let result = compute_path(
                    lattice.rays(),
                    vertex.id,
                    direction,
                    steps,
                    blocking,
                    target,
                    hazards,
                )
                .unwrap();
                prop_assert!(result.path.iter().all(|v| !blocking.contains(v)));
                prop_assert!(result.steps() <= steps);
                if result.hit_black_hole {
                    prop_assert!(objects.black_hole_set().contains(&result.end().unwrap()));
                }
                if let Some(engagement) = result.engaged_enemy {
                    prop_assert_eq!(engagement.vertex_index, result.path.len() - 1);
                    let end = result.end().unwrap();
                    prop_assert_eq!(objects.enemy_zone_map().get(&end), Some(&engagement.enemy_id));
                }
            }
        }
    }

    /// Property: every generated board leaves the target reachable
    #[test]
    fn boards_are_connected(seed in any::<u64>(), difficulty in 1u8..=10, preset in 0usize..3) {
        let (columns, rows) = BoardSize::ALL[preset].dimensions();
        let lattice = generate_lattice(columns, rows, 40.0).unwrap();
        let Some(objects) = board(&lattice, seed, difficulty) else { return Ok(()); };
        let (start, target) = lattice.default_endpoints();

        prop_assert!(reachable(&lattice, start, target, objects.blocking_set()));

        let occupied: Vec<_> = objects.occupied().collect();
        let unique: BTreeSet<_> = occupied.iter().collect();
        prop_assert_eq!(unique.len(), occupied.len());
        prop_assert!(!unique.contains(&start));
        prop_assert!(!unique.contains(&target));
    }

    /// Property: placement counts track the difficulty percentages
    #[test]
    fn placement_budget_bounds(seed in any::<u64>(), pick in 0usize..3) {
        let difficulty = [1u8, 5, 10][pick];
        let lattice = generate_lattice(7, 6, 40.0).unwrap();
        let Some(objects) = board(&lattice, seed, difficulty) else { return Ok(()); };

        let eligible = (lattice.vertices().len() - 2) as f64;
        let d = Difficulty::new(difficulty).unwrap();
        let expected_obstacles = (eligible * obstacle_pct(d)).floor() as i64;
        let expected_power_ups = (eligible * power_up_pct(d)).floor() as i64;

        prop_assert!((objects.obstacle_class_count() as i64 - expected_obstacles).abs() <= 1);
        prop_assert!((objects.power_ups.len() as i64 - expected_power_ups).abs() <= 1);
        if difficulty < 3 {
            prop_assert!(objects.enemies.is_empty());
        }
    }

    /// Property: combat always concludes within the turn limit
    #[test]
    fn combat_terminates(
        rolls in prop::collection::vec(1u8..=6, 1..20),
        picks in prop::collection::vec(0usize..3, 1..10),
        value in 1u8..=10
    ) {
        let config = CombatConfig::default();
        let mut engine = CombatEngine::new(
            Ship::player(),
            Ship::enemy(value),
            ApproachAdvantage::default(),
            config,
        );
        let mut dice = FixedDice::new(rolls).with_picks(picks);

        let mut attacks = 0;
        while let Some(turn) = engine.turn() {
            match turn {
                Combatant::Player if !engine.player().can_attack() => {
                    engine.escape().unwrap();
                }
                Combatant::Player => {
                    let target = engine
                        .enemy()
                        .active_components()
                        .next()
                        .map(|c| c.name.clone())
                        .unwrap();
                    engine.execute_player_attack(&target, &mut dice).unwrap();
                    attacks += 1;
                }
                Combatant::Enemy => {
                    engine.execute_enemy_attack(&mut dice).unwrap();
                    attacks += 1;
                }
            }
        }

        prop_assert!(attacks <= 2 * config.max_turns);
        match engine.result().unwrap() {
            CombatResult::PlayerWin => prop_assert!(engine.enemy().is_bridge_destroyed()),
            CombatResult::PlayerDestroyed => prop_assert!(
                engine.player().is_bridge_destroyed() || engine.player().all_destroyed()
            ),
            _ => {}
        }
    }
}
