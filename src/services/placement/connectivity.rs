use std::collections::{BTreeSet, VecDeque};

use crate::models::lattice::Lattice;
use crate::models::vertex::VertexId;

/// Breadth-first search from `start` to `target` over the adjacency graph,
/// never entering a blocking vertex. Hazards are walkable here.
pub fn is_reachable(
    lattice: &Lattice,
    start: VertexId,
    target: VertexId,
    blocking: &BTreeSet<VertexId>,
) -> bool {
    if start == target {
        return true;
    }

    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for &next in lattice.neighbors(current) {
            if blocking.contains(&next) || !seen.insert(next) {
                continue;
            }
            if next == target {
                return true;
            }
            queue.push_back(next);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lattice::generate_lattice;

    #[test]
    fn open_board_is_connected() {
        let lattice = generate_lattice(4, 3, 10.0).unwrap();
        let (start, target) = lattice.default_endpoints();
        assert!(is_reachable(&lattice, start, target, &BTreeSet::new()));
    }

    #[test]
    fn walled_in_start_is_unreachable() {
        let lattice = generate_lattice(4, 3, 10.0).unwrap();
        let (start, target) = lattice.default_endpoints();
        let wall: BTreeSet<_> = lattice.neighbors(start).iter().copied().collect();
        assert!(!is_reachable(&lattice, start, target, &wall));
    }
}
