use std::collections::BTreeSet;

use crate::models::errors::{GameError, GameResult};
use crate::models::lattice::RayTable;
use crate::models::navigation_types::Direction;
use crate::models::vertex::VertexId;

/// A direction the player may choose, with the first vertex it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableDirection {
    pub direction: Direction,
    pub first_vertex: VertexId,
}

/// Directions whose ray is non-empty and whose first vertex does not block.
///
/// Hazards (black holes, kill zones) never disqualify a direction; they are
/// enterable.
pub fn available_directions(
    position: VertexId,
    rays: &RayTable,
    blocking: &BTreeSet<VertexId>,
) -> GameResult<Vec<AvailableDirection>> {
    let per_direction = rays.get(&position).ok_or(GameError::UnknownVertex(position))?;

    Ok(Direction::ALL
        .iter()
        .filter_map(|&direction| {
            let first_vertex = *per_direction[direction.index()].first()?;
            (!blocking.contains(&first_vertex)).then_some(AvailableDirection {
                direction,
                first_vertex,
            })
        })
        .collect())
}

/// True when no direction is available from `position`.
pub fn is_trapped(
    position: VertexId,
    rays: &RayTable,
    blocking: &BTreeSet<VertexId>,
) -> GameResult<bool> {
    Ok(available_directions(position, rays, blocking)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lattice::generate_lattice;

    #[test]
    fn center_of_single_hex_has_six_directions() {
        let lattice = generate_lattice(1, 1, 10.0).unwrap();
        let dirs =
            available_directions(VertexId::new(0, 0), lattice.rays(), &BTreeSet::new()).unwrap();
        assert_eq!(dirs.len(), 6);
    }

    #[test]
    fn blocked_first_vertex_removes_direction() {
        let lattice = generate_lattice(1, 1, 10.0).unwrap();
        let blocking = BTreeSet::from([VertexId::new(2, 0)]);
        let dirs = available_directions(VertexId::new(0, 0), lattice.rays(), &blocking).unwrap();
        assert_eq!(dirs.len(), 5);
        assert!(dirs.iter().all(|d| d.direction.value() != 0));
    }

    #[test]
    fn surrounded_center_is_trapped() {
        let lattice = generate_lattice(1, 1, 10.0).unwrap();
        let center = VertexId::new(0, 0);
        let blocking: BTreeSet<_> = lattice.neighbors(center).iter().copied().collect();
        assert!(is_trapped(center, lattice.rays(), &blocking).unwrap());
        assert!(!is_trapped(center, lattice.rays(), &BTreeSet::new()).unwrap());
    }

    #[test]
    fn unknown_position_fails_fast() {
        let lattice = generate_lattice(1, 1, 10.0).unwrap();
        assert!(matches!(
            available_directions(VertexId::new(40, 40), lattice.rays(), &BTreeSet::new()),
            Err(GameError::UnknownVertex(_))
        ));
    }
}
