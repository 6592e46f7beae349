use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::navigation_types::Direction;
use super::ship::Ship;
use super::vertex::VertexId;

/// Identifier of a placed object, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Blocks movement
    Obstacle,
    /// Passive collectible
    PowerUp,
    /// Enterable; ends the game on entry
    BlackHole,
    /// Blocks its own vertex and guards a kill zone
    Enemy,
}

impl ObjectKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            ObjectKind::Obstacle => "#",
            ObjectKind::PowerUp => "+",
            ObjectKind::BlackHole => "@",
            ObjectKind::Enemy => "E",
        }
    }
}

/// An obstacle, power-up or black hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub id: ObjectId,
    pub vertex: VertexId,
    pub value: u8,
}

/// A stationary sentry with a persistent combat ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub id: ObjectId,
    pub vertex: VertexId,
    pub value: u8,
    pub facing: Direction,
    pub vision_range: u8,
    /// Vertices along the facing ray, up to the vision range
    pub zone: Vec<VertexId>,
    pub ship: Ship,
}

impl Enemy {
    /// Threat points this sentry costs. Linear in vision range for now.
    pub fn threat_cost(&self) -> u32 {
        u32::from(self.vision_range)
    }
}

/// Everything placed on a board plus the derived lookup sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardObjects {
    pub obstacles: Vec<Marker>,
    pub power_ups: Vec<Marker>,
    pub black_holes: Vec<Marker>,
    pub enemies: Vec<Enemy>,
    blocking: BTreeSet<VertexId>,
    black_hole_set: BTreeSet<VertexId>,
    enemy_zones: BTreeMap<VertexId, ObjectId>,
}

impl BoardObjects {
    pub fn new(
        obstacles: Vec<Marker>,
        power_ups: Vec<Marker>,
        black_holes: Vec<Marker>,
        enemies: Vec<Enemy>,
    ) -> Self {
        let mut objects = BoardObjects {
            obstacles,
            power_ups,
            black_holes,
            enemies,
            ..Default::default()
        };
        objects.rebuild_lookups();
        objects
    }

    /// Recompute blocking, black-hole and zone lookups from the object lists.
    /// A zone vertex watched by several enemies belongs to the first one.
    fn rebuild_lookups(&mut self) {
        self.blocking = self
            .obstacles
            .iter()
            .map(|o| o.vertex)
            .chain(self.enemies.iter().map(|e| e.vertex))
            .collect();
        self.black_hole_set = self.black_holes.iter().map(|b| b.vertex).collect();
        self.enemy_zones.clear();
        for enemy in &self.enemies {
            for v in &enemy.zone {
                self.enemy_zones.entry(*v).or_insert(enemy.id);
            }
        }
    }

    /// Vertices that physically stop movement
    pub fn blocking_set(&self) -> &BTreeSet<VertexId> {
        &self.blocking
    }

    pub fn black_hole_set(&self) -> &BTreeSet<VertexId> {
        &self.black_hole_set
    }

    /// Zone vertex -> owning enemy
    pub fn enemy_zone_map(&self) -> &BTreeMap<VertexId, ObjectId> {
        &self.enemy_zones
    }

    pub fn enemy(&self, id: ObjectId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: ObjectId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Take a defeated enemy off the board, freeing its vertex and zone.
    pub fn remove_enemy(&mut self, id: ObjectId) -> Option<Enemy> {
        let pos = self.enemies.iter().position(|e| e.id == id)?;
        let enemy = self.enemies.remove(pos);
        self.rebuild_lookups();
        Some(enemy)
    }

    /// Remove and return the power-up at `vertex`, if any
    pub fn collect_power_up(&mut self, vertex: VertexId) -> Option<Marker> {
        let pos = self.power_ups.iter().position(|p| p.vertex == vertex)?;
        Some(self.power_ups.remove(pos))
    }

    pub fn object_at(&self, vertex: VertexId) -> Option<ObjectKind> {
        let at = |list: &[Marker]| list.iter().any(|m| m.vertex == vertex);
        if at(&self.obstacles) {
            Some(ObjectKind::Obstacle)
        } else if at(&self.black_holes) {
            Some(ObjectKind::BlackHole)
        } else if at(&self.power_ups) {
            Some(ObjectKind::PowerUp)
        } else if self.enemies.iter().any(|e| e.vertex == vertex) {
            Some(ObjectKind::Enemy)
        } else {
            None
        }
    }

    /// Obstacles, black holes and enemies
    pub fn obstacle_class_count(&self) -> usize {
        self.obstacles.len() + self.black_holes.len() + self.enemies.len()
    }

    pub fn total_threat(&self) -> u32 {
        self.enemies.iter().map(Enemy::threat_cost).sum()
    }

    /// Every occupied vertex, in placement order
    pub fn occupied(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.obstacles
            .iter()
            .chain(&self.black_holes)
            .chain(&self.power_ups)
            .map(|m| m.vertex)
            .chain(self.enemies.iter().map(|e| e.vertex))
    }
}
