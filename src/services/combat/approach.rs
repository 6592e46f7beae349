use crate::models::navigation_types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combatant {
    Player,
    Enemy,
}

/// Opening turn order derived from how the player entered the kill zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproachAdvantage {
    pub first_attacker: Combatant,
    /// Extra player attacks before the enemy's first turn
    pub bonus_attacks: u32,
}

impl Default for ApproachAdvantage {
    fn default() -> Self {
        ApproachAdvantage {
            first_attacker: Combatant::Player,
            bonus_attacks: 0,
        }
    }
}

/// Head-on approaches hand the enemy the first shot; approaching from behind
/// grants the player a bonus attack. Any other angle is standard alternation.
pub fn approach_advantage(
    player_direction: Direction,
    enemy_facing: Direction,
) -> ApproachAdvantage {
    if player_direction == enemy_facing.opposite() {
        ApproachAdvantage {
            first_attacker: Combatant::Enemy,
            bonus_attacks: 0,
        }
    } else if player_direction == enemy_facing {
        ApproachAdvantage {
            first_attacker: Combatant::Player,
            bonus_attacks: 1,
        }
    } else {
        ApproachAdvantage::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(d: u8) -> Direction {
        Direction::new(d).unwrap()
    }

    #[test]
    fn head_on_enemy_fires_first() {
        for facing in Direction::ALL {
            let adv = approach_advantage(facing.opposite(), facing);
            assert_eq!(adv.first_attacker, Combatant::Enemy);
            assert_eq!(adv.bonus_attacks, 0);
        }
    }

    #[test]
    fn from_behind_grants_bonus() {
        let adv = approach_advantage(dir(2), dir(2));
        assert_eq!(adv.first_attacker, Combatant::Player);
        assert_eq!(adv.bonus_attacks, 1);
    }

    #[test]
    fn flanking_is_standard() {
        let facing = dir(0);
        for player in [1, 2, 4, 5] {
            assert_eq!(approach_advantage(dir(player), facing), ApproachAdvantage::default());
        }
    }
}
