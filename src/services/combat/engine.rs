use tracing::{debug, info};

use crate::models::constants::{DEFAULT_MAX_TURNS, DIE_SIDES};
use crate::models::errors::{GameError, GameResult};
use crate::models::ship::Ship;

use super::approach::{ApproachAdvantage, Combatant};
use super::dice::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatConfig {
    /// Full turns per side. Combat lasts at most twice this many attacks,
    /// bonus attacks included, before the player is forced to retreat.
    pub max_turns: u32,
    pub die_sides: u8,
}

impl Default for CombatConfig {
    fn default() -> Self {
        CombatConfig {
            max_turns: DEFAULT_MAX_TURNS,
            die_sides: DIE_SIDES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    /// Enemy bridge destroyed
    PlayerWin,
    /// Player bridge or every player component destroyed
    PlayerDestroyed,
    /// Turn limit reached, the player retreats
    PlayerLose,
    /// Enemy weapon and engine out, bridge intact
    EnemyFled,
    /// Player disengaged voluntarily
    Escaped,
}

impl CombatResult {
    pub fn label(&self) -> &'static str {
        match self {
            CombatResult::PlayerWin => "ENEMY DESTROYED",
            CombatResult::PlayerDestroyed => "YOUR SHIP HAS BEEN DESTROYED",
            CombatResult::PlayerLose => "FORCED TO RETREAT",
            CombatResult::EnemyFled => "ENEMY CRIPPLED AND FLEEING",
            CombatResult::Escaped => "ESCAPED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatStatus {
    AwaitingPlayerAction,
    AwaitingEnemyAction,
    Concluded(CombatResult),
}

/// Result of one attack, detailed enough to animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attacker: Combatant,
    pub roll: u8,
    pub is_hit: bool,
    pub target_component: String,
    pub damage: u32,
    pub destroyed: bool,
    pub combat_over: bool,
    pub result: Option<CombatResult>,
}

/// Turn-based duel between the player ship and one enemy ship.
///
/// The engine owns both ships for the length of the engagement; hand them
/// back with [`CombatEngine::into_ships`].
#[derive(Debug, Clone)]
pub struct CombatEngine {
    player: Ship,
    enemy: Ship,
    config: CombatConfig,
    status: CombatStatus,
    bonus_remaining: u32,
    player_attacks: u32,
    enemy_attacks: u32,
}

impl CombatEngine {
    pub fn new(
        player: Ship,
        enemy: Ship,
        advantage: ApproachAdvantage,
        config: CombatConfig,
    ) -> Self {
        let status = match advantage.first_attacker {
            Combatant::Player => CombatStatus::AwaitingPlayerAction,
            Combatant::Enemy => CombatStatus::AwaitingEnemyAction,
        };
        debug!(
            player = %player.name,
            enemy = %enemy.name,
            ?advantage,
            "combat engaged"
        );
        CombatEngine {
            player,
            enemy,
            config,
            status,
            bonus_remaining: advantage.bonus_attacks,
            player_attacks: 0,
            enemy_attacks: 0,
        }
    }

    // ========== Accessor Methods ==========

    pub fn player(&self) -> &Ship {
        &self.player
    }

    pub fn enemy(&self) -> &Ship {
        &self.enemy
    }

    pub fn status(&self) -> CombatStatus {
        self.status
    }

    pub fn result(&self) -> Option<CombatResult> {
        match self.status {
            CombatStatus::Concluded(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// Whose action is awaited, None once concluded
    pub fn turn(&self) -> Option<Combatant> {
        match self.status {
            CombatStatus::AwaitingPlayerAction => Some(Combatant::Player),
            CombatStatus::AwaitingEnemyAction => Some(Combatant::Enemy),
            CombatStatus::Concluded(_) => None,
        }
    }

    pub fn player_attacks(&self) -> u32 {
        self.player_attacks
    }

    pub fn enemy_attacks(&self) -> u32 {
        self.enemy_attacks
    }

    // ========== End Accessor Methods ==========

    /// Hand both ships back as `(player, enemy)`.
    pub fn into_ships(self) -> (Ship, Ship) {
        (self.player, self.enemy)
    }

    fn ensure_turn(&self, who: Combatant) -> GameResult<()> {
        match self.status {
            CombatStatus::Concluded(result) => Err(GameError::InvalidAction(format!(
                "combat is already over ({:?})",
                result
            ))),
            _ if self.turn() != Some(who) => Err(GameError::InvalidAction(format!(
                "it is not the {:?} turn",
                who
            ))),
            _ => Ok(()),
        }
    }

    /// Player fires the active weapon at a named enemy component.
    ///
    /// # Errors
    ///
    /// * `InvalidAction` outside the player's turn or when targeting a
    ///   destroyed component
    /// * `NoActiveWeapon` if every player weapon is destroyed or removed
    /// * `ComponentNotFound` if the enemy has no such component
    pub fn execute_player_attack<D: Dice + ?Sized>(
        &mut self,
        target: &str,
        dice: &mut D,
    ) -> GameResult<AttackOutcome> {
        self.ensure_turn(Combatant::Player)?;
        if !self.player.can_attack() {
            return Err(GameError::NoActiveWeapon);
        }
        let component = self
            .enemy
            .component(target)
            .ok_or_else(|| GameError::ComponentNotFound(target.to_string()))?;
        if component.is_destroyed() {
            return Err(GameError::InvalidAction(format!(
                "{} is already destroyed",
                target
            )));
        }

        let roll = dice.roll(self.config.die_sides);
        let is_hit = roll >= self.player.hit_threshold();
        let damage = if is_hit { self.player.weapon_damage() } else { 0 };
        let destroyed = is_hit && self.enemy.take_hit(target, damage)?;

        self.player_attacks += 1;
        if self.bonus_remaining > 0 {
            self.bonus_remaining -= 1;
        } else {
            self.status = CombatStatus::AwaitingEnemyAction;
        }

        Ok(self.finish_attack(
            Combatant::Player,
            roll,
            is_hit,
            target.to_string(),
            damage,
            destroyed,
        ))
    }

    /// Enemy fires at a random active player component.
    ///
    /// An enemy without a working weapon still rolls so pacing stays uniform,
    /// but the shot always misses. So does a shot at a ship with nothing
    /// left to hit; the turn still passes so the player can escape.
    pub fn execute_enemy_attack<D: Dice + ?Sized>(
        &mut self,
        dice: &mut D,
    ) -> GameResult<AttackOutcome> {
        self.ensure_turn(Combatant::Enemy)?;

        let candidates: Vec<String> = self
            .player
            .active_components()
            .map(|c| c.name.clone())
            .collect();
        let target = if candidates.is_empty() {
            String::new()
        } else {
            candidates[dice.pick(candidates.len())].clone()
        };

        let roll = dice.roll(self.config.die_sides);
        let is_hit = !target.is_empty()
            && self.enemy.can_attack()
            && roll >= self.enemy.hit_threshold();
        let damage = if is_hit { self.enemy.weapon_damage() } else { 0 };
        let destroyed = is_hit && self.player.take_hit(&target, damage)?;

        self.enemy_attacks += 1;
        self.status = CombatStatus::AwaitingPlayerAction;

        Ok(self.finish_attack(Combatant::Enemy, roll, is_hit, target, damage, destroyed))
    }

    /// Disengage. Always allowed on the player's turn.
    pub fn escape(&mut self) -> GameResult<CombatResult> {
        self.ensure_turn(Combatant::Player)?;
        self.status = CombatStatus::Concluded(CombatResult::Escaped);
        info!("player escaped from combat");
        Ok(CombatResult::Escaped)
    }

    fn finish_attack(
        &mut self,
        attacker: Combatant,
        roll: u8,
        is_hit: bool,
        target_component: String,
        damage: u32,
        destroyed: bool,
    ) -> AttackOutcome {
        debug!(
            ?attacker,
            roll,
            is_hit,
            target = %target_component,
            damage,
            destroyed,
            "attack resolved"
        );

        let result = self.check_termination();
        if let Some(result) = result {
            self.status = CombatStatus::Concluded(result);
            info!(?result, "combat concluded");
        }

        AttackOutcome {
            attacker,
            roll,
            is_hit,
            target_component,
            damage,
            destroyed,
            combat_over: result.is_some(),
            result,
        }
    }

    /// Evaluated after every attack, first match wins.
    fn check_termination(&self) -> Option<CombatResult> {
        if self.enemy.is_bridge_destroyed() {
            return Some(CombatResult::PlayerWin);
        }
        if self.player.is_bridge_destroyed() || self.player.all_destroyed() {
            return Some(CombatResult::PlayerDestroyed);
        }
        if !self.enemy.can_attack() && !self.enemy.can_flee() {
            return Some(CombatResult::EnemyFled);
        }
        if self.player_attacks + self.enemy_attacks >= 2 * self.config.max_turns {
            return Some(CombatResult::PlayerLose);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::Component;
    use crate::services::combat::dice::FixedDice;

    fn player_first() -> ApproachAdvantage {
        ApproachAdvantage::default()
    }

    fn from_behind() -> ApproachAdvantage {
        ApproachAdvantage {
            first_attacker: Combatant::Player,
            bonus_attacks: 1,
        }
    }

    fn head_on() -> ApproachAdvantage {
        ApproachAdvantage {
            first_attacker: Combatant::Enemy,
            bonus_attacks: 0,
        }
    }

    fn engine(advantage: ApproachAdvantage) -> CombatEngine {
        CombatEngine::new(Ship::player(), Ship::enemy(4), advantage, CombatConfig::default())
    }

    #[test]
    fn initial_turn_follows_advantage() {
        assert_eq!(engine(player_first()).turn(), Some(Combatant::Player));
        assert_eq!(engine(head_on()).turn(), Some(Combatant::Enemy));
    }

    #[test]
    fn hit_iff_roll_reaches_accuracy() {
        // Pulse Laser accuracy is 4
        let mut e = engine(from_behind());
        let mut dice = FixedDice::new(vec![3, 5]);
        let first = e.execute_player_attack("Thrusters", &mut dice).unwrap();
        let second = e.execute_player_attack("Thrusters", &mut dice).unwrap();
        assert!(!first.is_hit);
        assert_eq!(first.damage, 0);
        assert!(second.is_hit);
        assert_eq!(second.damage, 2);
        assert!(second.destroyed);
        assert_eq!(e.turn(), Some(Combatant::Enemy));
    }

    #[test]
    fn turns_alternate_without_bonus() {
        let mut e = engine(player_first());
        let mut dice = FixedDice::new(vec![1]);
        e.execute_player_attack("Thrusters", &mut dice).unwrap();
        assert_eq!(e.turn(), Some(Combatant::Enemy));
        assert!(matches!(
            e.execute_player_attack("Thrusters", &mut dice),
            Err(GameError::InvalidAction(_))
        ));
        e.execute_enemy_attack(&mut dice).unwrap();
        assert_eq!(e.turn(), Some(Combatant::Player));
    }

    #[test]
    fn player_without_weapon_is_refused() {
        let mut player = Ship::player();
        player.uninstall("Pulse Laser").unwrap();
        let mut e =
            CombatEngine::new(player, Ship::enemy(3), player_first(), CombatConfig::default());
        assert!(matches!(
            e.execute_player_attack("Sentry Core", &mut FixedDice::new(vec![6])),
            Err(GameError::NoActiveWeapon)
        ));
        assert_eq!(e.turn(), Some(Combatant::Player));
    }

    #[test]
    fn unknown_and_destroyed_targets_are_refused() {
        let mut e = engine(from_behind());
        let mut dice = FixedDice::new(vec![6]);
        assert!(matches!(
            e.execute_player_attack("Warp Core", &mut dice),
            Err(GameError::ComponentNotFound(_))
        ));
        e.execute_player_attack("Thrusters", &mut dice).unwrap();
        assert!(matches!(
            e.execute_player_attack("Thrusters", &mut dice),
            Err(GameError::InvalidAction(_))
        ));
    }

    #[test]
    fn disarmed_enemy_always_misses() {
        let mut enemy = Ship::enemy(4);
        enemy.take_hit("Raider Cannon", 99).unwrap();
        let mut e =
            CombatEngine::new(Ship::player(), enemy, head_on(), CombatConfig::default());
        let outcome = e.execute_enemy_attack(&mut FixedDice::new(vec![6])).unwrap();
        assert_eq!(outcome.roll, 6);
        assert!(!outcome.is_hit);
        assert_eq!(e.player(), &Ship::player());
    }

    #[test]
    fn enemy_targets_only_active_components() {
        let mut player = Ship::player();
        player.take_hit("Pulse Laser", 99).unwrap();
        let mut e = CombatEngine::new(player, Ship::enemy(4), head_on(), CombatConfig::default());
        let outcome = e
            .execute_enemy_attack(&mut FixedDice::new(vec![1]).with_picks(vec![0]))
            .unwrap();
        assert_eq!(outcome.target_component, "Ion Drive");
    }

    #[test]
    fn destroying_enemy_bridge_wins() {
        let mut e = engine(player_first());
        let mut dice = FixedDice::new(vec![6]).with_picks(vec![0]);
        // Sentry Core for value 4 has 4 HP; laser hits for 2
        let mut last = None;
        while !e.is_over() {
            let outcome = match e.turn() {
                Some(Combatant::Player) => {
                    e.execute_player_attack("Sentry Core", &mut dice).unwrap()
                }
                _ => e.execute_enemy_attack(&mut FixedDice::new(vec![1])).unwrap(),
            };
            last = Some(outcome);
        }
        let last = last.unwrap();
        assert!(last.combat_over);
        assert_eq!(last.result, Some(CombatResult::PlayerWin));
        assert_eq!(e.player_attacks(), 2);
    }

    #[test]
    fn player_wins_when_both_bridges_fall() {
        // Player bridge already wrecked going in; the winning shot still wins.
        let mut player = Ship::with_components(
            "Wreck",
            10,
            vec![
                Component::weapon("Laser", 3, 4, 5, 1),
                Component::bridge("Bridge", 1, 2, 0),
            ],
        )
        .unwrap();
        player.take_hit("Bridge", 1).unwrap();
        let mut e =
            CombatEngine::new(player, Ship::enemy(1), player_first(), CombatConfig::default());
        let outcome = e
            .execute_player_attack("Sentry Core", &mut FixedDice::new(vec![6]))
            .unwrap();
        assert_eq!(outcome.result, Some(CombatResult::PlayerWin));
    }

    #[test]
    fn losing_player_bridge_destroys_player() {
        let player = Ship::with_components(
            "Glass",
            10,
            vec![
                Component::weapon("Laser", 3, 4, 1, 6),
                Component::bridge("Bridge", 1, 2, 0),
            ],
        )
        .unwrap();
        let mut e = CombatEngine::new(player, Ship::enemy(10), head_on(), CombatConfig::default());
        // pick index 1 -> Bridge
        let outcome = e
            .execute_enemy_attack(&mut FixedDice::new(vec![6]).with_picks(vec![1]))
            .unwrap();
        assert!(outcome.destroyed);
        assert_eq!(outcome.result, Some(CombatResult::PlayerDestroyed));
        assert!(e
            .execute_player_attack("Sentry Core", &mut FixedDice::new(vec![6]))
            .is_err());
    }

    #[test]
    fn all_components_destroyed_without_bridge() {
        let player =
            Ship::with_components("Drone", 10, vec![Component::weapon("Laser", 1, 4, 1, 6)])
                .unwrap();
        let mut e =
            CombatEngine::new(player, Ship::enemy(5), head_on(), CombatConfig::default());
        let outcome = e.execute_enemy_attack(&mut FixedDice::new(vec![6])).unwrap();
        assert_eq!(outcome.result, Some(CombatResult::PlayerDestroyed));
    }

    #[test]
    fn enemy_flees_without_weapon_and_engine() {
        let mut enemy = Ship::enemy(4);
        enemy.take_hit("Raider Cannon", 99).unwrap();
        let mut e =
            CombatEngine::new(Ship::player(), enemy, player_first(), CombatConfig::default());
        let outcome = e
            .execute_player_attack("Thrusters", &mut FixedDice::new(vec![6]))
            .unwrap();
        assert_eq!(outcome.result, Some(CombatResult::EnemyFled));
        let (_, enemy) = e.into_ships();
        assert!(!enemy.is_bridge_destroyed());
    }

    #[test]
    fn turn_limit_forces_retreat_after_ten_attacks() {
        let mut e = engine(player_first());
        let mut misses = FixedDice::new(vec![1]);
        let mut attacks = 0;
        while !e.is_over() {
            match e.turn() {
                Some(Combatant::Player) => {
                    e.execute_player_attack("Sentry Core", &mut misses).unwrap()
                }
                _ => e.execute_enemy_attack(&mut misses).unwrap(),
            };
            attacks += 1;
        }
        assert_eq!(attacks, 10);
        assert_eq!(e.result(), Some(CombatResult::PlayerLose));
    }

    #[test]
    fn bonus_attack_does_not_extend_combat() {
        let mut e = engine(from_behind());
        let mut misses = FixedDice::new(vec![1]);
        let mut attacks = 0;
        while !e.is_over() {
            match e.turn() {
                Some(Combatant::Player) => {
                    e.execute_player_attack("Sentry Core", &mut misses).unwrap()
                }
                _ => e.execute_enemy_attack(&mut misses).unwrap(),
            };
            attacks += 1;
        }
        assert_eq!(attacks, 10);
        assert_eq!(e.player_attacks(), 6);
        assert_eq!(e.enemy_attacks(), 4);
        assert_eq!(e.result(), Some(CombatResult::PlayerLose));
    }

    #[test]
    fn escape_on_first_turn_with_only_a_bridge() {
        let player =
            Ship::with_components("Pod", 5, vec![Component::bridge("Bridge", 2, 2, 0)]).unwrap();
        let mut e =
            CombatEngine::new(player, Ship::enemy(9), player_first(), CombatConfig::default());
        assert!(matches!(
            e.execute_player_attack("Sentry Core", &mut FixedDice::new(vec![6])),
            Err(GameError::NoActiveWeapon)
        ));
        assert_eq!(e.escape().unwrap(), CombatResult::Escaped);
        assert_eq!(e.result(), Some(CombatResult::Escaped));
        assert!(e.escape().is_err());
    }

    #[test]
    fn enemy_shot_at_an_empty_hull_misses_and_passes_the_turn() {
        let mut e =
            CombatEngine::new(Ship::default(), Ship::enemy(6), head_on(), CombatConfig::default());
        let outcome = e.execute_enemy_attack(&mut FixedDice::new(vec![6])).unwrap();
        assert!(!outcome.is_hit);
        assert!(outcome.target_component.is_empty());
        assert_eq!(outcome.result, None);
        assert_eq!(e.turn(), Some(Combatant::Player));
        assert_eq!(e.escape().unwrap(), CombatResult::Escaped);
    }

    #[test]
    fn escape_refused_on_enemy_turn() {
        let mut e = engine(head_on());
        assert!(e.escape().is_err());
    }
}
