//! Game session state machine
//!
//! A `GameSession` sequences the phases of one board (rolling, direction
//! selection, combat) and owns every piece of mutable state: placed objects,
//! the player's token and ship, the movement budget and the active
//! engagement. The services it calls stay pure.

use std::mem;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::models::board_object::{BoardObjects, Marker, ObjectId};
use crate::models::component::{Component, ComponentType};
use crate::models::constants::{BoardSize, DEFAULT_HEX_SIZE, DIE_SIDES};
use crate::models::errors::{GameError, GameResult};
use crate::models::lattice::{generate_lattice, Lattice};
use crate::models::navigation_types::{Difficulty, Direction};
use crate::models::ship::Ship;
use crate::models::vertex::VertexId;
use crate::services::combat::{
    approach_advantage, AttackOutcome, CombatConfig, CombatEngine, CombatResult, Dice,
};
use crate::services::navigation::{
    available_directions, compute_path, is_trapped, AvailableDirection, Engagement, Hazards,
    PathResult,
};
use crate::services::placement::generate_board_objects;

/// Everything needed to (re)generate a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub size: BoardSize,
    pub difficulty: Difficulty,
    /// None plays a non-reproducible board
    pub seed: Option<u64>,
    pub hex_size: f64,
}

impl SessionConfig {
    pub fn new(size: BoardSize, difficulty: Difficulty, seed: Option<u64>) -> Self {
        SessionConfig {
            size,
            difficulty,
            seed,
            hex_size: DEFAULT_HEX_SIZE,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig::new(BoardSize::Small, Difficulty::default(), None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rolling,
    SelectingDirection { steps: u32 },
    Combat,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Victory { score: u32 },
    Defeat { reason: DefeatReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatReason {
    BlackHole,
    ShipDestroyed,
    Trapped,
    OutOfMovement,
}

impl DefeatReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DefeatReason::BlackHole => "YOUR SHIP WAS SWALLOWED BY A BLACK HOLE",
            DefeatReason::ShipDestroyed => "YOUR SHIP WAS DESTROYED IN COMBAT",
            DefeatReason::Trapped => "YOUR SHIP IS TRAPPED WITH NOWHERE TO GO",
            DefeatReason::OutOfMovement => "YOUR ENGINES HAVE RUN DRY",
        }
    }
}

/// What happened on one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    pub path: PathResult,
    pub collected: Vec<Marker>,
}

struct ActiveCombat {
    engine: CombatEngine,
    enemy_id: ObjectId,
    /// Where the token goes if the player retreats or escapes
    retreat_to: VertexId,
}

/// One board being played.
pub struct GameSession {
    config: SessionConfig,
    lattice: Lattice,
    objects: BoardObjects,
    start: VertexId,
    target: VertexId,
    position: VertexId,
    player: Ship,
    /// Uninstalled components, available for reinstallation
    cargo: Vec<Component>,
    movement_left: u32,
    collected: Vec<Marker>,
    phase: Phase,
    state: GameState,
    combat: Option<ActiveCombat>,
    combat_config: CombatConfig,
    rng: StdRng,
}

impl GameSession {
    /// Generate a board from the config and start playing it.
    pub fn new(config: SessionConfig) -> GameResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (columns, rows) = config.size.dimensions();
        let lattice = generate_lattice(columns, rows, config.hex_size)?;
        let (start, target) = lattice.default_endpoints();
        let objects = generate_board_objects(&lattice, start, target, config.difficulty, &mut rng)?;

        info!(
            size = config.size.label(),
            difficulty = %config.difficulty,
            seed = ?config.seed,
            "new board"
        );
        Self::assemble(config, lattice, objects, start, target, rng)
    }

    /// Play a prepared board. Used for hand-built scenarios.
    pub fn with_board(
        config: SessionConfig,
        lattice: Lattice,
        objects: BoardObjects,
        start: VertexId,
        target: VertexId,
    ) -> GameResult<Self> {
        lattice.require(start)?;
        lattice.require(target)?;
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_default());
        Self::assemble(config, lattice, objects, start, target, rng)
    }

    fn assemble(
        config: SessionConfig,
        lattice: Lattice,
        objects: BoardObjects,
        start: VertexId,
        target: VertexId,
        rng: StdRng,
    ) -> GameResult<Self> {
        let mut session = GameSession {
            movement_left: config.size.movement_budget(),
            config,
            lattice,
            objects,
            start,
            target,
            position: start,
            player: Ship::player(),
            cargo: Vec::new(),
            collected: Vec::new(),
            phase: Phase::Rolling,
            state: GameState::Playing,
            combat: None,
            combat_config: CombatConfig::default(),
            rng,
        };
        session.settle()?;
        Ok(session)
    }

    // ========== Accessor Methods ==========

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn objects(&self) -> &BoardObjects {
        &self.objects
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn position(&self) -> VertexId {
        self.position
    }

    pub fn movement_left(&self) -> u32 {
        self.movement_left
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn collected(&self) -> &[Marker] {
        &self.collected
    }

    pub fn cargo(&self) -> &[Component] {
        &self.cargo
    }

    /// The player's ship, wherever it currently lives
    pub fn player_ship(&self) -> &Ship {
        match &self.combat {
            Some(active) => active.engine.player(),
            None => &self.player,
        }
    }

    pub fn combat(&self) -> Option<&CombatEngine> {
        self.combat.as_ref().map(|c| &c.engine)
    }

    /// Power-up value collected plus unspent movement
    pub fn score(&self) -> u32 {
        self.collected.iter().map(|m| u32::from(m.value)).sum::<u32>() + self.movement_left
    }

    #[cfg(test)]
    pub fn set_movement_left(&mut self, steps: u32) {
        self.movement_left = steps;
    }

    // ========== End Accessor Methods ==========

    fn ensure_playing(&self) -> GameResult<()> {
        if self.state == GameState::Playing {
            Ok(())
        } else {
            Err(GameError::InvalidAction("the game is over".to_string()))
        }
    }

    fn ensure_phase(&self, expected: &str, ok: bool) -> GameResult<()> {
        self.ensure_playing()?;
        if ok {
            Ok(())
        } else {
            Err(GameError::InvalidAction(format!(
                "expected {} phase, currently {:?}",
                expected, self.phase
            )))
        }
    }

    pub fn available_directions(&self) -> GameResult<Vec<AvailableDirection>> {
        available_directions(self.position, self.lattice.rays(), self.objects.blocking_set())
    }

    /// Roll the movement die. Working engines add their speed bonus; the
    /// result is capped to the remaining budget.
    pub fn roll_movement(&mut self) -> GameResult<u32> {
        self.ensure_phase("rolling", self.phase == Phase::Rolling)?;

        let roll = u32::from(self.rng.roll(DIE_SIDES));
        let steps = (roll + self.player.speed_bonus()).min(self.movement_left);
        self.phase = Phase::SelectingDirection { steps };
        debug!(roll, steps, "movement rolled");
        Ok(steps)
    }

    /// Move along `direction` by the rolled number of steps.
    pub fn select_direction(&mut self, direction: Direction) -> GameResult<MoveReport> {
        self.ensure_playing()?;
        let steps = match self.phase {
            Phase::SelectingDirection { steps } => steps,
            other => {
                return Err(GameError::InvalidAction(format!(
                    "roll before choosing a direction, currently {:?}",
                    other
                )))
            }
        };
        if !self
            .available_directions()?
            .iter()
            .any(|a| a.direction == direction)
        {
            return Err(GameError::InvalidAction(format!(
                "direction {} is blocked",
                direction
            )));
        }

        let path = compute_path(
            self.lattice.rays(),
            self.position,
            direction,
            steps,
            self.objects.blocking_set(),
            self.target,
            Hazards::new(self.objects.black_hole_set(), self.objects.enemy_zone_map()),
        )?;

        let origin = self.position;
        self.movement_left = self.movement_left.saturating_sub(path.steps());
        let collected: Vec<Marker> = path
            .path
            .iter()
            .filter_map(|v| self.objects.collect_power_up(*v))
            .collect();
        self.collected.extend(collected.iter().copied());
        if let Some(end) = path.end() {
            self.position = end;
        }
        debug!(%direction, steps = path.steps(), position = %self.position, "moved");

        if path.hit_black_hole {
            self.finish(GameState::Defeat {
                reason: DefeatReason::BlackHole,
            });
        } else if let Some(engagement) = path.engaged_enemy {
            let retreat_to = match engagement.vertex_index {
                0 => origin,
                i => path.path[i - 1],
            };
            self.engage(engagement, direction, retreat_to)?;
        } else if path.reached_target {
            self.finish_victory();
        } else {
            self.phase = Phase::Rolling;
            self.settle()?;
        }

        Ok(MoveReport {
            direction,
            path,
            collected,
        })
    }

    fn engage(
        &mut self,
        engagement: Engagement,
        direction: Direction,
        retreat_to: VertexId,
    ) -> GameResult<()> {
        let enemy = self.objects.enemy_mut(engagement.enemy_id).ok_or_else(|| {
            GameError::InvalidAction(format!("no enemy {}", engagement.enemy_id))
        })?;
        let advantage = approach_advantage(direction, enemy.facing);
        let enemy_ship = mem::take(&mut enemy.ship);
        let player_ship = mem::take(&mut self.player);

        info!(enemy = %engagement.enemy_id, ?advantage, "entered kill zone");
        self.combat = Some(ActiveCombat {
            engine: CombatEngine::new(player_ship, enemy_ship, advantage, self.combat_config),
            enemy_id: engagement.enemy_id,
            retreat_to,
        });
        self.phase = Phase::Combat;
        Ok(())
    }

    fn active_combat(&mut self) -> GameResult<&mut ActiveCombat> {
        self.ensure_phase("combat", self.phase == Phase::Combat)?;
        self.combat
            .as_mut()
            .ok_or_else(|| GameError::InvalidAction("no combat in progress".to_string()))
    }

    pub fn player_attack(&mut self, target: &str) -> GameResult<AttackOutcome> {
        self.active_combat()?;
        let outcome = match self.combat.as_mut() {
            Some(active) => active.engine.execute_player_attack(target, &mut self.rng)?,
            None => return Err(GameError::InvalidAction("no combat in progress".to_string())),
        };
        self.after_attack(outcome)
    }

    /// Player attack with caller-supplied dice, for scripted play.
    pub fn player_attack_with<D: Dice + ?Sized>(
        &mut self,
        target: &str,
        dice: &mut D,
    ) -> GameResult<AttackOutcome> {
        let outcome = self
            .active_combat()?
            .engine
            .execute_player_attack(target, dice)?;
        self.after_attack(outcome)
    }

    pub fn enemy_attack(&mut self) -> GameResult<AttackOutcome> {
        self.active_combat()?;
        let outcome = match self.combat.as_mut() {
            Some(active) => active.engine.execute_enemy_attack(&mut self.rng)?,
            None => return Err(GameError::InvalidAction("no combat in progress".to_string())),
        };
        self.after_attack(outcome)
    }

    fn after_attack(&mut self, outcome: AttackOutcome) -> GameResult<AttackOutcome> {
        if let Some(result) = outcome.result {
            self.resolve_combat(result)?;
        }
        Ok(outcome)
    }

    pub fn escape(&mut self) -> GameResult<CombatResult> {
        let result = self.active_combat()?.engine.escape()?;
        self.resolve_combat(result)?;
        Ok(result)
    }

    /// Return the ships to their owners and apply the combat result.
    fn resolve_combat(&mut self, result: CombatResult) -> GameResult<()> {
        let Some(ActiveCombat {
            engine,
            enemy_id,
            retreat_to,
        }) = self.combat.take()
        else {
            return Ok(());
        };
        let (player, enemy_ship) = engine.into_ships();
        self.player = player;

        if result == CombatResult::PlayerWin {
            self.objects.remove_enemy(enemy_id);
        } else if let Some(enemy) = self.objects.enemy_mut(enemy_id) {
            // Damage persists into the next encounter
            enemy.ship = enemy_ship;
        }
        info!(?result, enemy = %enemy_id, "combat resolved");

        match result {
            CombatResult::PlayerDestroyed => {
                self.finish(GameState::Defeat {
                    reason: DefeatReason::ShipDestroyed,
                });
                return Ok(());
            }
            CombatResult::PlayerWin | CombatResult::EnemyFled if self.position == self.target => {
                self.finish_victory();
                return Ok(());
            }
            CombatResult::PlayerLose | CombatResult::Escaped => {
                self.position = retreat_to;
            }
            CombatResult::PlayerWin | CombatResult::EnemyFled => {}
        }

        self.phase = Phase::Rolling;
        self.settle()
    }

    /// Move a player component into cargo, repairing it. The Bridge stays.
    pub fn uninstall_component(&mut self, name: &str) -> GameResult<()> {
        self.ensure_phase("rolling", self.phase == Phase::Rolling)?;
        let kind = self.player.component(name).map(Component::component_type);
        if kind == Some(ComponentType::Bridge) {
            return Err(GameError::InvalidAction(format!(
                "{} is the bridge and cannot be uninstalled",
                name
            )));
        }
        let component = self.player.uninstall(name)?;
        self.cargo.push(component);
        Ok(())
    }

    /// Install a component from cargo.
    pub fn install_component(&mut self, name: &str) -> GameResult<()> {
        self.ensure_phase("rolling", self.phase == Phase::Rolling)?;
        let pos = self
            .cargo
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| GameError::ComponentNotFound(name.to_string()))?;
        self.player.install(self.cargo[pos].clone())?;
        self.cargo.remove(pos);
        Ok(())
    }

    /// Detect the stranded outcomes once the token comes to rest.
    fn settle(&mut self) -> GameResult<()> {
        if self.state != GameState::Playing || self.phase != Phase::Rolling {
            return Ok(());
        }
        if self.movement_left == 0 {
            self.finish(GameState::Defeat {
                reason: DefeatReason::OutOfMovement,
            });
        } else if is_trapped(self.position, self.lattice.rays(), self.objects.blocking_set())? {
            self.finish(GameState::Defeat {
                reason: DefeatReason::Trapped,
            });
        }
        Ok(())
    }

    fn finish_victory(&mut self) {
        let score = self.score();
        self.finish(GameState::Victory { score });
    }

    fn finish(&mut self, state: GameState) {
        info!(?state, "board finished");
        self.state = state;
        self.phase = Phase::Finished;
    }
}
