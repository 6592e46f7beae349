use crate::game_engine::{GameSession, GameState, MoveReport};
use crate::io::OutputWriter;
use crate::models::progress::{GalaxyProgress, SlotStatus};
use crate::models::ship::Ship;
use crate::models::vertex::VertexId;
use crate::services::combat::{AttackOutcome, CombatResult, Combatant};
use crate::services::navigation::AvailableDirection;

pub struct BoardPresenter;

impl BoardPresenter {
    pub fn show_briefing(session: &GameSession, output: &mut dyn OutputWriter) {
        let config = session.config();
        let objects = session.objects();
        output.writeln(&format!(
            "{} BOARD, DIFFICULTY {}",
            config.size.label(),
            config.difficulty
        ));
        output.writeln(&format!(
            "REACH {} FROM {} WITH {} UNITS OF MOVEMENT",
            session.target(),
            session.start(),
            session.movement_left()
        ));
        output.writeln(&format!(
            "SENSORS REPORT {} SENTRIES, {} BLACK HOLES, {} POWER-UPS",
            objects.enemies.len(),
            objects.black_holes.len(),
            objects.power_ups.len()
        ));
    }

    /// Character map of the lattice, one cell per lattice unit.
    ///
    /// `P` player, `T` target, object symbols as placed, `~` kill zone,
    /// `o` hex center, `.` corner.
    pub fn render_map(session: &GameSession) -> Vec<String> {
        let lattice = session.lattice();
        let ids: Vec<VertexId> = lattice.vertices().iter().map(|v| v.id).collect();
        let xs = ids.iter().map(|v| v.x);
        let (Some(min_x), Some(max_x)) = (xs.clone().min(), xs.max()) else {
            return Vec::new();
        };
        let min_y = ids.iter().map(|v| v.y).min().unwrap_or(0);
        let max_y = ids.iter().map(|v| v.y).max().unwrap_or(0);

        let objects = session.objects();
        (min_y..=max_y)
            .map(|y| {
                (min_x..=max_x)
                    .map(|x| {
                        let id = VertexId::new(x, y);
                        let Some(vertex) = lattice.vertex(id) else {
                            return ' ';
                        };
                        if id == session.position() {
                            'P'
                        } else if id == session.target() {
                            'T'
                        } else if let Some(kind) = objects.object_at(id) {
                            kind.symbol().chars().next().unwrap_or('?')
                        } else if objects.enemy_zone_map().contains_key(&id) {
                            '~'
                        } else if vertex.is_center() {
                            'o'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    pub fn show_map(session: &GameSession, output: &mut dyn OutputWriter) {
        for line in Self::render_map(session) {
            output.writeln(&line);
        }
    }

    pub fn show_status(session: &GameSession, output: &mut dyn OutputWriter) {
        output.writeln(&format!(
            "POSITION {}   MOVEMENT LEFT {}   SCORE {}",
            session.position(),
            session.movement_left(),
            session.score()
        ));
    }

    pub fn show_directions(directions: &[AvailableDirection], output: &mut dyn OutputWriter) {
        output.writeln("OPEN HEADINGS:");
        for d in directions {
            output.writeln(&format!(
                "  {} ({:>3} DEG) TOWARD {}",
                d.direction,
                d.direction.angle_degrees() as i32,
                d.first_vertex
            ));
        }
    }

    pub fn show_move(report: &MoveReport, output: &mut dyn OutputWriter) {
        match report.path.end() {
            Some(end) => output.writeln(&format!(
                "MOVED {} STEPS ON HEADING {} TO {}",
                report.path.steps(),
                report.direction,
                end
            )),
            None => output.writeln("NO MOVEMENT POSSIBLE ON THAT HEADING"),
        }
        if report.path.stopped_by_obstacle {
            output.writeln("OBSTACLE AHEAD, ALL STOP");
        }
        for marker in &report.collected {
            output.writeln(&format!(
                "POWER-UP WORTH {} COLLECTED AT {}",
                marker.value, marker.vertex
            ));
        }
        if report.path.engaged_enemy.is_some() {
            output.writeln("*** ENTERED A SENTRY KILL ZONE ***");
        }
    }

    pub fn show_outcome(state: &GameState, output: &mut dyn OutputWriter) {
        output.writeln("");
        match state {
            GameState::Victory { score } => {
                output.writeln("TARGET REACHED, MISSION ACCOMPLISHED");
                output.writeln(&format!("FINAL SCORE = {}", score));
            }
            GameState::Defeat { reason } => {
                output.writeln(&format!("*** {}", reason.describe()));
                output.writeln("MISSION FAILED");
            }
            GameState::Playing => {}
        }
    }
}

pub struct CombatPresenter;

impl CombatPresenter {
    pub fn show_ship(ship: &Ship, output: &mut dyn OutputWriter) {
        output.writeln(&format!("{:<16}{:<8}{}", ship.name.to_uppercase(), "HP", "TYPE"));
        for c in ship.components() {
            let hp = if c.is_destroyed() {
                "--".to_string()
            } else {
                format!("{}/{}", c.current_hp(), c.max_hp())
            };
            output.writeln(&format!("  {:<14}{:<8}{}", c.name, hp, c.component_type().label()));
        }
    }

    pub fn show_attack(outcome: &AttackOutcome, output: &mut dyn OutputWriter) {
        let who = match outcome.attacker {
            Combatant::Player => "YOU FIRE",
            Combatant::Enemy => "SENTRY FIRES",
        };
        if outcome.is_hit {
            output.writeln(&format!(
                "{} (ROLL {}): {} UNIT HIT ON {}",
                who, outcome.roll, outcome.damage, outcome.target_component
            ));
            if outcome.destroyed {
                output.writeln(&format!(
                    "*** {} DESTROYED ***",
                    outcome.target_component.to_uppercase()
                ));
            }
        } else {
            output.writeln(&format!("{} (ROLL {}): MISS", who, outcome.roll));
        }
    }

    pub fn show_result(result: CombatResult, output: &mut dyn OutputWriter) {
        output.writeln(&format!("COMBAT OVER: {}", result.label()));
    }
}

pub struct GalaxyPresenter;

impl GalaxyPresenter {
    pub fn show_grid(progress: &GalaxyProgress, output: &mut dyn OutputWriter) {
        output.writeln("GALAXY MAP");
        for row in &progress.slots {
            let line: Vec<String> = row
                .iter()
                .map(|slot| {
                    let mark = match slot.status {
                        SlotStatus::Locked => "  ##  ",
                        SlotStatus::Unlocked => " OPEN ",
                        SlotStatus::Won => " WON  ",
                        SlotStatus::Lost => " LOST ",
                    };
                    let size = slot.size.label().chars().next().unwrap_or('?');
                    format!("[{}{}{:>2}]", mark, size, slot.difficulty)
                })
                .collect();
            output.writeln(&line.join(" "));
        }
    }
}
