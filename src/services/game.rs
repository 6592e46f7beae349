use tracing::{info, warn};

use crate::game_engine::{GameSession, GameState, Phase, SessionConfig};
use crate::io::{InputReader, OutputWriter};
use crate::models::errors::{GameError, GameResult};
use crate::models::navigation_types::{Difficulty, Direction};
use crate::models::progress::GalaxyProgress;
use crate::services::combat::Combatant;
use crate::ui::presenters::{BoardPresenter, CombatPresenter, GalaxyPresenter};

/// Drive one board from the console until it finishes.
///
/// Returns `None` if the player quit, otherwise the final state. Rule
/// violations are reported and the prompt repeats; I/O failures propagate.
pub fn play_board(
    session: &mut GameSession,
    input: &mut dyn InputReader,
    output: &mut dyn OutputWriter,
) -> GameResult<Option<GameState>> {
    BoardPresenter::show_briefing(session, output);
    BoardPresenter::show_map(session, output);

    loop {
        if session.state() != &GameState::Playing {
            BoardPresenter::show_outcome(session.state(), output);
            return Ok(Some(session.state().clone()));
        }

        let result = match session.phase() {
            Phase::Rolling => {
                BoardPresenter::show_status(session, output);
                let line = input.read_line("COMMAND")?;
                let line = line.trim();
                let (command, argument) = match line.split_once(' ') {
                    Some((c, rest)) => (c, rest.trim()),
                    None => (line, ""),
                };
                match command.to_ascii_lowercase().as_str() {
                    "r" => session.roll_movement().map(|steps| {
                        output.writeln(&format!("ENGINES READY FOR {} STEPS", steps));
                    }),
                    "m" => {
                        BoardPresenter::show_map(session, output);
                        Ok(())
                    }
                    "s" => {
                        show_outfitting(session, output);
                        Ok(())
                    }
                    "u" => session.uninstall_component(argument),
                    "i" => session.install_component(argument),
                    "q" => {
                        output.writeln("MISSION ABANDONED");
                        return Ok(None);
                    }
                    _ => {
                        print_command_menu(output);
                        Ok(())
                    }
                }
            }
            Phase::SelectingDirection { .. } => choose_heading(session, input, output),
            Phase::Combat => combat_round(session, input, output),
            Phase::Finished => continue,
        };

        if let Err(e) = result {
            if matches!(e, GameError::Io(_)) {
                return Err(e);
            }
            output.writeln(&format!("Error: {}", e));
        }
    }
}

fn choose_heading(
    session: &mut GameSession,
    input: &mut dyn InputReader,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    BoardPresenter::show_directions(&session.available_directions()?, output);
    let line = input.read_line("HEADING (0-5)")?;
    let value: u8 = line.trim().parse()?;
    let direction = Direction::new(value).map_err(|e| GameError::InvalidInput(e.to_string()))?;

    let report = session.select_direction(direction)?;
    BoardPresenter::show_move(&report, output);
    Ok(())
}

fn combat_round(
    session: &mut GameSession,
    input: &mut dyn InputReader,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    let Some(engine) = session.combat() else {
        return Err(GameError::InvalidAction("no combat in progress".to_string()));
    };

    if engine.turn() == Some(Combatant::Enemy) {
        let outcome = session.enemy_attack()?;
        CombatPresenter::show_attack(&outcome, output);
        if let Some(result) = outcome.result {
            CombatPresenter::show_result(result, output);
        }
        return Ok(());
    }

    CombatPresenter::show_ship(engine.player(), output);
    CombatPresenter::show_ship(engine.enemy(), output);
    if !engine.player().can_attack() {
        output.writeln("NO WORKING WEAPON, ESCAPE IS YOUR ONLY OPTION");
    }
    let enemy_parts: Vec<String> = engine
        .enemy()
        .components()
        .iter()
        .map(|c| c.name.clone())
        .collect();

    let line = input.read_line("TARGET (NAME OR NUMBER), E TO ESCAPE")?;
    let line = line.trim();
    if line.eq_ignore_ascii_case("e") {
        let result = session.escape()?;
        CombatPresenter::show_result(result, output);
        return Ok(());
    }

    let target = match line.parse::<usize>() {
        Ok(n) if (1..=enemy_parts.len()).contains(&n) => enemy_parts[n - 1].clone(),
        _ => line.to_string(),
    };
    let outcome = session.player_attack(&target)?;
    CombatPresenter::show_attack(&outcome, output);
    if let Some(result) = outcome.result {
        CombatPresenter::show_result(result, output);
    }
    Ok(())
}

fn show_outfitting(session: &GameSession, output: &mut dyn OutputWriter) {
    CombatPresenter::show_ship(session.player_ship(), output);
    let ship = session.player_ship();
    output.writeln(&format!(
        "POWER {}/{}   SPEED +{}   EVASION +{}",
        ship.container().total_power(),
        ship.container().power_limit(),
        ship.speed_bonus(),
        ship.evasion()
    ));
    if !session.cargo().is_empty() {
        let names: Vec<&str> = session.cargo().iter().map(|c| c.name.as_str()).collect();
        output.writeln(&format!("CARGO: {}", names.join(", ")));
    }
}

fn print_command_menu(output: &mut dyn OutputWriter) {
    output.writeln("   R = ROLL FOR MOVEMENT");
    output.writeln("   M = MAP");
    output.writeln("   S = SHIP STATUS");
    output.writeln("   U <NAME> = UNINSTALL COMPONENT");
    output.writeln("   I <NAME> = INSTALL COMPONENT FROM CARGO");
    output.writeln("   Q = QUIT");
}

/// Play the galaxy campaign, saving after every finished board.
pub fn play_galaxy(
    progress: &mut GalaxyProgress,
    input: &mut dyn InputReader,
    output: &mut dyn OutputWriter,
    save: &mut dyn FnMut(&GalaxyProgress) -> GameResult<()>,
) -> GameResult<()> {
    loop {
        GalaxyPresenter::show_grid(progress, output);
        if progress.is_complete() {
            output.writeln("EVERY SECTOR SECURED, THE GALAXY IS YOURS");
            return Ok(());
        }
        let Some((row, col)) = progress.next_playable() else {
            output.writeln("NO PLAYABLE SECTORS REMAIN");
            return Ok(());
        };

        let prompt = format!(
            "SECTOR ROW,COL (ENTER FOR {},{}; Q TO QUIT)",
            row + 1,
            col + 1
        );
        let line = input.read_line(&prompt)?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let (row, col) = if line.is_empty() {
            (row, col)
        } else {
            match parse_sector(line) {
                Ok(rc) => rc,
                Err(e) => {
                    output.writeln(&format!("Error: {}", e));
                    continue;
                }
            }
        };

        let Some(slot) = progress.slot(row, col).copied() else {
            output.writeln("Error: no such sector");
            continue;
        };
        if !slot.is_playable() {
            output.writeln("Error: that sector is locked or already won");
            continue;
        }

        let difficulty = Difficulty::new(slot.difficulty)
            .map_err(|e| GameError::InvalidConfiguration(e.to_string()))?;
        let config = SessionConfig::new(slot.size, difficulty, Some(slot.seed));
        let mut session = GameSession::new(config)?;
        info!(row, col, seed = slot.seed, "sector entered");

        let Some(state) = play_board(&mut session, input, output)? else {
            return Ok(());
        };
        let won = matches!(state, GameState::Victory { .. });
        progress.record_result(row, col, won)?;
        if let Err(e) = save(progress) {
            warn!(error = %e, "could not save galaxy progress");
            return Err(e);
        }
    }
}

/// "row,col", one-based
fn parse_sector(text: &str) -> GameResult<(usize, usize)> {
    let (r, c) = text
        .split_once(',')
        .ok_or_else(|| GameError::InvalidInput(format!("expected ROW,COL, got '{}'", text)))?;
    let r: usize = r.trim().parse()?;
    let c: usize = c.trim().parse()?;
    if r == 0 || c == 0 {
        return Err(GameError::InvalidInput("sectors are numbered from 1".to_string()));
    }
    Ok((r - 1, c - 1))
}
