use std::fs;

use starlattice::cli;
use starlattice::io::TerminalIO;
use starlattice::models::errors::GameResult;
use starlattice::models::progress::GalaxyProgress;
use starlattice::services::game::{play_board, play_galaxy};
use starlattice::GameSession;
use tracing_subscriber::EnvFilter;

fn main() -> GameResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("starlattice=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse();
    let mut terminal = TerminalIO;
    let mut output = TerminalIO;

    println!("*** STARLATTICE ***");
    println!();

    if args.galaxy_mode() {
        let path = args.progress_path();
        let seed = args.seed.unwrap_or_else(rand::random);
        let mut progress = GalaxyProgress::load_or_new(&path, seed)?;
        play_galaxy(&mut progress, &mut terminal, &mut output, &mut |p| {
            fs::write(&path, p.to_json()?)?;
            Ok(())
        })
    } else {
        let mut session = GameSession::new(args.session_config()?)?;
        play_board(&mut session, &mut terminal, &mut output)?;
        Ok(())
    }
}
