use std::io;
use std::process;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use mission_tree::cli::{Cli, Session};
use mission_tree::MissionBoard;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config = match cli.board_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut board = MissionBoard::new(config);
    if cli.samples {
        board.load_samples();
    }

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout()).with_prompt(!cli.no_prompt);
    if let Err(e) = session.run(&mut board) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?filter, "logging initialized");
}
