//! Command line arguments and the interactive console loop.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use clap::Parser;
use tracing::debug;

use crate::board::MissionBoard;
use crate::config::{BoardConfig, DEFAULT_MAX_LEVEL, DEFAULT_MIN_LEVEL};
use crate::error::{MissionError, Result};

/// Manage role-playing game missions kept in a self-balancing AVL tree
#[derive(Parser, Debug)]
#[command(name = "missions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lowest accepted difficulty level
    #[arg(
        long,
        env = "MISSIONS_MIN_LEVEL",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MIN_LEVEL
    )]
    pub min_level: i32,

    /// Highest accepted difficulty level
    #[arg(
        long,
        env = "MISSIONS_MAX_LEVEL",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_MAX_LEVEL
    )]
    pub max_level: i32,

    /// Load the sample missions on startup
    #[arg(long)]
    pub samples: bool,

    /// Do not print a prompt before each command
    #[arg(long)]
    pub no_prompt: bool,

    /// Debug output, repeat for more (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    pub fn board_config(&self) -> Result<BoardConfig> {
        BoardConfig::new(self.min_level, self.max_level)
    }
}

/// A line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { level: i32, description: String },
    Find { level: i32 },
    Remove { level: i32 },
    List,
    Tree,
    Stats,
    Samples,
    Clear,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = MissionError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "add" => {
                let (level, description) = match rest.split_once(char::is_whitespace) {
                    Some((level, description)) => (level, description.trim()),
                    None => (rest, ""),
                };
                Ok(Command::Add {
                    level: parse_level(level)?,
                    description: description.to_string(),
                })
            }
            "find" | "search" => Ok(Command::Find {
                level: parse_level(rest)?,
            }),
            "remove" | "rm" => Ok(Command::Remove {
                level: parse_level(rest)?,
            }),
            "list" | "ls" => Ok(Command::List),
            "tree" => Ok(Command::Tree),
            "stats" => Ok(Command::Stats),
            "samples" => Ok(Command::Samples),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(MissionError::UnknownCommand(name.to_string())),
        }
    }
}

fn parse_level(arg: &str) -> Result<i32> {
    if arg.is_empty() {
        return Err(MissionError::MissingArgument("level"));
    }
    arg.parse()
        .map_err(|_| MissionError::InvalidLevel(arg.to_string()))
}

const HELP: &str = "\
Commands:
  add <level> <description>   add or replace a mission
  find <level>                show the mission at a level
  remove <level>              remove the mission at a level
  list                        list all missions by level
  tree                        show the tree structure (h=height, bf=balance factor)
  stats                       show board statistics
  samples                     load the sample missions
  clear                       remove all missions
  help                        show this text
  quit                        leave";

/// Console session over a board, reading commands line by line.
pub struct Session<R, W> {
    input: R,
    output: W,
    prompt: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prompt: true,
        }
    }

    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Runs commands until `quit` or end of input.
    pub fn run(&mut self, board: &mut MissionBoard) -> io::Result<()> {
        while let Some(line) = self.read_line("> ")? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(board, command)?,
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }
        Ok(())
    }

    fn execute(&mut self, board: &mut MissionBoard, command: Command) -> io::Result<()> {
        debug!(?command, "executing");
        match command {
            Command::Add { level, description } => match board.add(level, &description) {
                Ok(true) => writeln!(self.output, "Mission added at level {level}."),
                Ok(false) => writeln!(self.output, "Mission at level {level} updated."),
                Err(err) => writeln!(self.output, "Error: {err}"),
            },
            Command::Find { level } => match board.find(level) {
                Ok(Some(mission)) => writeln!(self.output, "Found: {mission}"),
                Ok(None) => writeln!(self.output, "No mission at level {level}."),
                Err(err) => writeln!(self.output, "Error: {err}"),
            },
            Command::Remove { level } => match board.remove(level) {
                Ok(true) => writeln!(self.output, "Mission at level {level} removed."),
                Ok(false) => writeln!(self.output, "No mission at level {level}."),
                Err(err) => writeln!(self.output, "Error: {err}"),
            },
            Command::List => {
                if board.is_empty() {
                    return writeln!(self.output, "No missions.");
                }
                for mission in board.list() {
                    writeln!(self.output, "{mission}")?;
                }
                writeln!(self.output, "Total: {} missions", board.len())
            }
            Command::Tree => writeln!(self.output, "{}", board.structure().trim_end()),
            Command::Stats => writeln!(self.output, "{}", board.stats()),
            Command::Samples => {
                let count = board.load_samples();
                writeln!(self.output, "{count} sample missions loaded.")
            }
            Command::Clear => self.clear(board),
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }

    fn clear(&mut self, board: &mut MissionBoard) -> io::Result<()> {
        let answer = self.read_line("Remove all missions? (y/N) ")?;
        let confirmed = answer.is_some_and(|answer| {
            matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        });
        if confirmed {
            board.clear();
            writeln!(self.output, "All missions removed.")
        } else {
            writeln!(self.output, "Cancelled.")
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.prompt {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
