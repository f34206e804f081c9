//! Output command notation.
//!
//! Each turn the engine prints one Queen command and one training command:
//!
//! ```text
//! WAIT | MOVE <x> <y> | BUILD MINE | BUILD TOWER | BUILD BARRACKS-<KNIGHT|ARCHER|GIANT>
//! TRAIN [<siteId> ...]
//! ```
//!
//! Formatting goes through `Display`; the parsers accept exactly the forms
//! above and are used to check output legality.

use std::fmt;

use thiserror::Error;

use crate::board::{Point, SiteId, Specialization};

/// Errors that can occur when parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown structure '{0}'")]
    UnknownStructure(String),

    #[error("invalid integer '{0}'")]
    InvalidInteger(String),

    #[error("expected {expected} arguments, got {found}")]
    WrongArity { expected: usize, found: usize },
}

/// A structure the Queen can build or reinforce on the touched site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    Mine,
    Tower,
    Barracks(Specialization),
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTarget::Mine => write!(f, "MINE"),
            BuildTarget::Tower => write!(f, "TOWER"),
            BuildTarget::Barracks(s) => write!(f, "BARRACKS-{}", s.command_name()),
        }
    }
}

/// The Queen's order for this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueenCommand {
    Wait,
    /// Carries the coordinates printed after `MOVE`.
    Move(Point),
    Build(BuildTarget),
}

impl fmt::Display for QueenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueenCommand::Wait => write!(f, "WAIT"),
            QueenCommand::Move(p) => write!(f, "MOVE {} {}", p.x, p.y),
            QueenCommand::Build(target) => write!(f, "BUILD {}", target),
        }
    }
}

/// Barracks to start training at this turn. Empty means no training.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TrainCommand {
    pub sites: Vec<SiteId>,
}

impl TrainCommand {
    pub fn none() -> Self {
        TrainCommand::default()
    }
}

impl fmt::Display for TrainCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRAIN")?;
        for id in &self.sites {
            write!(f, " {}", id)?;
        }
        Ok(())
    }
}

fn parse_int(token: &str) -> Result<i32, CommandError> {
    token
        .parse::<i32>()
        .map_err(|_| CommandError::InvalidInteger(token.to_string()))
}

fn expect_arity(args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::WrongArity {
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

/// Parses a Queen command line.
pub fn parse_queen_command(s: &str) -> Result<QueenCommand, CommandError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let (&action, args) = tokens.split_first().ok_or(CommandError::EmptyInput)?;

    match action {
        "WAIT" => {
            expect_arity(args, 0)?;
            Ok(QueenCommand::Wait)
        }
        "MOVE" => {
            expect_arity(args, 2)?;
            Ok(QueenCommand::Move(Point::new(
                parse_int(args[0])?,
                parse_int(args[1])?,
            )))
        }
        "BUILD" => {
            expect_arity(args, 1)?;
            let target = match args[0] {
                "MINE" => BuildTarget::Mine,
                "TOWER" => BuildTarget::Tower,
                other => other
                    .strip_prefix("BARRACKS-")
                    .and_then(Specialization::from_command_name)
                    .map(BuildTarget::Barracks)
                    .ok_or_else(|| CommandError::UnknownStructure(other.to_string()))?,
            };
            Ok(QueenCommand::Build(target))
        }
        other => Err(CommandError::UnknownAction(other.to_string())),
    }
}

/// Parses a training command line.
pub fn parse_train_command(s: &str) -> Result<TrainCommand, CommandError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let (&action, args) = tokens.split_first().ok_or(CommandError::EmptyInput)?;
    if action != "TRAIN" {
        return Err(CommandError::UnknownAction(action.to_string()));
    }
    let sites = args
        .iter()
        .map(|t| parse_int(t))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TrainCommand { sites })
}
