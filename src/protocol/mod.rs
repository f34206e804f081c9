//! Referee protocol handling.
//!
//! Parses the startup and per-turn input records and formats the two
//! command lines the engine answers with each turn.

pub mod command;
pub mod input;

pub use command::{
    parse_queen_command, parse_train_command, BuildTarget, CommandError, QueenCommand,
    TrainCommand,
};
pub use input::{InputReader, ProtocolError};
