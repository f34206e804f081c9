//! Per-turn decision policies.
//!
//! The Queen's order comes from evasion first and the build policy second;
//! production is decided independently from the same snapshot.

pub mod build;
pub mod evade;
pub mod portfolio;
pub mod relocate;
pub mod train;

pub use portfolio::{choose_structure, Portfolio};
pub use relocate::{NearestOpenSite, Relocator};

use crate::board::Snapshot;
use crate::config::Config;
use crate::protocol::{QueenCommand, TrainCommand};

/// The two orders issued each turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub queen: QueenCommand,
    pub train: TrainCommand,
}

impl Decision {
    /// The always-legal pair used when nothing better can be decided.
    pub fn idle() -> Self {
        Decision {
            queen: QueenCommand::Wait,
            train: TrainCommand::none(),
        }
    }
}

/// Composes the policies with their configuration.
pub struct Policy {
    config: Config,
    relocator: Box<dyn Relocator>,
}

impl Policy {
    /// Builds the default policy stack with the given parameters.
    pub fn new(config: Config) -> Self {
        Policy::with_relocator(config, Box::new(NearestOpenSite))
    }

    /// Same as `new`, with a custom relocation target chooser.
    pub fn with_relocator(config: Config, relocator: Box<dyn Relocator>) -> Self {
        Policy { config, relocator }
    }

    /// Movement: evasion, or the build policy when there is no threat.
    pub fn decide_queen(&self, snapshot: &Snapshot) -> QueenCommand {
        evade::decide(snapshot, self.config.danger_radius)
            .unwrap_or_else(|| build::decide(snapshot, &self.config, self.relocator.as_ref()))
    }

    /// Production: which idle barracks to task this turn.
    pub fn decide_train(&self, snapshot: &Snapshot) -> TrainCommand {
        train::decide(snapshot, &self.config)
    }

    /// Both orders for one turn.
    pub fn decide(&self, snapshot: &Snapshot) -> Decision {
        Decision {
            queen: self.decide_queen(snapshot),
            train: self.decide_train(snapshot),
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::new(Config::default())
    }
}
