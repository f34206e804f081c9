//! Engine state management.
//!
//! Holds the site registry across turns and runs the policies once per
//! turn. Every successful turn writes exactly two lines: the Queen's order
//! and the training order.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{RegistryError, SiteLayout, SiteRegistry, Snapshot, SnapshotError, TurnInput};
use crate::config::Config;
use crate::policy::{Decision, Policy};

/// Errors that end the match for this engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("turn received before the site list")]
    NotStarted,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Holds the mutable state of the engine between turns.
pub struct Engine {
    registry: Option<SiteRegistry>,
    policy: Policy,
    turn: u32,
}

impl Engine {
    /// Creates an engine that has not seen the site list yet.
    pub fn new(config: Config) -> Self {
        Engine::with_policy(Policy::new(config))
    }

    /// Creates an engine around a pre-built policy, e.g. one with a custom
    /// relocator.
    pub fn with_policy(policy: Policy) -> Self {
        Engine {
            registry: None,
            policy,
            turn: 0,
        }
    }

    /// Registers the startup site list. Replaces any previous registry.
    pub fn start(&mut self, layouts: &[SiteLayout]) -> Result<(), RegistryError> {
        self.registry = Some(SiteRegistry::new(layouts)?);
        self.turn = 0;
        info!(sites = layouts.len(), "match started");
        Ok(())
    }

    /// The site registry, once the site list has been received.
    pub fn registry(&self) -> Option<&SiteRegistry> {
        self.registry.as_ref()
    }

    /// Number of turns played so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Refreshes the registry from `input` and decides both orders.
    ///
    /// A turn without a friendly Queen yields the idle pair rather than an
    /// error; the referee decides what that means for the match.
    pub fn play_turn(&mut self, input: TurnInput) -> Result<Decision, EngineError> {
        let registry = self.registry.as_mut().ok_or(EngineError::NotStarted)?;
        self.turn += 1;

        let snapshot = match Snapshot::build(registry, input) {
            Ok(s) => s,
            Err(SnapshotError::MissingQueen) => {
                warn!(turn = self.turn, "no friendly queen, idling");
                return Ok(Decision::idle());
            }
            Err(SnapshotError::Registry(e)) => return Err(e.into()),
        };
        debug!(
            turn = self.turn,
            gold = snapshot.player.gold,
            position = ?snapshot.player.position,
            touched = ?snapshot.player.touched_site.map(|s| s.id()),
            units = snapshot.units.len(),
            "snapshot"
        );

        Ok(self.policy.decide(&snapshot))
    }

    /// Plays one turn and writes the two command lines to `out`.
    pub fn handle_turn<W: Write>(&mut self, input: TurnInput, out: &mut W) -> Result<(), EngineError> {
        let decision = self.play_turn(input)?;
        info!(
            turn = self.turn,
            queen = %decision.queen,
            train = %decision.train,
            "orders"
        );
        writeln!(out, "{}", decision.queen)?;
        writeln!(out, "{}", decision.train)?;
        out.flush()?;
        Ok(())
    }
}
