//! Build policy: what the Queen does with the site she is standing on.
//!
//! Keyed on the touched site:
//! - none, enemy structure, own barracks: relocate
//! - own or neutral mine below capacity: upgrade it, otherwise relocate
//! - own tower below the repair threshold: reinforce it, otherwise relocate
//! - empty site: bootstrap a mine if we own nothing, else pick from the
//!   portfolio scores and wait if nothing is wanted

use tracing::debug;

use crate::board::{Snapshot, Structure};
use crate::config::Config;
use crate::protocol::{BuildTarget, QueenCommand};

use super::portfolio::choose_structure;
use super::relocate::{relocate, Relocator};

/// Decides the Queen's order for the site she is touching, if any.
pub fn decide(snapshot: &Snapshot, config: &Config, relocator: &dyn Relocator) -> QueenCommand {
    let Some(site) = snapshot.player.touched_site else {
        return relocate(snapshot, config, relocator);
    };
    if site.is_enemy() {
        debug!(site = site.id(), "touching enemy structure");
        return relocate(snapshot, config, relocator);
    }

    match site.structure() {
        Structure::Mine if site.is_unsaturated_mine() => QueenCommand::Build(BuildTarget::Mine),
        Structure::Tower if site.needs_repair(config.repair_threshold) => {
            QueenCommand::Build(BuildTarget::Tower)
        }
        Structure::Mine | Structure::Tower | Structure::Barracks => {
            relocate(snapshot, config, relocator)
        }
        Structure::Empty => {
            if snapshot.friendly_sites().next().is_none() {
                debug!(site = site.id(), "bootstrapping first mine");
                return QueenCommand::Build(BuildTarget::Mine);
            }
            match choose_structure(snapshot, &site, &config.portfolio) {
                Some(target) => QueenCommand::Build(target),
                None => QueenCommand::Wait,
            }
        }
    }
}
