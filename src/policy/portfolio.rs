//! New-structure choice on an empty site.
//!
//! Counts what the agent already owns and scores each candidate structure
//! by how far its count falls short of the configured target, weighted per
//! structure kind and nudged by nearby threats.

use tracing::debug;

use crate::board::{Site, Snapshot, Specialization, Structure, UnitType, ALL_SPECIALIZATIONS};
use crate::config::PortfolioConfig;
use crate::protocol::BuildTarget;

/// Counts of friendly structures by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Portfolio {
    pub mines: u32,
    pub towers: u32,
    /// Indexed by `Specialization::code()`.
    pub barracks: [u32; 3],
}

impl Portfolio {
    /// Tallies every friendly site in the snapshot.
    pub fn of(snapshot: &Snapshot) -> Portfolio {
        let mut p = Portfolio::default();
        for site in snapshot.friendly_sites() {
            match site.structure() {
                Structure::Mine => p.mines += 1,
                Structure::Tower => p.towers += 1,
                Structure::Barracks => {
                    if let Some(spec) = site.specialization() {
                        p.barracks[spec.code() as usize] += 1;
                    }
                }
                Structure::Empty => {}
            }
        }
        p
    }

    pub fn barracks_of(&self, spec: Specialization) -> u32 {
        self.barracks[spec.code() as usize]
    }
}

/// Fraction of `target` still missing, in `0.0..=1.0`.
fn shortfall(have: u32, target: u32) -> f64 {
    if target == 0 || have >= target {
        return 0.0;
    }
    f64::from(target - have) / f64::from(target)
}

/// Scores every buildable option for `site`, in tie-break order.
pub fn score_options(
    snapshot: &Snapshot,
    site: &Site,
    config: &PortfolioConfig,
) -> Vec<(BuildTarget, f64)> {
    let portfolio = Portfolio::of(snapshot);
    let threatened = snapshot
        .enemy_units()
        .next()
        .is_some_and(|u| u.distance < config.threat_radius);
    let enemy_knights = snapshot.enemy_has(UnitType::KNIGHT);

    let mut options = Vec::with_capacity(5);
    if !site.is_depleted() {
        options.push((
            BuildTarget::Mine,
            config.mine_weight * shortfall(portfolio.mines, config.mines),
        ));
    }

    let mut tower = config.tower_weight * shortfall(portfolio.towers, config.towers);
    if threatened {
        tower += config.threat_bonus;
    }
    options.push((BuildTarget::Tower, tower));

    for spec in ALL_SPECIALIZATIONS {
        let have = portfolio.barracks_of(spec);
        let mut score = config.barracks_weight * shortfall(have, config.barracks_target(spec));
        if spec == Specialization::Archer && enemy_knights && have == 0 {
            score += config.threat_bonus;
        }
        options.push((BuildTarget::Barracks(spec), score));
    }
    options
}

/// Picks the structure to build on an empty site, or `None` when every
/// target is already met.
pub fn choose_structure(
    snapshot: &Snapshot,
    site: &Site,
    config: &PortfolioConfig,
) -> Option<BuildTarget> {
    let options = score_options(snapshot, site, config);
    let mut best: Option<(BuildTarget, f64)> = None;
    for (target, score) in options {
        if score <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((target, score));
        }
    }
    debug!(choice = ?best, "structure choice");
    best.map(|(target, _)| target)
}
