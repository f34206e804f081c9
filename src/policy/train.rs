//! Production: which idle barracks start a training batch this turn.
//!
//! Candidates are ranked by a per-specialization weight adjusted to the
//! current threats, then queued greedily while they fit in the turn's gold.
//! All barracks share one budget, so the union of orders never costs more
//! than the gold available at the start of the turn.

use std::cmp::Ordering;

use tracing::debug;

use crate::board::{SiteId, Snapshot, Specialization, Structure};
use crate::config::Config;
use crate::protocol::TrainCommand;

/// An idle barracks that could be tasked this turn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    site: SiteId,
    spec: Specialization,
    weight: f64,
    /// Distance to the enemy Queen; units trained closer reach her sooner.
    reach: f64,
}

fn by_priority(a: &Candidate, b: &Candidate) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then(a.reach.total_cmp(&b.reach))
        .then(a.site.cmp(&b.site))
}

/// Decides this turn's training orders.
pub fn decide(snapshot: &Snapshot, config: &Config) -> TrainCommand {
    let budget = snapshot.player.gold.saturating_sub(config.gold_reserve.max(0));
    if budget <= 0 {
        return TrainCommand::none();
    }

    let weights = &config.training;
    let knight_near = snapshot
        .nearest_enemy_knight()
        .is_some_and(|k| k.distance < config.danger_radius);
    let enemy_towers = snapshot
        .sites
        .iter()
        .any(|s| s.is_enemy() && s.structure() == Structure::Tower);
    let enemy_queen = snapshot.enemy_queen().map(|q| q.position);

    let mut candidates: Vec<Candidate> = snapshot
        .friendly_sites()
        .filter(|s| s.is_idle_barracks())
        .filter_map(|s| {
            let spec = s.specialization()?;
            let mut weight = weights.weight(spec);
            if spec == Specialization::Archer && knight_near {
                weight += weights.archer_threat_bonus;
            }
            if spec == Specialization::Giant && enemy_towers {
                weight += weights.giant_tower_bonus;
            }
            let reach = enemy_queen.map_or(0.0, |q| q.distance(s.layout.position));
            Some(Candidate {
                site: s.id(),
                spec,
                weight,
                reach,
            })
        })
        .collect();
    candidates.sort_by(by_priority);

    let mut spent = 0;
    let mut units = 0;
    let mut sites = Vec::new();
    for c in candidates {
        if c.spec.cost() <= budget - spent {
            spent += c.spec.cost();
            units += c.spec.batch_size();
            sites.push(c.site);
        }
    }
    debug!(gold = snapshot.player.gold, spent, units, ?sites, "training");
    TrainCommand { sites }
}
