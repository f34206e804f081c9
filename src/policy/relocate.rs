//! Relocation target selection.
//!
//! Used whenever the Queen is not on a site she can act on. The target
//! chooser sits behind the `Relocator` trait so it can be swapped without
//! touching the build state machine.

use tracing::debug;

use crate::board::{Point, Site, Snapshot};
use crate::config::Config;
use crate::protocol::QueenCommand;

/// Picks where the Queen should head next.
pub trait Relocator {
    /// Returns a destination, or `None` if there is nowhere worth going.
    fn target(&self, snapshot: &Snapshot, config: &Config) -> Option<Point>;
}

/// Heads for the nearest empty site out of reach of enemy Knights, then
/// for the nearest own structure that still needs work.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestOpenSite;

impl Relocator for NearestOpenSite {
    fn target(&self, snapshot: &Snapshot, config: &Config) -> Option<Point> {
        let touched = snapshot.player.touched_site.map(|s| s.id());
        let knights: Vec<Point> = snapshot
            .units
            .iter()
            .filter(|u| u.is_enemy_knight())
            .map(|u| u.position)
            .collect();
        let is_safe = |site: &Site| {
            knights
                .iter()
                .all(|k| k.distance(site.layout.position) >= config.danger_radius)
        };
        let candidates = || {
            snapshot
                .sites
                .iter()
                .filter(move |s| Some(s.id()) != touched)
        };

        candidates()
            .find(|s| s.is_empty() && is_safe(&s.item))
            .or_else(|| {
                candidates().find(|s| {
                    s.is_friendly()
                        && ((s.is_unsaturated_mine() && !s.is_depleted())
                            || s.needs_repair(config.repair_threshold))
                })
            })
            .map(|s| s.layout.position)
    }
}

/// Moves toward the relocator's target, or waits if it has none.
pub fn relocate(snapshot: &Snapshot, config: &Config, relocator: &dyn Relocator) -> QueenCommand {
    match relocator.target(snapshot, config) {
        Some(target) => {
            debug!(?target, "relocating");
            QueenCommand::Move(target)
        }
        None => {
            debug!("no relocation target, waiting");
            QueenCommand::Wait
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        by_distance, Owner, Player, SiteLayout, SiteState, Structure, Unit, UnitType,
    };

    fn site(id: i32, x: i32, structure: Structure, owner: Option<Owner>, param1: i32) -> Site {
        Site {
            layout: SiteLayout {
                id,
                position: Point::new(x, 500),
                radius: 60,
            },
            state: SiteState {
                gold_remaining: 100,
                max_mine_size: 3,
                structure,
                owner,
                param1,
                param2: -1,
            },
        }
    }

    fn snapshot(touched: Option<Site>, sites: Vec<Site>, units: Vec<Unit>) -> Snapshot {
        let queen = Point::new(0, 500);
        Snapshot {
            player: Player {
                gold: 0,
                position: queen,
                health: 100,
                touched_site: touched,
            },
            sites: by_distance(queen, sites),
            units: by_distance(queen, units),
        }
    }

    fn enemy_knight(x: i32) -> Unit {
        Unit {
            position: Point::new(x, 500),
            owner: Owner::Enemy,
            unit_type: UnitType::KNIGHT,
            health: 20,
        }
    }

    #[test]
    fn picks_nearest_empty_site() {
        let snap = snapshot(
            None,
            vec![
                site(0, 900, Structure::Empty, None, -1),
                site(1, 300, Structure::Mine, Some(Owner::Enemy), 1),
                site(2, 600, Structure::Empty, None, -1),
            ],
            vec![],
        );
        assert_eq!(
            NearestOpenSite.target(&snap, &Config::default()),
            Some(Point::new(600, 500))
        );
    }

    #[test]
    fn skips_touched_site() {
        let here = site(0, 0, Structure::Empty, None, -1);
        let snap = snapshot(
            Some(here),
            vec![here, site(1, 400, Structure::Empty, None, -1)],
            vec![],
        );
        assert_eq!(
            NearestOpenSite.target(&snap, &Config::default()),
            Some(Point::new(400, 500))
        );
    }

    #[test]
    fn avoids_sites_near_enemy_knights() {
        let snap = snapshot(
            None,
            vec![
                site(0, 400, Structure::Empty, None, -1),
                site(1, 1500, Structure::Empty, None, -1),
            ],
            vec![enemy_knight(500)],
        );
        assert_eq!(
            NearestOpenSite.target(&snap, &Config::default()),
            Some(Point::new(1500, 500))
        );
    }

    #[test]
    fn falls_back_to_own_structures_needing_work() {
        let snap = snapshot(
            None,
            vec![
                site(0, 200, Structure::Mine, Some(Owner::Friendly), 3),
                site(1, 500, Structure::Tower, Some(Owner::Friendly), 4),
                site(2, 800, Structure::Mine, Some(Owner::Friendly), 1),
            ],
            vec![],
        );
        assert_eq!(
            NearestOpenSite.target(&snap, &Config::default()),
            Some(Point::new(500, 500))
        );
    }

    #[test]
    fn nothing_to_do_waits() {
        let snap = snapshot(
            None,
            vec![site(0, 200, Structure::Mine, Some(Owner::Friendly), 3)],
            vec![],
        );
        assert_eq!(NearestOpenSite.target(&snap, &Config::default()), None);
        assert_eq!(
            relocate(&snap, &Config::default(), &NearestOpenSite),
            QueenCommand::Wait
        );
    }
}
