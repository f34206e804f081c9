//! Per-turn snapshot assembly.
//!
//! Applies a turn's site updates to the registry, promotes the friendly
//! Queen into the `Player` view, and sorts sites and units by distance from
//! her. Policies only ever read the resulting `Snapshot`.

use thiserror::Error;
use tracing::warn;

use super::geometry::{by_distance, Point, Ranged};
use super::registry::{RegistryError, SiteRegistry};
use super::site::{Site, SiteId, SiteState};
use super::unit::{Owner, Unit, UnitType};

/// Errors raised while building a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no friendly queen in unit list")]
    MissingQueen,
}

/// Raw data received for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnInput {
    pub gold: i32,
    pub touched_site: Option<SiteId>,
    pub sites: Vec<(SiteId, SiteState)>,
    pub units: Vec<Unit>,
}

/// The agent's own Queen as seen this turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub gold: i32,
    pub position: Point,
    pub health: i32,
    /// The site whose capture radius contains the Queen, if any.
    pub touched_site: Option<Site>,
}

/// Everything the policies see for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: Player,
    /// All sites, nearest to the Queen first.
    pub sites: Vec<Ranged<Site>>,
    /// All units including the Queen herself, nearest first.
    pub units: Vec<Ranged<Unit>>,
}

impl Snapshot {
    /// Refreshes `registry` from `input` and assembles the turn view.
    ///
    /// The turn must list every registered site exactly once. Once that
    /// holds, the registry is updated even if no Queen is found, so it
    /// always mirrors the latest input.
    pub fn build(registry: &mut SiteRegistry, input: TurnInput) -> Result<Snapshot, SnapshotError> {
        registry.refresh(input.sites)?;

        let touched_site = match input.touched_site {
            Some(id) => Some(*registry.get(id).ok_or(RegistryError::UnknownSite(id))?),
            None => None,
        };

        let mut queens = input.units.iter().filter(|u| u.is_queen_of(Owner::Friendly));
        let queen = *queens.next().ok_or(SnapshotError::MissingQueen)?;
        if queens.next().is_some() {
            warn!("more than one friendly queen reported, using the first");
        }

        let player = Player {
            gold: input.gold,
            position: queen.position,
            health: queen.health,
            touched_site,
        };

        Ok(Snapshot {
            player,
            sites: by_distance(player.position, registry.iter().copied()),
            units: by_distance(player.position, input.units),
        })
    }

    /// Sites currently owned by the agent, nearest first.
    pub fn friendly_sites(&self) -> impl Iterator<Item = &Ranged<Site>> {
        self.sites.iter().filter(|s| s.is_friendly())
    }

    /// Enemy units, nearest first.
    pub fn enemy_units(&self) -> impl Iterator<Item = &Ranged<Unit>> {
        self.units.iter().filter(|u| u.owner == Owner::Enemy)
    }

    /// The enemy Knight closest to the Queen.
    pub fn nearest_enemy_knight(&self) -> Option<&Ranged<Unit>> {
        self.units.iter().find(|u| u.is_enemy_knight())
    }

    /// The enemy Queen, if she is on the map.
    pub fn enemy_queen(&self) -> Option<&Ranged<Unit>> {
        self.units.iter().find(|u| u.is_queen_of(Owner::Enemy))
    }

    /// Whether an enemy unit of the given type exists anywhere.
    pub fn enemy_has(&self, unit_type: UnitType) -> bool {
        self.enemy_units().any(|u| u.unit_type == unit_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::site::{SiteLayout, Structure};

    fn registry() -> SiteRegistry {
        SiteRegistry::new(&[
            SiteLayout { id: 0, position: Point::new(900, 500), radius: 60 },
            SiteLayout { id: 1, position: Point::new(120, 100), radius: 60 },
            SiteLayout { id: 2, position: Point::new(400, 300), radius: 60 },
        ])
        .unwrap()
    }

    fn queen(owner: Owner, x: i32, y: i32) -> Unit {
        Unit {
            position: Point::new(x, y),
            owner,
            unit_type: UnitType::Queen,
            health: 100,
        }
    }

    /// A full site list for `registry()` with every site empty except `id`.
    fn sites_with(id: SiteId, state: SiteState) -> Vec<(SiteId, SiteState)> {
        (0..3)
            .map(|i| if i == id { (i, state) } else { (i, SiteState::default()) })
            .collect()
    }

    fn all_empty() -> Vec<(SiteId, SiteState)> {
        sites_with(-1, SiteState::default())
    }

    fn friendly_mine(size: i32) -> SiteState {
        SiteState {
            gold_remaining: 300,
            max_mine_size: 3,
            structure: Structure::Mine,
            owner: Some(Owner::Friendly),
            param1: size,
            param2: -1,
        }
    }

    #[test]
    fn build_promotes_friendly_queen() {
        let mut reg = registry();
        let input = TurnInput {
            gold: 120,
            touched_site: None,
            sites: all_empty(),
            units: vec![queen(Owner::Enemy, 1800, 900), queen(Owner::Friendly, 100, 100)],
        };
        let snap = Snapshot::build(&mut reg, input).unwrap();
        assert_eq!(snap.player.gold, 120);
        assert_eq!(snap.player.position, Point::new(100, 100));
        assert_eq!(snap.player.health, 100);
        assert!(snap.player.touched_site.is_none());
        assert_eq!(snap.enemy_queen().unwrap().position, Point::new(1800, 900));
    }

    #[test]
    fn build_sorts_sites_and_units_by_distance() {
        let mut reg = registry();
        let input = TurnInput {
            gold: 0,
            touched_site: None,
            sites: all_empty(),
            units: vec![queen(Owner::Enemy, 1800, 900), queen(Owner::Friendly, 100, 100)],
        };
        let snap = Snapshot::build(&mut reg, input).unwrap();
        let ids: Vec<SiteId> = snap.sites.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(snap.units[0].owner, Owner::Friendly);
        assert_eq!(snap.units[0].distance, 0.0);
    }

    #[test]
    fn build_applies_updates_and_resolves_touched_site() {
        let mut reg = registry();
        let input = TurnInput {
            gold: 0,
            touched_site: Some(2),
            sites: sites_with(2, friendly_mine(1)),
            units: vec![queen(Owner::Friendly, 400, 300)],
        };
        let snap = Snapshot::build(&mut reg, input).unwrap();
        let touched = snap.player.touched_site.unwrap();
        assert_eq!(touched.id(), 2);
        assert_eq!(touched.state, friendly_mine(1));
        assert_eq!(reg.get(2).unwrap().state, friendly_mine(1));
        assert_eq!(snap.friendly_sites().count(), 1);
    }

    #[test]
    fn build_without_queen_still_updates_registry() {
        let mut reg = registry();
        let input = TurnInput {
            gold: 0,
            touched_site: None,
            sites: sites_with(0, friendly_mine(2)),
            units: vec![queen(Owner::Enemy, 10, 10)],
        };
        assert_eq!(
            Snapshot::build(&mut reg, input).unwrap_err(),
            SnapshotError::MissingQueen
        );
        assert_eq!(reg.get(0).unwrap().state, friendly_mine(2));
    }

    #[test]
    fn build_rejects_unknown_touched_site() {
        let mut reg = registry();
        let input = TurnInput {
            gold: 0,
            touched_site: Some(42),
            sites: all_empty(),
            units: vec![queen(Owner::Friendly, 0, 0)],
        };
        assert_eq!(
            Snapshot::build(&mut reg, input).unwrap_err(),
            SnapshotError::Registry(RegistryError::UnknownSite(42))
        );
    }

    #[test]
    fn build_rejects_turn_that_skips_a_site() {
        let mut reg = registry();
        let first = TurnInput {
            gold: 0,
            touched_site: None,
            sites: sites_with(1, friendly_mine(2)),
            units: vec![queen(Owner::Friendly, 0, 0)],
        };
        Snapshot::build(&mut reg, first).unwrap();

        // site 0 twice, site 1 never
        let second = TurnInput {
            gold: 0,
            touched_site: None,
            sites: vec![
                (0, SiteState::default()),
                (0, SiteState::default()),
                (2, SiteState::default()),
            ],
            units: vec![queen(Owner::Friendly, 0, 0)],
        };
        assert_eq!(
            Snapshot::build(&mut reg, second).unwrap_err(),
            SnapshotError::Registry(RegistryError::DuplicateUpdate(0))
        );

        let third = TurnInput {
            gold: 0,
            touched_site: None,
            sites: vec![(0, SiteState::default()), (2, SiteState::default())],
            units: vec![queen(Owner::Friendly, 0, 0)],
        };
        assert_eq!(
            Snapshot::build(&mut reg, third).unwrap_err(),
            SnapshotError::Registry(RegistryError::MissingUpdate(1))
        );
        assert_eq!(reg.get(1).unwrap().state, friendly_mine(2));
    }

    #[test]
    fn nearest_enemy_knight_skips_other_units() {
        let mut reg = registry();
        let knight = |owner, x| Unit {
            position: Point::new(x, 0),
            owner,
            unit_type: UnitType::KNIGHT,
            health: 25,
        };
        let archer = Unit {
            position: Point::new(10, 0),
            owner: Owner::Enemy,
            unit_type: UnitType::ARCHER,
            health: 45,
        };
        let input = TurnInput {
            gold: 0,
            touched_site: None,
            sites: all_empty(),
            units: vec![
                queen(Owner::Friendly, 0, 0),
                knight(Owner::Enemy, 500),
                archer,
                knight(Owner::Friendly, 20),
                knight(Owner::Enemy, 200),
            ],
        };
        let snap = Snapshot::build(&mut reg, input).unwrap();
        let nearest = snap.nearest_enemy_knight().unwrap();
        assert_eq!(nearest.position, Point::new(200, 0));
        assert_eq!(nearest.distance, 200.0);
        assert!(snap.enemy_has(UnitType::ARCHER));
        assert!(!snap.enemy_has(UnitType::GIANT));
    }
}
