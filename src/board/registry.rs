//! The site registry: the only state that survives between turns.
//!
//! Built once from the startup site list and refreshed in place every turn.
//! Sites keep their startup order so that distance ties are broken the
//! same way on every turn.

use std::collections::HashMap;

use thiserror::Error;

use super::site::{Site, SiteId, SiteLayout, SiteState};

/// Errors raised when input refers to sites inconsistently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("site {0} was listed twice at startup")]
    DuplicateSite(SiteId),

    #[error("site {0} was not listed at startup")]
    UnknownSite(SiteId),

    #[error("site {0} was updated twice in one turn")]
    DuplicateUpdate(SiteId),

    #[error("site {0} was missing from the turn's site list")]
    MissingUpdate(SiteId),
}

/// Mapping from site id to site, in startup order.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    index: HashMap<SiteId, usize>,
}

impl SiteRegistry {
    /// Creates a registry from the startup layouts.
    pub fn new(layouts: &[SiteLayout]) -> Result<Self, RegistryError> {
        let mut registry = SiteRegistry {
            sites: Vec::with_capacity(layouts.len()),
            index: HashMap::with_capacity(layouts.len()),
        };
        for layout in layouts {
            if registry.index.contains_key(&layout.id) {
                return Err(RegistryError::DuplicateSite(layout.id));
            }
            registry.index.insert(layout.id, registry.sites.len());
            registry.sites.push(Site::new(*layout));
        }
        Ok(registry)
    }

    /// Number of registered sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Looks up a site by id.
    pub fn get(&self, id: SiteId) -> Option<&Site> {
        self.index.get(&id).map(|&i| &self.sites[i])
    }

    /// Replaces the dynamic state of every site from one turn's updates.
    ///
    /// Each registered site must appear exactly once. Nothing is written
    /// unless the whole list checks out.
    pub fn refresh(&mut self, updates: Vec<(SiteId, SiteState)>) -> Result<(), RegistryError> {
        let mut seen = vec![false; self.sites.len()];
        let mut slots = Vec::with_capacity(updates.len().min(self.sites.len()));
        for (id, state) in updates {
            let i = *self.index.get(&id).ok_or(RegistryError::UnknownSite(id))?;
            if std::mem::replace(&mut seen[i], true) {
                return Err(RegistryError::DuplicateUpdate(id));
            }
            slots.push((i, state));
        }
        if let Some(i) = seen.iter().position(|&s| !s) {
            return Err(RegistryError::MissingUpdate(self.sites[i].id()));
        }
        for (i, state) in slots {
            self.sites[i].state = state;
        }
        Ok(())
    }

    /// Iterates sites in startup order.
    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::Point;
    use crate::board::site::Structure;
    use crate::board::unit::Owner;

    fn layouts() -> Vec<SiteLayout> {
        vec![
            SiteLayout { id: 3, position: Point::new(10, 20), radius: 50 },
            SiteLayout { id: 1, position: Point::new(300, 400), radius: 70 },
        ]
    }

    fn mine_state(size: i32) -> SiteState {
        SiteState {
            gold_remaining: 150,
            max_mine_size: 4,
            structure: Structure::Mine,
            owner: Some(Owner::Friendly),
            param1: size,
            param2: -1,
        }
    }

    #[test]
    fn keeps_startup_order() {
        let registry = SiteRegistry::new(&layouts()).unwrap();
        let ids: Vec<SiteId> = registry.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut l = layouts();
        l.push(l[0]);
        assert_eq!(
            SiteRegistry::new(&l).unwrap_err(),
            RegistryError::DuplicateSite(3)
        );
    }

    #[test]
    fn refresh_overwrites_state_and_keeps_layout() {
        let mut registry = SiteRegistry::new(&layouts()).unwrap();
        registry
            .refresh(vec![(1, mine_state(1)), (3, SiteState::default())])
            .unwrap();
        registry
            .refresh(vec![(3, SiteState::default()), (1, mine_state(2))])
            .unwrap();

        let site = registry.get(1).unwrap();
        assert_eq!(site.state, mine_state(2));
        assert_eq!(site.layout.position, Point::new(300, 400));
        assert_eq!(site.layout.radius, 70);
    }

    #[test]
    fn refresh_replaces_every_field() {
        let mut registry = SiteRegistry::new(&layouts()).unwrap();
        registry
            .refresh(vec![(3, mine_state(3)), (1, mine_state(0))])
            .unwrap();
        registry
            .refresh(vec![(3, SiteState::default()), (1, mine_state(0))])
            .unwrap();
        assert_eq!(registry.get(3).unwrap().state, SiteState::default());
    }

    #[test]
    fn refresh_unknown_site_fails() {
        let mut registry = SiteRegistry::new(&layouts()).unwrap();
        assert_eq!(
            registry.refresh(vec![(3, mine_state(0)), (9, mine_state(0))]),
            Err(RegistryError::UnknownSite(9))
        );
        assert!(registry.get(9).is_none());
    }

    #[test]
    fn refresh_rejects_repeated_site() {
        let mut registry = SiteRegistry::new(&layouts()).unwrap();
        assert_eq!(
            registry.refresh(vec![(3, mine_state(0)), (3, mine_state(1))]),
            Err(RegistryError::DuplicateUpdate(3))
        );
    }

    #[test]
    fn refresh_rejects_missing_site_and_keeps_old_state() {
        let mut registry = SiteRegistry::new(&layouts()).unwrap();
        registry
            .refresh(vec![(3, mine_state(0)), (1, mine_state(2))])
            .unwrap();
        assert_eq!(
            registry.refresh(vec![(3, mine_state(1))]),
            Err(RegistryError::MissingUpdate(1))
        );
        // a rejected turn writes nothing
        assert_eq!(registry.get(3).unwrap().state, mine_state(0));
        assert_eq!(registry.get(1).unwrap().state, mine_state(2));
    }
}
