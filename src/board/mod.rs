//! Board representation and game-state types.
//!
//! Contains the data model the policies operate over: map geometry, sites
//! and their structures, units, the cross-turn site registry, and the
//! per-turn snapshot.

pub mod geometry;
pub mod registry;
pub mod site;
pub mod snapshot;
pub mod unit;

pub use geometry::{by_distance, Point, Positioned, Ranged, MAP_HEIGHT, MAP_WIDTH};
pub use registry::{RegistryError, SiteRegistry};
pub use site::{Site, SiteId, SiteLayout, SiteState, Structure, NO_SITE, REPAIR_THRESHOLD};
pub use snapshot::{Player, Snapshot, SnapshotError, TurnInput};
pub use unit::{Owner, Specialization, Unit, UnitType, ALL_SPECIALIZATIONS};
