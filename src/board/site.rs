//! Sites and the structures built on them.
//!
//! A site has an immutable layout (id, position, capture radius) fixed at
//! match start and a dynamic state that the referee resends every turn.

use super::geometry::{Point, Positioned};
use super::unit::{Owner, Specialization};

/// Stable site identifier assigned by the referee.
pub type SiteId = i32;

/// Wire value for "not touching any site".
pub const NO_SITE: SiteId = -1;

/// Tower health below which the Queen reinforces it.
pub const REPAIR_THRESHOLD: i32 = 10;

/// What is currently built on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Structure {
    #[default]
    Empty,
    Mine,
    Tower,
    Barracks,
}

impl Structure {
    /// Parses the referee's structure code; `-1` means nothing is built.
    pub fn from_code(code: i32) -> Option<Structure> {
        match code {
            -1 => Some(Structure::Empty),
            0 => Some(Structure::Mine),
            1 => Some(Structure::Tower),
            2 => Some(Structure::Barracks),
            _ => None,
        }
    }

    /// Returns the wire code.
    pub const fn code(self) -> i32 {
        match self {
            Structure::Empty => -1,
            Structure::Mine => 0,
            Structure::Tower => 1,
            Structure::Barracks => 2,
        }
    }
}

/// The fixed part of a site, received once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteLayout {
    pub id: SiteId,
    pub position: Point,
    pub radius: i32,
}

/// The per-turn part of a site. Replaced wholesale every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteState {
    /// Gold left to extract; `-1` while unknown.
    pub gold_remaining: i32,
    /// Maximum mine size; `-1` while unknown.
    pub max_mine_size: i32,
    pub structure: Structure,
    pub owner: Option<Owner>,
    /// Mine: size. Tower: health. Barracks: turns until training completes.
    pub param1: i32,
    /// Barracks: specialization code.
    pub param2: i32,
}

impl Default for SiteState {
    fn default() -> Self {
        SiteState {
            gold_remaining: -1,
            max_mine_size: -1,
            structure: Structure::Empty,
            owner: None,
            param1: -1,
            param2: -1,
        }
    }
}

/// A site with its layout and latest state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub layout: SiteLayout,
    pub state: SiteState,
}

impl Site {
    /// Creates a site whose dynamic state is not known yet.
    pub fn new(layout: SiteLayout) -> Self {
        Site {
            layout,
            state: SiteState::default(),
        }
    }

    pub fn id(&self) -> SiteId {
        self.layout.id
    }

    pub fn structure(&self) -> Structure {
        self.state.structure
    }

    pub fn owner(&self) -> Option<Owner> {
        self.state.owner
    }

    pub fn is_friendly(&self) -> bool {
        self.state.owner == Some(Owner::Friendly)
    }

    pub fn is_enemy(&self) -> bool {
        self.state.owner == Some(Owner::Enemy)
    }

    pub fn is_empty(&self) -> bool {
        self.state.structure == Structure::Empty
    }

    /// A mine that can still be upgraded.
    pub fn is_unsaturated_mine(&self) -> bool {
        self.state.structure == Structure::Mine && self.state.param1 < self.state.max_mine_size
    }

    /// A tower whose health is under the repair threshold.
    pub fn needs_repair(&self, threshold: i32) -> bool {
        self.state.structure == Structure::Tower && self.state.param1 < threshold
    }

    /// The unit type this barracks trains, if it is a barracks.
    pub fn specialization(&self) -> Option<Specialization> {
        match self.state.structure {
            Structure::Barracks => Specialization::from_code(self.state.param2),
            _ => None,
        }
    }

    /// A barracks with no training order in progress.
    pub fn is_idle_barracks(&self) -> bool {
        self.state.structure == Structure::Barracks && self.state.param1 == 0
    }

    /// Whether the site is known to have no gold left to mine.
    pub fn is_depleted(&self) -> bool {
        self.state.gold_remaining == 0
    }
}

impl Positioned for Site {
    fn position(&self) -> Point {
        self.layout.position
    }
}
