//! Unit types, ownership, and training specializations.
//!
//! Units are observed fresh every turn and carry no identity across turns.

use super::geometry::{Point, Positioned};

/// Which side an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Friendly,
    Enemy,
}

impl Owner {
    /// Returns the wire code used by the referee.
    pub const fn code(self) -> i32 {
        match self {
            Owner::Friendly => 0,
            Owner::Enemy => 1,
        }
    }

    /// Parses an owner from its wire code. `-1` (no owner) is not an owner.
    pub fn from_code(code: i32) -> Option<Owner> {
        match code {
            0 => Some(Owner::Friendly),
            1 => Some(Owner::Enemy),
            _ => None,
        }
    }
}

/// A unit specialization a barracks can be configured to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Specialization {
    Knight,
    Archer,
    Giant,
}

/// All specializations in wire-code order.
pub const ALL_SPECIALIZATIONS: [Specialization; 3] = [
    Specialization::Knight,
    Specialization::Archer,
    Specialization::Giant,
];

impl Specialization {
    /// Gold cost of one training batch.
    pub const fn cost(self) -> i32 {
        match self {
            Specialization::Knight => 80,
            Specialization::Archer => 100,
            Specialization::Giant => 140,
        }
    }

    /// Number of units produced by one training batch.
    pub const fn batch_size(self) -> u32 {
        match self {
            Specialization::Knight => 4,
            Specialization::Archer => 2,
            Specialization::Giant => 1,
        }
    }

    /// Returns the wire code, shared with `UnitType`.
    pub const fn code(self) -> i32 {
        match self {
            Specialization::Knight => 0,
            Specialization::Archer => 1,
            Specialization::Giant => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Specialization> {
        match code {
            0 => Some(Specialization::Knight),
            1 => Some(Specialization::Archer),
            2 => Some(Specialization::Giant),
            _ => None,
        }
    }

    /// Uppercase name used in `BUILD BARRACKS-<NAME>`.
    pub const fn command_name(self) -> &'static str {
        match self {
            Specialization::Knight => "KNIGHT",
            Specialization::Archer => "ARCHER",
            Specialization::Giant => "GIANT",
        }
    }

    pub fn from_command_name(name: &str) -> Option<Specialization> {
        ALL_SPECIALIZATIONS
            .into_iter()
            .find(|s| s.command_name() == name)
    }
}

/// The type of a mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Queen,
    Trained(Specialization),
}

impl UnitType {
    pub const KNIGHT: UnitType = UnitType::Trained(Specialization::Knight);
    pub const ARCHER: UnitType = UnitType::Trained(Specialization::Archer);
    pub const GIANT: UnitType = UnitType::Trained(Specialization::Giant);

    /// Parses a unit type from its wire code (`-1` is the Queen).
    pub fn from_code(code: i32) -> Option<UnitType> {
        match code {
            -1 => Some(UnitType::Queen),
            other => Specialization::from_code(other).map(UnitType::Trained),
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            UnitType::Queen => -1,
            UnitType::Trained(s) => s.code(),
        }
    }
}

/// A unit observed this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub position: Point,
    pub owner: Owner,
    pub unit_type: UnitType,
    pub health: i32,
}

impl Unit {
    pub fn is_enemy_knight(&self) -> bool {
        self.owner == Owner::Enemy && self.unit_type == UnitType::KNIGHT
    }

    pub fn is_queen_of(&self, owner: Owner) -> bool {
        self.owner == owner && self.unit_type == UnitType::Queen
    }
}

impl Positioned for Unit {
    fn position(&self) -> Point {
        self.position
    }
}
