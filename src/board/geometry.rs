//! Planar geometry over map coordinates.
//!
//! Positions are integer pixels on a 1920x1000 map. Distances are
//! Euclidean and carried as `f64`.

use std::ops::Deref;

/// Map width in distance units.
pub const MAP_WIDTH: i32 = 1920;

/// Map height in distance units.
pub const MAP_HEIGHT: i32 = 1000;

/// A position on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a point from map coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Vector pointing from `other` to `self`, saturating at the `i32` range.
    pub fn away_from(self, other: Point) -> Point {
        Point::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }

    /// Dot product, treating both points as vectors.
    pub fn dot(self, other: Point) -> i64 {
        i64::from(self.x) * i64::from(other.x) + i64::from(self.y) * i64::from(other.y)
    }
}

/// Anything with a position on the map.
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// An item annotated with its distance from some origin.
///
/// Dereferences to the wrapped item so policies can read fields directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranged<T> {
    pub item: T,
    pub distance: f64,
}

impl<T> Deref for Ranged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

/// Annotates every item with its distance from `origin` and sorts the
/// result ascending. The sort is stable: equal distances keep input order.
pub fn by_distance<T, I>(origin: Point, items: I) -> Vec<Ranged<T>>
where
    T: Positioned,
    I: IntoIterator<Item = T>,
{
    let mut ranged: Vec<Ranged<T>> = items
        .into_iter()
        .map(|item| {
            let distance = origin.distance(item.position());
            Ranged { item, distance }
        })
        .collect();
    ranged.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranged
}
