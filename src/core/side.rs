//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The game always has exactly two sides: the human at the table and the
//! automated opponent driven by the timer loop.
//!
//! ## SideMap
//!
//! Per-side storage with O(1) access, indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The side controlled by clicks.
    Human,
    /// The side controlled by the timer loop.
    Automated,
}

impl Side {
    /// Both sides, human first. Pile enumeration follows this order.
    pub const ALL: [Side; 2] = [Side::Human, Side::Automated];

    /// Position of this side in `Side::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Automated => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Automated => write!(f, "automated"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use pile_match::core::{Side, SideMap};
///
/// let mut hand_sizes: SideMap<usize> = SideMap::new(|_| 26);
/// hand_sizes[Side::Automated] -= 1;
///
/// assert_eq!(hand_sizes[Side::Human], 26);
/// assert_eq!(hand_sizes[Side::Automated], 25);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    human: T,
    automated: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            human: factory(Side::Human),
            automated: factory(Side::Automated),
        }
    }

    /// Create a map from the two entries.
    pub fn from_parts(human: T, automated: T) -> Self {
        Self { human, automated }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            human: value.clone(),
            automated: value,
        }
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Human => &self.human,
            Side::Automated => &self.automated,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Human => &mut self.human,
            Side::Automated => &mut self.automated,
        }
    }

    /// Iterate over (Side, &T) pairs, human first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |side| (side, self.get(side)))
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Human.index(), 0);
        assert_eq!(Side::Automated.index(), 1);
        assert_eq!(format!("{}", Side::Automated), "automated");
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::Human], 0);
        assert_eq!(map[Side::Automated], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);

        map[Side::Human] = 10;
        map[Side::Automated] = 20;

        assert_eq!(map[Side::Human], 10);
        assert_eq!(map[Side::Automated], 20);
    }

    #[test]
    fn test_side_map_iter_order() {
        let map: SideMap<i32> = SideMap::new(|s| s.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Human, &0), (Side::Automated, &1)]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map: SideMap<i32> = SideMap::new(|s| s.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
