//! Weighted selection tables
//!
//! A [`WeightedTable`] is a mutable multiset of values, each carrying a
//! relative selection weight. Populators use tables to pick among typed
//! variants (which flower, which mushroom cap) in proportion to their weight.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when inserting an entry with an unusable weight
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum TableError {
    #[error("weight must be finite and positive, got {0}")]
    InvalidWeight(f64),
}

/// One value plus its relative selection weight
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    value: T,
    weight: f64,
}

impl<T> WeightedEntry<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A mutable multiset of weighted values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedTable<T> {
    entries: Vec<WeightedEntry<T>>,
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a value with the given relative weight
    pub fn insert(&mut self, value: T, weight: f64) -> Result<(), TableError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(TableError::InvalidWeight(weight));
        }
        self.entries.push(WeightedEntry { value, weight });
        Ok(())
    }

    /// Remove the first entry holding `value`; returns whether one was removed
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.entries.iter().position(|e| &e.value == value) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry weights
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedEntry<T>> {
        self.entries.iter()
    }

    /// Pick one value at random, proportionally to entry weights
    ///
    /// Returns `None` on an empty table.
    pub fn get<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.entries.is_empty() {
            return None;
        }

        let mut roll = rng.gen::<f64>() * self.total_weight();
        for entry in &self.entries {
            roll -= entry.weight;
            if roll < 0.0 {
                return Some(&entry.value);
            }
        }

        // Rounding can leave a sliver of roll; it belongs to the last entry
        self.entries.last().map(|e| &e.value)
    }
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_empty_table_returns_none() {
        let table: WeightedTable<u32> = WeightedTable::new();
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        assert_eq!(table.get(&mut rng), None);
    }

    #[test]
    fn test_single_entry_always_selected() {
        let mut table = WeightedTable::new();
        table.insert("only", 3.0).unwrap();

        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(table.get(&mut rng), Some(&"only"));
        }
    }

    #[test]
    fn test_selection_tracks_weights() {
        let mut table = WeightedTable::new();
        table.insert("common", 2.0).unwrap();
        table.insert("rare", 1.0).unwrap();

        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let trials = 30_000;
        let mut common = 0;
        for _ in 0..trials {
            if table.get(&mut rng) == Some(&"common") {
                common += 1;
            }
        }

        let ratio = common as f64 / trials as f64;
        assert!(
            (ratio - 2.0 / 3.0).abs() < 0.02,
            "expected ~2/3 common, got {}",
            ratio
        );
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut table = WeightedTable::new();
        assert_eq!(table.insert("a", 0.0), Err(TableError::InvalidWeight(0.0)));
        assert_eq!(
            table.insert("a", -2.0),
            Err(TableError::InvalidWeight(-2.0))
        );
        assert!(table.insert("a", f64::INFINITY).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut table = WeightedTable::new();
        table.insert("a", 1.0).unwrap();
        table.insert("b", 1.0).unwrap();

        assert!(table.remove(&"a"));
        assert!(!table.remove(&"a"));
        assert_eq!(table.len(), 1);

        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn test_total_weight() {
        let mut table = WeightedTable::new();
        table.insert("a", 1.5).unwrap();
        table.insert("b", 2.5).unwrap();
        assert!((table.total_weight() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut table = WeightedTable::new();
        table.insert("a".to_string(), 1.0).unwrap();
        table.insert("b".to_string(), 4.0).unwrap();

        let serialized = ron::to_string(&table).expect("Failed to serialize");
        let deserialized: WeightedTable<String> =
            ron::from_str(&serialized).expect("Failed to deserialize");
        assert_eq!(table, deserialized);
    }
}
