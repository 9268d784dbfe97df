//! Gender-specific life table
//!
//! Each row carries the survivor count L(x), the one-year survival probability P(x)
//! and the one-year death probability q(x). One table is held per gender; the
//! [`Assumptions`](super::Assumptions) container selects the right one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// One row of the life table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortalityRates {
    /// Survivors at exact age, L(x)
    pub survivors: f64,
    /// One-year survival probability, P(x)
    pub survival: f64,
    /// One-year death probability, q(x)
    pub death: f64,
}

/// Life table indexed by integer age
#[derive(Debug, Clone)]
pub struct MortalityTable {
    rows: BTreeMap<u32, MortalityRates>,
}

impl MortalityTable {
    /// Build a validated table from (age, rates) rows
    ///
    /// Rejects empty tables, repeated ages, probabilities outside [0, 1] and
    /// survivor counts that increase with age.
    pub fn new(rows: impl IntoIterator<Item = (u32, MortalityRates)>) -> Result<Self, TableError> {
        let mut table = BTreeMap::new();
        for (age, rates) in rows {
            check_probability("P(x)", age, rates.survival)?;
            check_probability("q(x)", age, rates.death)?;
            if table.insert(age, rates).is_some() {
                return Err(TableError::DuplicateAge(age));
            }
        }

        if table.is_empty() {
            return Err(TableError::EmptyMortalityTable);
        }

        let mut previous: Option<(u32, f64)> = None;
        for (&age, rates) in &table {
            if let Some((prev_age, prev_survivors)) = previous {
                if rates.survivors > prev_survivors {
                    return Err(TableError::SurvivorsIncreasing {
                        age: prev_age,
                        next_age: age,
                    });
                }
            }
            previous = Some((age, rates.survivors));
        }

        Ok(Self { rows: table })
    }

    /// Build a table from death probabilities alone, deriving P(x) = 1 - q(x)
    /// and L(x) from a radix of 100,000 at the first age
    pub fn from_death_rates(
        first_age: u32,
        death_rates: impl IntoIterator<Item = f64>,
    ) -> Result<Self, TableError> {
        let mut survivors = 100_000.0;
        let mut rows = Vec::new();
        for (offset, q) in death_rates.into_iter().enumerate() {
            let age = first_age + offset as u32;
            rows.push((
                age,
                MortalityRates {
                    survivors,
                    survival: 1.0 - q,
                    death: q,
                },
            ));
            survivors *= 1.0 - q;
        }
        Self::new(rows)
    }

    /// Full row for an age, if the table covers it
    pub fn get(&self, age: u32) -> Option<MortalityRates> {
        self.rows.get(&age).copied()
    }

    /// q(x)
    pub fn death_probability(&self, age: u32) -> Option<f64> {
        self.get(age).map(|r| r.death)
    }

    /// P(x)
    pub fn survival_probability(&self, age: u32) -> Option<f64> {
        self.get(age).map(|r| r.survival)
    }

    /// L(x)
    pub fn survivors(&self, age: u32) -> Option<f64> {
        self.get(age).map(|r| r.survivors)
    }

    /// Probability that a life aged `age` survives to `to_age`, L(to_age) / L(age)
    pub fn survival_between(&self, age: u32, to_age: u32) -> Option<f64> {
        let from = self.survivors(age)?;
        let to = self.survivors(to_age)?;
        if from <= 0.0 {
            return None;
        }
        Some(to / from)
    }

    /// Probability that a life aged `age` dies before `to_age`
    pub fn death_between(&self, age: u32, to_age: u32) -> Option<f64> {
        self.survival_between(age, to_age).map(|p| 1.0 - p)
    }

    /// Youngest and oldest age in the table
    pub fn age_range(&self) -> (u32, u32) {
        let first = self.rows.keys().next().copied().unwrap_or(0);
        let last = self.rows.keys().next_back().copied().unwrap_or(0);
        (first, last)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn check_probability(field: &'static str, age: u32, value: f64) -> Result<(), TableError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TableError::ProbabilityOutOfRange { field, age, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(survivors: f64, q: f64) -> MortalityRates {
        MortalityRates {
            survivors,
            survival: 1.0 - q,
            death: q,
        }
    }

    #[test]
    fn test_lookup_by_age() {
        let table = MortalityTable::new(vec![
            (60, rates(90_000.0, 0.006)),
            (61, rates(89_460.0, 0.0065)),
        ])
        .unwrap();

        assert_eq!(table.death_probability(60), Some(0.006));
        assert!((table.survival_probability(61).unwrap() - 0.9935).abs() < 1e-12);
        assert_eq!(table.get(62), None);
        assert_eq!(table.age_range(), (60, 61));
    }

    #[test]
    fn test_survival_between_uses_survivor_counts() {
        let table = MortalityTable::new(vec![
            (40, rates(100_000.0, 0.01)),
            (41, rates(99_000.0, 0.01)),
            (42, rates(98_010.0, 0.01)),
        ])
        .unwrap();

        assert!((table.survival_between(40, 42).unwrap() - 0.9801).abs() < 1e-12);
        assert!((table.death_between(40, 42).unwrap() - 0.0199).abs() < 1e-12);
        assert_eq!(table.survival_between(40, 43), None);
    }

    #[test]
    fn test_from_death_rates_compounds_survivors() {
        let table = MortalityTable::from_death_rates(18, vec![0.1, 0.2, 0.5]).unwrap();

        assert_eq!(table.len(), 3);
        assert!((table.survivors(19).unwrap() - 90_000.0).abs() < 1e-9);
        assert!((table.survivors(20).unwrap() - 72_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_increasing_survivors_rejected() {
        let err = MortalityTable::new(vec![(30, rates(1_000.0, 0.0)), (31, rates(1_001.0, 0.0))])
            .unwrap_err();
        assert_eq!(err, TableError::SurvivorsIncreasing { age: 30, next_age: 31 });
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let err = MortalityTable::new(vec![(30, rates(1_000.0, 1.5))]).unwrap_err();
        assert!(matches!(err, TableError::ProbabilityOutOfRange { age: 30, .. }));

        assert_eq!(
            MortalityTable::new(Vec::new()).unwrap_err(),
            TableError::EmptyMortalityTable
        );
    }
}
