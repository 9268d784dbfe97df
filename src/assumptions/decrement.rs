//! Turnover assumptions: resignation and dismissal probabilities by age band
//!
//! Bands are closed integer ranges. Ages outside every band carry no turnover.

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Cause of a voluntary or involuntary exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecrementCause {
    Resignation,
    Dismissal,
}

/// Annual exit probabilities for ages `min_age..=max_age`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecrementBand {
    pub min_age: u32,
    pub max_age: u32,
    pub resignation: f64,
    pub dismissal: f64,
}

impl DecrementBand {
    pub fn new(min_age: u32, max_age: u32, resignation: f64, dismissal: f64) -> Self {
        Self {
            min_age,
            max_age,
            resignation,
            dismissal,
        }
    }

    pub fn contains(&self, age: u32) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    pub fn probability(&self, cause: DecrementCause) -> f64 {
        match cause {
            DecrementCause::Resignation => self.resignation,
            DecrementCause::Dismissal => self.dismissal,
        }
    }

    /// Combined turnover from both causes
    pub fn total(&self) -> f64 {
        self.resignation + self.dismissal
    }
}

/// Age-banded turnover model
#[derive(Debug, Clone)]
pub struct DecrementModel {
    bands: Vec<DecrementBand>,
}

impl DecrementModel {
    /// Build a model from bands, which are sorted and must not overlap
    pub fn new(mut bands: Vec<DecrementBand>) -> Result<Self, TableError> {
        bands.sort_by_key(|b| b.min_age);

        let mut last_max: Option<u32> = None;
        for band in &bands {
            let overlaps = last_max.is_some_and(|max| band.min_age <= max);
            if band.min_age > band.max_age || overlaps {
                return Err(TableError::InvalidBand {
                    min_age: band.min_age,
                    max_age: band.max_age,
                });
            }
            let probabilities = [("resignation", band.resignation), ("dismissal", band.dismissal)];
            for (field, value) in probabilities {
                if !(0.0..=1.0).contains(&value) {
                    return Err(TableError::ProbabilityOutOfRange {
                        field,
                        age: band.min_age,
                        value,
                    });
                }
            }
            last_max = Some(band.max_age);
        }

        Ok(Self { bands })
    }

    /// Standard five-band turnover assumption covering ages 18-67
    pub fn standard() -> Self {
        Self {
            bands: vec![
                DecrementBand::new(18, 29, 0.15, 0.10),
                DecrementBand::new(30, 39, 0.10, 0.06),
                DecrementBand::new(40, 49, 0.09, 0.04),
                DecrementBand::new(50, 59, 0.05, 0.04),
                DecrementBand::new(60, 67, 0.03, 0.03),
            ],
        }
    }

    /// Model with no turnover at any age
    pub fn none() -> Self {
        Self { bands: Vec::new() }
    }

    fn band_for(&self, age: u32) -> Option<&DecrementBand> {
        self.bands.iter().find(|b| b.contains(age))
    }

    /// Annual probability of exit by `cause` at `age`; zero outside the bands
    pub fn probability(&self, age: u32, cause: DecrementCause) -> f64 {
        self.band_for(age).map_or(0.0, |b| b.probability(cause))
    }

    pub fn resignation(&self, age: u32) -> f64 {
        self.probability(age, DecrementCause::Resignation)
    }

    pub fn dismissal(&self, age: u32) -> f64 {
        self.probability(age, DecrementCause::Dismissal)
    }

    /// Annual probability of exit from either cause
    pub fn total_turnover(&self, age: u32) -> f64 {
        self.band_for(age).map_or(0.0, DecrementBand::total)
    }

    pub fn bands(&self) -> &[DecrementBand] {
        &self.bands
    }
}

impl Default for DecrementModel {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bands() {
        let model = DecrementModel::standard();

        assert_eq!(model.resignation(18), 0.15);
        assert_eq!(model.dismissal(29), 0.10);
        assert_eq!(model.resignation(30), 0.10);
        assert_eq!(model.dismissal(45), 0.04);
        assert_eq!(model.resignation(55), 0.05);
        assert_eq!(model.dismissal(67), 0.03);
    }

    #[test]
    fn test_zero_outside_working_ages() {
        let model = DecrementModel::standard();

        assert_eq!(model.resignation(17), 0.0);
        assert_eq!(model.dismissal(68), 0.0);
        assert_eq!(model.total_turnover(90), 0.0);
    }

    #[test]
    fn test_total_turnover_matches_band_sums() {
        let model = DecrementModel::standard();
        let expected = [(25, 0.25), (35, 0.16), (45, 0.13), (55, 0.09), (65, 0.06)];

        for (age, total) in expected {
            assert!(
                (model.total_turnover(age) - total).abs() < 1e-12,
                "age {}: {} vs {}",
                age,
                model.total_turnover(age),
                total
            );
        }
    }

    #[test]
    fn test_overlapping_bands_rejected() {
        let bands = vec![
            DecrementBand::new(18, 30, 0.1, 0.1),
            DecrementBand::new(30, 40, 0.1, 0.1),
        ];
        assert_eq!(
            DecrementModel::new(bands).unwrap_err(),
            TableError::InvalidBand { min_age: 30, max_age: 40 }
        );
    }

    #[test]
    fn test_unsorted_bands_accepted() {
        let bands = vec![
            DecrementBand::new(40, 49, 0.2, 0.0),
            DecrementBand::new(18, 39, 0.1, 0.0),
        ];
        let model = DecrementModel::new(bands).unwrap();
        assert_eq!(model.resignation(20), 0.1);
        assert_eq!(model.resignation(41), 0.2);
    }
}
