//! Duration-indexed discount curve
//!
//! Two lookup policies are offered because the two consumers use different ones:
//! - the valuation engine needs the rate for an exact whole duration and skips the
//!   projection year when the curve has none;
//! - the roll-forward engine picks the nearest duration at or below the expected
//!   service period, falling back to the shortest duration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// How a duration is matched against the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateLookup {
    /// Whole duration present on the curve, otherwise no rate
    Exact,
    /// Exact match, else the largest duration below, else the shortest duration
    NearestBelow,
}

/// Annual spot rates by duration in years
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCurve {
    rates: BTreeMap<u32, f64>,
}

impl DiscountCurve {
    /// Build a curve from (duration, rate) pairs; durations start at 1
    pub fn new(points: impl IntoIterator<Item = (u32, f64)>) -> Result<Self, TableError> {
        let mut rates = BTreeMap::new();
        for (duration, rate) in points {
            if duration < 1 {
                return Err(TableError::InvalidDuration(duration));
            }
            if rates.insert(duration, rate).is_some() {
                return Err(TableError::DuplicateDuration(duration));
            }
        }
        if rates.is_empty() {
            return Err(TableError::EmptyDiscountCurve);
        }
        Ok(Self { rates })
    }

    /// Same rate for durations `1..=max_duration`
    pub fn flat(rate: f64, max_duration: u32) -> Self {
        Self {
            rates: (1..=max_duration.max(1)).map(|d| (d, rate)).collect(),
        }
    }

    /// Reference spot curve for durations 1-47
    pub fn standard() -> Self {
        const RATES: [f64; 47] = [
            0.0181, 0.0199, 0.0211, 0.0221, 0.0230, 0.0239, 0.0246, 0.0253, 0.0260, 0.0267,
            0.0274, 0.0280, 0.0286, 0.0292, 0.0299, 0.0305, 0.0311, 0.0317, 0.0323, 0.0329,
            0.0335, 0.0341, 0.0348, 0.0354, 0.0360, 0.0366, 0.0372, 0.0378, 0.0384, 0.0391,
            0.0397, 0.0403, 0.0409, 0.0415, 0.0421, 0.0427, 0.0434, 0.0440, 0.0446, 0.0452,
            0.0458, 0.0464, 0.0470, 0.0476, 0.0483, 0.0489, 0.0495,
        ];
        Self {
            rates: RATES
                .iter()
                .enumerate()
                .map(|(i, &rate)| (i as u32 + 1, rate))
                .collect(),
        }
    }

    /// Rate for `duration` under the given lookup policy
    pub fn rate(&self, duration: f64, lookup: RateLookup) -> Option<f64> {
        match lookup {
            RateLookup::Exact => self.exact_rate(duration),
            RateLookup::NearestBelow => self.exact_rate(duration).or_else(|| {
                self.rates
                    .iter()
                    .rev()
                    .find(|(&d, _)| d as f64 <= duration)
                    .or_else(|| self.rates.iter().next())
                    .map(|(_, &rate)| rate)
            }),
        }
    }

    fn exact_rate(&self, duration: f64) -> Option<f64> {
        if duration < 1.0 || duration.fract() != 0.0 || duration > u32::MAX as f64 {
            return None;
        }
        self.rates.get(&(duration as u32)).copied()
    }

    /// Mid-year discount factor for projection year `year` (1-based): (1 + r)^(year - 0.5)
    pub fn mid_year_factor(rate: f64, year: u32) -> f64 {
        (1.0 + rate).powf(year as f64 - 0.5)
    }

    /// Longest duration on the curve
    pub fn max_duration(&self) -> u32 {
        self.rates.keys().next_back().copied().unwrap_or(0)
    }

    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.rates.iter().map(|(&d, &r)| (d, r))
    }
}

impl Default for DiscountCurve {
    fn default() -> Self {
        Self::standard()
    }
}
