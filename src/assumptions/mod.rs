//! Actuarial reference tables: mortality, turnover and discounting

mod decrement;
mod discount;
pub mod loader;
mod mortality;

pub use decrement::{DecrementBand, DecrementCause, DecrementModel};
pub use discount::{DiscountCurve, RateLookup};
pub use mortality::{MortalityRates, MortalityTable};

use std::path::Path;

use crate::employee::Gender;
use crate::error::LoadError;

/// Container for all valuation assumptions
///
/// Loaded once and shared read-only across every employee valuation.
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub male_mortality: MortalityTable,
    pub female_mortality: MortalityTable,
    pub decrements: DecrementModel,
    pub discount: DiscountCurve,
}

impl Assumptions {
    /// Assumptions with the standard turnover bands and reference discount curve
    pub fn with_standard_tables(
        male_mortality: MortalityTable,
        female_mortality: MortalityTable,
    ) -> Self {
        Self {
            male_mortality,
            female_mortality,
            decrements: DecrementModel::standard(),
            discount: DiscountCurve::standard(),
        }
    }

    /// Load assumptions from CSV files
    ///
    /// Turnover bands and the discount curve fall back to the standard tables
    /// when no file is given.
    pub fn from_csv_paths(
        male_mortality: &Path,
        female_mortality: &Path,
        decrements: Option<&Path>,
        discount: Option<&Path>,
    ) -> Result<Self, LoadError> {
        let decrements = match decrements {
            Some(path) => loader::load_decrement_model(path)?,
            None => DecrementModel::standard(),
        };
        let discount = match discount {
            Some(path) => loader::load_discount_curve(path)?,
            None => DiscountCurve::standard(),
        };

        Ok(Self {
            male_mortality: loader::load_mortality_table(male_mortality)?,
            female_mortality: loader::load_mortality_table(female_mortality)?,
            decrements,
            discount,
        })
    }

    /// Life table for the given gender
    pub fn mortality(&self, gender: Gender) -> &MortalityTable {
        match gender {
            Gender::Male => &self.male_mortality,
            Gender::Female => &self.female_mortality,
        }
    }
}
