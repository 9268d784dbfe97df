//! Valuation output structures

use serde::{Deserialize, Serialize};

use super::basis::ValuationVariant;
use super::state::{ProjectionEnd, SkipReason, YearOutcome, YearRecord};

/// Present value of one employee's severance obligation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    pub employee_id: u32,

    pub variant: ValuationVariant,

    /// Sum of contributions rounded to a whole currency unit
    pub present_value: f64,

    /// Sum of contributions before rounding
    pub unrounded_value: f64,

    pub end: ProjectionEnd,

    /// Every projected year, skipped ones included
    pub years: Vec<YearRecord>,
}

impl ValuationResult {
    /// Result for an employee valued without projecting
    pub fn nil(employee_id: u32, variant: ValuationVariant, end: ProjectionEnd) -> Self {
        Self {
            employee_id,
            variant,
            present_value: 0.0,
            unrounded_value: 0.0,
            end,
            years: Vec::new(),
        }
    }

    /// Contribution of a given projection year, if that year was reached
    pub fn contribution(&self, year: u32) -> Option<f64> {
        self.years
            .iter()
            .find(|r| r.point.year == year)
            .map(|r| r.outcome.contribution())
    }

    pub fn skipped_years(&self) -> impl Iterator<Item = (u32, SkipReason)> + '_ {
        self.years.iter().filter_map(|r| match r.outcome {
            YearOutcome::Skipped(reason) => Some((r.point.year, reason)),
            _ => None,
        })
    }

    /// Flat row for CSV output
    pub fn record(&self) -> ValuationRecord {
        ValuationRecord {
            employee_id: self.employee_id,
            variant: self.variant.as_str(),
            present_value: self.present_value,
            end: self.end,
            years_projected: self.years.len() as u32,
            years_skipped: self.skipped_years().count() as u32,
        }
    }
}

/// One output row per employee
#[derive(Debug, Clone, Serialize)]
pub struct ValuationRecord {
    pub employee_id: u32,
    pub variant: &'static str,
    pub present_value: f64,
    pub end: ProjectionEnd,
    pub years_projected: u32,
    pub years_skipped: u32,
}
