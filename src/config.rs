//! Valuation run configuration

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Salary increases are granted once every this many years
pub const GROWTH_STEP_YEARS: i32 = 2;

/// Rule for the salary growth rate applied to an employee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SalaryGrowthRule {
    /// Rate chosen by the parity of the employee id
    ParityOfId { even_rate: f64, odd_rate: f64 },
    /// Same rate for everyone
    Flat(f64),
}

impl SalaryGrowthRule {
    pub fn rate_for(&self, employee_id: u32) -> f64 {
        match *self {
            SalaryGrowthRule::ParityOfId { even_rate, odd_rate } => {
                if employee_id % 2 == 0 {
                    even_rate
                } else {
                    odd_rate
                }
            }
            SalaryGrowthRule::Flat(rate) => rate,
        }
    }
}

impl Default for SalaryGrowthRule {
    fn default() -> Self {
        SalaryGrowthRule::ParityOfId {
            even_rate: 0.04,
            odd_rate: 0.02,
        }
    }
}

/// Configuration for a valuation and roll-forward run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Valuation date, also the end of the reporting period
    pub valuation_date: NaiveDate,

    /// First day of the reporting period
    pub period_start: NaiveDate,

    /// First date from which salary increases apply
    pub growth_anchor: NaiveDate,

    pub salary_growth: SalaryGrowthRule,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            valuation_date: ymd(2024, 12, 31),
            period_start: ymd(2024, 1, 1),
            growth_anchor: ymd(2025, 6, 30),
            salary_growth: SalaryGrowthRule::default(),
        }
    }
}

impl ValuationConfig {
    /// Read a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Salary growth multiplier for an employee at a projected date
    ///
    /// Increases compound once every [`GROWTH_STEP_YEARS`], the first one on the
    /// anchor date. Before the anchor the multiplier is 1.
    pub fn growth_multiplier(&self, employee_id: u32, projected: NaiveDate) -> f64 {
        if projected < self.growth_anchor {
            return 1.0;
        }
        let increases =
            (projected.year() - self.growth_anchor.year()).div_euclid(GROWTH_STEP_YEARS) + 1;
        (1.0 + self.salary_growth.rate_for(employee_id)).powi(increases)
    }
}

/// Only called with constant calendar dates
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_growth_rate_by_parity() {
        let rule = SalaryGrowthRule::default();
        assert_eq!(rule.rate_for(4), 0.04);
        assert_eq!(rule.rate_for(7), 0.02);
        assert_eq!(SalaryGrowthRule::Flat(0.0).rate_for(4), 0.0);
    }

    #[test]
    fn test_growth_compounds_every_two_years() {
        let config = ValuationConfig::default();

        assert_eq!(config.growth_multiplier(2, date(2025, 6, 29)), 1.0);
        assert!((config.growth_multiplier(2, date(2025, 12, 31)) - 1.04).abs() < 1e-12);
        assert!((config.growth_multiplier(2, date(2026, 12, 31)) - 1.04).abs() < 1e-12);
        assert!((config.growth_multiplier(2, date(2027, 12, 31)) - 1.0816).abs() < 1e-12);
        assert!((config.growth_multiplier(3, date(2029, 12, 31)) - 1.02_f64.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn test_default_dates() {
        let config = ValuationConfig::default();

        assert_eq!(config.valuation_date, date(2024, 12, 31));
        assert_eq!(config.period_start, date(2024, 1, 1));
        assert_eq!(config.growth_anchor, date(2025, 6, 30));
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{ "valuation_date": "2025-12-31", "salary_growth": { "Flat": 0.03 } }"#;
        let config: ValuationConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.valuation_date, date(2025, 12, 31));
        assert_eq!(config.period_start, date(2024, 1, 1));
        assert_eq!(config.salary_growth, SalaryGrowthRule::Flat(0.03));
    }
}
