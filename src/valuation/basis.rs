//! Benefit-base strategies for the two valuation variants
//!
//! Both variants share the projection skeleton in the engine and differ only in
//! how the benefit base is formed and what is paid on top at retirement:
//!
//! | | Uncovered | CoverageAdjusted |
//! |---|---|---|
//! | service years | seniority (2 decimals) | seniority rounded to whole years |
//! | covered share | never | stored rate once the coverage start date is reached |
//! | retirement | base x survival | base x survival + plan assets |
//! | full coverage from hire | n/a | obligation is nil |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::employee::Employee;

/// Tag identifying which benefit basis produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationVariant {
    Uncovered,
    CoverageAdjusted,
}

impl ValuationVariant {
    /// Employees with a recorded coverage rate use the coverage-adjusted basis
    pub fn for_employee(employee: &Employee) -> Self {
        if employee.has_coverage() {
            ValuationVariant::CoverageAdjusted
        } else {
            ValuationVariant::Uncovered
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationVariant::Uncovered => "uncovered",
            ValuationVariant::CoverageAdjusted => "coverage_adjusted",
        }
    }
}

/// How the severance benefit base is computed for a projected year
pub trait BenefitBasis {
    fn variant(&self) -> ValuationVariant;

    /// Service years entering the benefit formula
    fn service_years(&self, seniority: f64) -> f64;

    /// Covered share in force at `projected`
    fn coverage_rate(&self, employee: &Employee, projected: NaiveDate) -> f64;

    /// Amount paid on top of the benefit base at retirement
    fn retirement_supplement(&self, employee: &Employee) -> f64;

    /// Employees whose obligation is nil without projecting
    fn is_exempt(&self, _employee: &Employee) -> bool {
        false
    }

    /// last salary x service years x (1 - covered share)
    fn benefit_base(&self, employee: &Employee, seniority: f64, projected: NaiveDate) -> f64 {
        employee.last_salary
            * self.service_years(seniority)
            * (1.0 - self.coverage_rate(employee, projected))
    }
}

/// Whole severance right carried by the employer
#[derive(Debug, Clone, Copy, Default)]
pub struct Uncovered;

impl BenefitBasis for Uncovered {
    fn variant(&self) -> ValuationVariant {
        ValuationVariant::Uncovered
    }

    fn service_years(&self, seniority: f64) -> f64 {
        seniority
    }

    fn coverage_rate(&self, _employee: &Employee, _projected: NaiveDate) -> f64 {
        0.0
    }

    fn retirement_supplement(&self, _employee: &Employee) -> f64 {
        0.0
    }
}

/// Severance right partly covered by external contributions
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageAdjusted;

impl BenefitBasis for CoverageAdjusted {
    fn variant(&self) -> ValuationVariant {
        ValuationVariant::CoverageAdjusted
    }

    fn service_years(&self, seniority: f64) -> f64 {
        seniority.round_ties_even()
    }

    fn coverage_rate(&self, employee: &Employee, projected: NaiveDate) -> f64 {
        match employee.coverage_start_date {
            Some(start) if projected >= start => employee.coverage_fraction(),
            _ => 0.0,
        }
    }

    fn retirement_supplement(&self, employee: &Employee) -> f64 {
        employee.assets_value
    }

    fn is_exempt(&self, employee: &Employee) -> bool {
        employee.is_fully_covered_from_start()
    }
}
