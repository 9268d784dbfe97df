//! Batch runner for whole employee books
//!
//! Holds the engines built from one set of assumptions and fans employees out
//! across threads. Employees are independent, so results come back in book
//! (employee id) order regardless of scheduling.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::Assumptions;
use crate::config::ValuationConfig;
use crate::employee::{Employee, EmployeeBook};
use crate::rollforward::{MovementSchedule, OpeningBalance, OpeningBalances, RollForwardEngine};
use crate::valuation::{ValuationEngine, ValuationResult};

/// Totals over a batch of valuations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValuationSummary {
    pub employees: usize,
    pub total_present_value: f64,
    /// Employees with a present value of exactly zero
    pub nil_values: usize,
    pub skipped_years: usize,
}

impl ValuationSummary {
    pub fn from_results(results: &[ValuationResult]) -> Self {
        Self {
            employees: results.len(),
            total_present_value: results.iter().map(|r| r.present_value).sum(),
            nil_values: results.iter().filter(|r| r.present_value == 0.0).count(),
            skipped_years: results.iter().map(|r| r.skipped_years().count()).sum(),
        }
    }
}

/// Pre-built engines for valuing and rolling forward a book
#[derive(Debug, Clone)]
pub struct ValuationRunner {
    valuation: ValuationEngine,
    roll_forward: RollForwardEngine,
}

impl ValuationRunner {
    pub fn new(assumptions: Assumptions, config: ValuationConfig) -> Self {
        Self {
            roll_forward: RollForwardEngine::new(assumptions.clone(), config.clone()),
            valuation: ValuationEngine::new(assumptions, config),
        }
    }

    pub fn valuation_engine(&self) -> &ValuationEngine {
        &self.valuation
    }

    pub fn roll_forward_engine(&self) -> &RollForwardEngine {
        &self.roll_forward
    }

    /// Value every employee in the book
    pub fn value_all(&self, book: &EmployeeBook) -> Vec<ValuationResult> {
        let employees: Vec<&Employee> = book.iter().collect();
        let results: Vec<ValuationResult> = employees
            .par_iter()
            .map(|employee| self.valuation.value(employee))
            .collect();

        let summary = ValuationSummary::from_results(&results);
        log::info!(
            "valued {} employees: total PV {:.0}, {} nil, {} skipped years",
            summary.employees,
            summary.total_present_value,
            summary.nil_values,
            summary.skipped_years
        );
        results
    }

    /// Roll every employee in the book forward over the period
    ///
    /// The closing obligation is taken from `closing_overrides` when it names
    /// the employee, otherwise from the valuation engine. Employees without an
    /// opening balance start from zero.
    pub fn roll_forward_all(
        &self,
        book: &EmployeeBook,
        openings: &OpeningBalances,
        closing_overrides: &BTreeMap<u32, f64>,
    ) -> Vec<MovementSchedule> {
        let employees: Vec<&Employee> = book.iter().collect();
        let schedules: Vec<MovementSchedule> = employees
            .par_iter()
            .map(|employee| self.roll_forward_one(employee, openings, closing_overrides))
            .collect();

        log::info!("rolled forward {} employees", schedules.len());
        schedules
    }

    fn roll_forward_one(
        &self,
        employee: &Employee,
        openings: &OpeningBalances,
        closing_overrides: &BTreeMap<u32, f64>,
    ) -> MovementSchedule {
        let id = employee.employee_id;
        let opening = match openings.get(id) {
            Some(opening) => *opening,
            None => {
                log::warn!("employee {}: no opening balance, starting from zero", id);
                OpeningBalance::zero(id)
            }
        };
        let pv_close = match closing_overrides.get(&id) {
            Some(&pv) => pv,
            None => self.valuation.value(employee).present_value,
        };
        self.roll_forward.roll_forward(employee, &opening, pv_close)
    }
}
