//! IAS19 roll-forward from opening to closing balances
//!
//! The closing obligation comes from the valuation engine (or an override).
//! Service cost, interest cost and expected return are estimated here; the
//! gains and losses are whatever is needed to close both identities:
//!
//! ```text
//! PV_close     = PV_open + SC + IC - benefits_paid + liability_gain_loss
//! assets_close = assets_open + ER + deposits - withdrawals + asset_gain_loss
//! ```

use crate::assumptions::{Assumptions, RateLookup};
use crate::config::ValuationConfig;
use crate::employee::{Employee, DAYS_PER_YEAR};
use super::balances::OpeningBalance;
use super::schedule::MovementSchedule;

/// Roll-forward engine for a single reporting period
#[derive(Debug, Clone)]
pub struct RollForwardEngine {
    assumptions: Assumptions,
    config: ValuationConfig,
}

impl RollForwardEngine {
    pub fn new(assumptions: Assumptions, config: ValuationConfig) -> Self {
        Self { assumptions, config }
    }

    /// Build the movement schedule for one employee
    pub fn roll_forward(
        &self,
        employee: &Employee,
        opening: &OpeningBalance,
        pv_close: f64,
    ) -> MovementSchedule {
        let fraction_worked = self.fraction_worked(employee);
        let actuarial_factor = self.actuarial_factor(employee, pv_close);
        let service_cost = self.service_cost(employee, fraction_worked, actuarial_factor);

        let expected_service_years = self.expected_service_years(employee);
        let discount_rate = self.discount_rate(employee.employee_id, expected_service_years);

        let benefits_paid = employee.benefits_paid();
        let interest_cost =
            opening.pv_open * discount_rate + (service_cost - benefits_paid) * discount_rate / 2.0;
        let liability_gain_loss =
            pv_close - opening.pv_open - service_cost - interest_cost + benefits_paid;

        let net_contributions = employee.deposits - employee.withdrawals;
        let expected_return =
            opening.assets_open * discount_rate + net_contributions * discount_rate / 2.0;
        let assets_close = employee.assets_value;
        let asset_gain_loss = assets_close
            - opening.assets_open
            - expected_return
            - employee.deposits
            + employee.withdrawals;

        MovementSchedule {
            employee_id: employee.employee_id,
            pv_open: opening.pv_open,
            service_cost,
            interest_cost,
            benefits_paid,
            liability_gain_loss,
            pv_close,
            actuarial_factor,
            assets_open: opening.assets_open,
            expected_return,
            deposits: employee.deposits,
            withdrawals: employee.withdrawals,
            asset_gain_loss,
            assets_close,
            fraction_worked,
            expected_service_years,
            discount_rate,
        }
    }

    /// Share of the period the employee actually worked, in years
    pub fn fraction_worked(&self, employee: &Employee) -> f64 {
        let period_start = self.config.period_start;
        let period_end = self.config.valuation_date;

        if employee.leave_date.is_some_and(|leave| leave < period_start) {
            return 0.0;
        }

        let end = employee.leave_date.map_or(period_end, |leave| leave.min(period_end));
        let start = period_start.max(employee.start_work_date);
        let days = (end - start).num_days() as f64;
        (days / DAYS_PER_YEAR).max(0.0)
    }

    /// Closing PV divided by the undecremented benefit at period end
    ///
    /// Employees who left within the period have a realized value and get a
    /// factor of exactly 1.
    pub fn actuarial_factor(&self, employee: &Employee, pv_close: f64) -> Option<f64> {
        let period_end = self.config.valuation_date;
        if employee.has_left_by(period_end) {
            return Some(1.0);
        }

        let benefit = employee.last_salary
            * employee.seniority(period_end)
            * (1.0 - employee.coverage_fraction());
        if benefit == 0.0 {
            None
        } else {
            Some(pv_close / benefit)
        }
    }

    fn service_cost(&self, employee: &Employee, fraction_worked: f64, factor: Option<f64>) -> f64 {
        if employee.is_fully_covered() {
            return 0.0;
        }
        match factor {
            Some(factor) => {
                let uncovered = 1.0 - employee.coverage_fraction();
                employee.last_salary * fraction_worked * uncovered * factor
            }
            None => {
                log::warn!(
                    "employee {}: actuarial factor undefined, service cost set to 0",
                    employee.employee_id
                );
                0.0
            }
        }
    }

    /// Survivorship-weighted years until retirement
    ///
    /// Each future year counts for the probability of still being in service,
    /// after turnover and mortality, at the end of that year.
    pub fn expected_service_years(&self, employee: &Employee) -> f64 {
        let exact_age = employee.exact_age(self.config.valuation_date);
        let years_left = (f64::from(employee.retirement_age()) - exact_age).trunc();
        if years_left < 1.0 {
            return 0.0;
        }

        let mortality = self.assumptions.mortality(employee.gender);
        let start_age = exact_age.floor().max(0.0) as u32;
        (1..=years_left as u32)
            .scan(1.0, |survival, t| {
                let age = start_age + t;
                let q_death = mortality.death_probability(age).unwrap_or(0.0);
                *survival *= 1.0 - self.assumptions.decrements.total_turnover(age) - q_death;
                Some(*survival)
            })
            .sum()
    }

    /// Curve rate at the rounded expected service years, nearest duration below
    pub fn discount_rate(&self, employee_id: u32, expected_service_years: f64) -> f64 {
        let duration = expected_service_years.round_ties_even();
        match self.assumptions.discount.rate(duration, RateLookup::NearestBelow) {
            Some(rate) => rate,
            None => {
                log::warn!(
                    "employee {}: no discount rate for duration {}, using 0",
                    employee_id,
                    duration
                );
                0.0
            }
        }
    }
}
