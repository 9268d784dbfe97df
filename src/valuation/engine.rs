//! Severance present-value engine
//!
//! Each employee is projected year by year from the valuation date to
//! retirement age. A year either accrues a probability-weighted, discounted
//! contribution, ends the projection with a terminal payment (recorded
//! departure or retirement), or is skipped when an input lookup fails.

use std::ops::ControlFlow;

use chrono::{Datelike, Months, NaiveDate};

use crate::assumptions::{Assumptions, DiscountCurve, RateLookup};
use crate::config::ValuationConfig;
use crate::employee::{Employee, LeaveReason};
use super::basis::{BenefitBasis, CoverageAdjusted, Uncovered, ValuationVariant};
use super::result::ValuationResult;
use super::state::{ProjectionEnd, ProjectionState, SkipReason, YearOutcome, YearPoint, YearRecord};

/// Per-employee quantities fixed for the whole projection
struct EmployeeContext<'a, B: BenefitBasis> {
    employee: &'a Employee,
    basis: &'a B,
    age: u32,
    seniority: f64,
    horizon: u32,
}

/// Main valuation engine
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    assumptions: Assumptions,
    config: ValuationConfig,
}

impl ValuationEngine {
    pub fn new(assumptions: Assumptions, config: ValuationConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Value an employee with the basis their coverage data calls for
    pub fn value(&self, employee: &Employee) -> ValuationResult {
        match ValuationVariant::for_employee(employee) {
            ValuationVariant::Uncovered => self.value_with(employee, &Uncovered),
            ValuationVariant::CoverageAdjusted => self.value_with(employee, &CoverageAdjusted),
        }
    }

    /// Value an employee with an explicit benefit basis
    pub fn value_with<B: BenefitBasis>(&self, employee: &Employee, basis: &B) -> ValuationResult {
        let valuation_date = self.config.valuation_date;

        if employee.has_left_by(valuation_date) {
            return ValuationResult::nil(
                employee.employee_id,
                basis.variant(),
                ProjectionEnd::LeftBeforeValuation,
            );
        }
        if basis.is_exempt(employee) {
            return ValuationResult::nil(
                employee.employee_id,
                basis.variant(),
                ProjectionEnd::FullyCovered,
            );
        }

        let age = employee.age_in_whole_years(valuation_date);
        let horizon = (employee.retirement_age() - age).max(0) as u32;
        let ctx = EmployeeContext {
            employee,
            basis,
            age: u32::try_from(age).unwrap_or(0),
            seniority: round_to_cents(employee.seniority(valuation_date)),
            horizon,
        };

        let flow = (1..=horizon).try_fold(ProjectionState::start(horizon), |state, year| {
            let record = self.project_year(&ctx, year, state.survival);
            if let YearOutcome::Skipped(reason) = record.outcome {
                log::debug!(
                    "employee {} year {}: skipped ({:?})",
                    employee.employee_id,
                    year,
                    reason
                );
            }
            state.absorb(record)
        });
        let state = match flow {
            ControlFlow::Continue(state) | ControlFlow::Break(state) => state,
        };

        ValuationResult {
            employee_id: employee.employee_id,
            variant: basis.variant(),
            present_value: state.total.round_ties_even(),
            unrounded_value: state.total,
            end: state.end.unwrap_or(ProjectionEnd::HorizonReached),
            years: state.records,
        }
    }

    fn project_year<B: BenefitBasis>(
        &self,
        ctx: &EmployeeContext<'_, B>,
        year: u32,
        survival: f64,
    ) -> YearRecord {
        let projected_date = projected_date(self.config.valuation_date, year);
        let point = YearPoint {
            year,
            age: ctx.age + year,
            projected_date,
            growth: self
                .config
                .growth_multiplier(ctx.employee.employee_id, projected_date),
            discount_rate: self.assumptions.discount.rate(year as f64, RateLookup::Exact),
            survival,
        };
        YearRecord {
            outcome: self.year_outcome(ctx, &point),
            point,
        }
    }

    fn year_outcome<B: BenefitBasis>(
        &self,
        ctx: &EmployeeContext<'_, B>,
        point: &YearPoint,
    ) -> YearOutcome {
        let employee = ctx.employee;

        let Some(rate) = point.discount_rate else {
            return YearOutcome::Skipped(SkipReason::MissingDiscountRate);
        };
        let Some(q_death) = self
            .assumptions
            .mortality(employee.gender)
            .death_probability(point.age)
        else {
            return YearOutcome::Skipped(SkipReason::MissingMortality);
        };

        let base = ctx.basis.benefit_base(employee, ctx.seniority, point.projected_date);
        let assets = employee.assets_value;

        // Recorded departure falling in this projected year
        let leave_year = employee.leave_date.map(|d| d.year());
        if leave_year == Some(point.projected_date.year()) {
            let (contribution, end) = match employee.leave_reason {
                Some(LeaveReason::Resigned) => (assets * point.growth, ProjectionEnd::Resigned),
                Some(LeaveReason::Dismissed) => {
                    (base + assets * point.growth, ProjectionEnd::Dismissed)
                }
                _ => (0.0, ProjectionEnd::OtherExit),
            };
            return YearOutcome::Terminal { contribution, end };
        }

        if point.year == ctx.horizon && employee.leave_reason.is_none() {
            return YearOutcome::Terminal {
                contribution: base * point.survival + ctx.basis.retirement_supplement(employee),
                end: ProjectionEnd::Retirement,
            };
        }

        let q_resign = self.assumptions.decrements.resignation(point.age);
        let q_dismiss = self.assumptions.decrements.dismissal(point.age);
        let next_survival = point.survival * (1.0 - q_dismiss - q_resign - q_death);
        if next_survival < 0.0 {
            return YearOutcome::Skipped(SkipReason::NegativeSurvival);
        }

        let grown_base = base * point.growth;
        let expected =
            grown_base * q_dismiss + grown_base * q_death + assets * point.growth * q_resign;
        let discount = DiscountCurve::mid_year_factor(rate, point.year);
        YearOutcome::Accrued {
            contribution: expected * point.survival / discount,
            survival: next_survival,
        }
    }
}

/// Anniversary of the valuation date `year` years later
fn projected_date(valuation_date: NaiveDate, year: u32) -> NaiveDate {
    valuation_date
        .checked_add_months(Months::new(12 * year))
        .unwrap_or(NaiveDate::MAX)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
