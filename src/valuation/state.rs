//! Per-year projection outcomes and the running state folded over them

use std::ops::ControlFlow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a projection year contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No discount rate for the year's duration
    MissingDiscountRate,
    /// No mortality row for the projected age
    MissingMortality,
    /// Decrements for the year sum to more than 1
    NegativeSurvival,
}

/// How an employee's projection came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionEnd {
    /// Left before or on the valuation date, nothing owed
    LeftBeforeValuation,
    /// Fully covered since hire, nothing owed
    FullyCovered,
    /// Recorded resignation in the projected year
    Resigned,
    /// Recorded dismissal in the projected year
    Dismissed,
    /// Recorded departure for another reason, or without a reason
    OtherExit,
    /// Reached retirement age in service
    Retirement,
    /// Ran through every year without a terminal event
    HorizonReached,
}

/// Outcome of a single projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum YearOutcome {
    /// Probability-weighted contribution; projection continues with the new survival
    Accrued { contribution: f64, survival: f64 },
    /// Final amount; projection stops
    Terminal { contribution: f64, end: ProjectionEnd },
    /// Nothing contributed, survival carried forward unchanged
    Skipped(SkipReason),
}

impl YearOutcome {
    pub fn contribution(&self) -> f64 {
        match *self {
            YearOutcome::Accrued { contribution, .. }
            | YearOutcome::Terminal { contribution, .. } => contribution,
            YearOutcome::Skipped(_) => 0.0,
        }
    }
}

/// Inputs describing one projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    /// Years after the valuation date (1-indexed)
    pub year: u32,
    pub age: u32,
    pub projected_date: NaiveDate,
    /// Salary growth multiplier in force
    pub growth: f64,
    /// Exact-duration discount rate, when the curve has one
    pub discount_rate: Option<f64>,
    /// Survival probability at the start of the year
    pub survival: f64,
}

/// A projected year together with what it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub point: YearPoint,
    pub outcome: YearOutcome,
}

/// Running totals while folding over the projection years
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Probability of still being employed at the start of the next year
    pub survival: f64,

    /// Sum of contributions so far
    pub total: f64,

    pub records: Vec<YearRecord>,

    /// Set once a terminal year is reached
    pub end: Option<ProjectionEnd>,
}

impl ProjectionState {
    pub fn start(horizon: u32) -> Self {
        Self {
            survival: 1.0,
            total: 0.0,
            records: Vec::with_capacity(horizon as usize),
            end: None,
        }
    }

    /// Absorb a year's record, breaking out of the fold on a terminal outcome
    pub fn absorb(mut self, record: YearRecord) -> ControlFlow<Self, Self> {
        let outcome = record.outcome;
        self.records.push(record);
        match outcome {
            YearOutcome::Accrued { contribution, survival } => {
                self.total += contribution;
                self.survival = survival;
                ControlFlow::Continue(self)
            }
            YearOutcome::Terminal { contribution, end } => {
                self.total += contribution;
                self.end = Some(end);
                ControlFlow::Break(self)
            }
            YearOutcome::Skipped(_) => ControlFlow::Continue(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u32, outcome: YearOutcome) -> YearRecord {
        YearRecord {
            point: YearPoint {
                year,
                age: 60 + year,
                projected_date: NaiveDate::from_ymd_opt(2024 + year as i32, 12, 31).unwrap(),
                growth: 1.0,
                discount_rate: Some(0.03),
                survival: 1.0,
            },
            outcome,
        }
    }

    #[test]
    fn test_accrued_updates_survival() {
        let state = ProjectionState::start(3);
        let flow = state.absorb(record(
            1,
            YearOutcome::Accrued {
                contribution: 120.0,
                survival: 0.9,
            },
        ));

        let ControlFlow::Continue(state) = flow else {
            panic!("accrued year should continue");
        };
        assert_eq!(state.total, 120.0);
        assert_eq!(state.survival, 0.9);
        assert_eq!(state.records.len(), 1);
    }

    #[test]
    fn test_skipped_keeps_survival() {
        let mut state = ProjectionState::start(3);
        state.survival = 0.8;
        let ControlFlow::Continue(state) =
            state.absorb(record(2, YearOutcome::Skipped(SkipReason::NegativeSurvival)))
        else {
            panic!("skipped year should continue");
        };
        assert_eq!(state.survival, 0.8);
        assert_eq!(state.total, 0.0);
    }

    #[test]
    fn test_terminal_breaks() {
        let state = ProjectionState::start(3);
        let flow = state.absorb(record(
            3,
            YearOutcome::Terminal {
                contribution: 500.0,
                end: ProjectionEnd::Retirement,
            },
        ));

        let ControlFlow::Break(state) = flow else {
            panic!("terminal year should stop the fold");
        };
        assert_eq!(state.end, Some(ProjectionEnd::Retirement));
        assert_eq!(state.total, 500.0);
    }
}
