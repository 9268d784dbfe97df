//! Severance Valuation - present value of employee severance obligations
//!
//! This library provides:
//! - Reference tables (mortality, age-banded turnover, discount curve)
//! - Per-employee severance valuation with uncovered and coverage-adjusted bases
//! - IAS19 roll-forward of obligations and plan assets over a reporting period
//! - Parallel batch runs over an employee book

pub mod assumptions;
pub mod config;
pub mod employee;
pub mod error;
pub mod rollforward;
pub mod runner;
pub mod valuation;

// Re-export commonly used types
pub use assumptions::{Assumptions, DecrementModel, DiscountCurve, MortalityTable, RateLookup};
pub use config::{SalaryGrowthRule, ValuationConfig};
pub use employee::{Employee, EmployeeBook, Gender, LeaveReason};
pub use error::{LoadError, TableError};
pub use rollforward::{MovementSchedule, OpeningBalance, OpeningBalances, RollForwardEngine};
pub use runner::{ValuationRunner, ValuationSummary};
pub use valuation::{ValuationEngine, ValuationResult, ValuationVariant};
