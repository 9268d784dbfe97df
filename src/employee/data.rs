//! Employee records as supplied by the payroll extract

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Days per year used for seniority and exact-age calculations
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Gender of the employee, which drives the mortality table and retirement age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Statutory retirement age
    pub fn retirement_age(&self) -> i32 {
        match self {
            Gender::Male => 67,
            Gender::Female => 64,
        }
    }

    /// Parse the single-letter code used in the employee file
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Recorded reason for an actual exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveReason {
    Resigned,
    Dismissed,
    /// Any other recorded exit (retirement, death, transfer...)
    Other,
}

impl LeaveReason {
    /// Parse the free-text reason column. Blank means no recorded reason.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "" => None,
            "resigned" | "resignation" => Some(LeaveReason::Resigned),
            "dismissed" | "dismissal" => Some(LeaveReason::Dismissed),
            _ => Some(LeaveReason::Other),
        }
    }
}

/// A single employee record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier
    pub employee_id: u32,

    pub gender: Gender,

    pub birth_date: NaiveDate,

    pub start_work_date: NaiveDate,

    /// Last monthly salary
    pub last_salary: f64,

    /// Date from which contributions cover part of the severance right
    pub coverage_start_date: Option<NaiveDate>,

    /// Covered share in percent (0-100)
    pub coverage_rate: Option<f64>,

    /// Fair value of the plan assets held for this employee at period end
    pub assets_value: f64,

    pub leave_date: Option<NaiveDate>,

    pub leave_reason: Option<LeaveReason>,

    /// Contributions paid into plan assets during the period
    pub deposits: f64,

    /// Benefits paid out of plan assets during the period
    pub withdrawals: f64,

    /// Benefits paid directly by the employer (cheque top-ups)
    pub benefits_paid_directly: f64,
}

impl Employee {
    /// Create an active, uncovered employee with no assets or cash flows
    pub fn new(
        employee_id: u32,
        gender: Gender,
        birth_date: NaiveDate,
        start_work_date: NaiveDate,
        last_salary: f64,
    ) -> Self {
        Self {
            employee_id,
            gender,
            birth_date,
            start_work_date,
            last_salary,
            coverage_start_date: None,
            coverage_rate: None,
            assets_value: 0.0,
            leave_date: None,
            leave_reason: None,
            deposits: 0.0,
            withdrawals: 0.0,
            benefits_paid_directly: 0.0,
        }
    }

    pub fn with_coverage(mut self, rate_pct: f64, start: NaiveDate) -> Self {
        self.coverage_rate = Some(rate_pct);
        self.coverage_start_date = Some(start);
        self
    }

    pub fn with_assets(mut self, assets_value: f64) -> Self {
        self.assets_value = assets_value;
        self
    }

    pub fn with_leave(mut self, leave_date: NaiveDate, reason: Option<LeaveReason>) -> Self {
        self.leave_date = Some(leave_date);
        self.leave_reason = reason;
        self
    }

    pub fn with_cash_flows(mut self, deposits: f64, withdrawals: f64, paid_directly: f64) -> Self {
        self.deposits = deposits;
        self.withdrawals = withdrawals;
        self.benefits_paid_directly = paid_directly;
        self
    }

    pub fn retirement_age(&self) -> i32 {
        self.gender.retirement_age()
    }

    /// Completed age in whole years, counting 365-day years
    pub fn age_in_whole_years(&self, at: NaiveDate) -> i32 {
        (at - self.birth_date).num_days().div_euclid(365) as i32
    }

    /// Fractional age in 365.25-day years
    pub fn exact_age(&self, at: NaiveDate) -> f64 {
        (at - self.birth_date).num_days() as f64 / DAYS_PER_YEAR
    }

    /// Fractional years of service
    pub fn seniority(&self, at: NaiveDate) -> f64 {
        (at - self.start_work_date).num_days() as f64 / DAYS_PER_YEAR
    }

    /// Covered share as a fraction; absent rate means uncovered
    pub fn coverage_fraction(&self) -> f64 {
        self.coverage_rate.unwrap_or(0.0) / 100.0
    }

    pub fn has_coverage(&self) -> bool {
        self.coverage_rate.is_some_and(|rate| rate > 0.0)
    }

    pub fn is_fully_covered(&self) -> bool {
        self.coverage_rate == Some(100.0)
    }

    /// Fully covered since the first day of employment
    pub fn is_fully_covered_from_start(&self) -> bool {
        self.is_fully_covered() && self.coverage_start_date == Some(self.start_work_date)
    }

    /// Whether an actual exit has happened on or before `date`
    pub fn has_left_by(&self, date: NaiveDate) -> bool {
        self.leave_date.is_some_and(|leave| leave <= date)
    }

    /// Total benefits paid in the period, from assets and directly
    pub fn benefits_paid(&self) -> f64 {
        self.withdrawals + self.benefits_paid_directly
    }
}

/// Employees indexed by id
#[derive(Debug, Clone, Default)]
pub struct EmployeeBook {
    employees: BTreeMap<u32, Employee>,
}

impl EmployeeBook {
    /// Build the book, rejecting duplicate ids
    pub fn from_records(records: Vec<Employee>) -> Result<Self, LoadError> {
        let mut employees = BTreeMap::new();
        for employee in records {
            let id = employee.employee_id;
            if employees.insert(id, employee).is_some() {
                return Err(LoadError::DuplicateEmployee(id));
            }
        }
        Ok(Self { employees })
    }

    pub fn get(&self, employee_id: u32) -> Option<&Employee> {
        self.employees.get(&employee_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_and_seniority() {
        let employee =
            Employee::new(1, Gender::Male, date(1964, 12, 31), date(2004, 12, 31), 10_000.0);
        let valuation = date(2024, 12, 31);

        // 21915 days is exactly 60 years of 365.25 days
        assert_eq!(employee.age_in_whole_years(valuation), 60);
        assert!((employee.exact_age(valuation) - 60.0).abs() < 1e-12);
        assert!((employee.seniority(valuation) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_age_is_fractional_mid_year() {
        let employee =
            Employee::new(2, Gender::Female, date(1964, 6, 30), date(2004, 12, 31), 10_000.0);
        let valuation = date(2024, 12, 31);

        assert_eq!(employee.age_in_whole_years(valuation), 60);
        assert!((employee.exact_age(valuation) - 22_099.0 / 365.25).abs() < 1e-12);
        assert!(employee.exact_age(valuation) > 60.5);
    }

    #[test]
    fn test_retirement_age_by_gender() {
        assert_eq!(Gender::Male.retirement_age(), 67);
        assert_eq!(Gender::Female.retirement_age(), 64);
        assert_eq!(Gender::from_code(" f"), Some(Gender::Female));
        assert_eq!(Gender::from_code("X"), None);
    }

    #[test]
    fn test_leave_reason_parse() {
        assert_eq!(LeaveReason::parse("Resigned"), Some(LeaveReason::Resigned));
        assert_eq!(LeaveReason::parse("dismissed "), Some(LeaveReason::Dismissed));
        assert_eq!(LeaveReason::parse("retired"), Some(LeaveReason::Other));
        assert_eq!(LeaveReason::parse("  "), None);
    }

    #[test]
    fn test_coverage_flags() {
        let start = date(2010, 3, 1);
        let full = Employee::new(2, Gender::Female, date(1980, 1, 1), start, 8_000.0)
            .with_coverage(100.0, start);
        assert!(full.is_fully_covered_from_start());
        assert!((full.coverage_fraction() - 1.0).abs() < 1e-12);

        let partial = Employee::new(3, Gender::Female, date(1980, 1, 1), start, 8_000.0)
            .with_coverage(72.0, date(2015, 1, 1));
        assert!(partial.has_coverage());
        assert!(!partial.is_fully_covered_from_start());

        let none = Employee::new(4, Gender::Male, date(1980, 1, 1), start, 8_000.0);
        assert!(!none.has_coverage());
        assert_eq!(none.coverage_fraction(), 0.0);
    }

    #[test]
    fn test_book_rejects_duplicates() {
        let a = Employee::new(7, Gender::Male, date(1980, 1, 1), date(2000, 1, 1), 1.0);
        let b = a.clone();
        match EmployeeBook::from_records(vec![a, b]) {
            Err(LoadError::DuplicateEmployee(7)) => {}
            other => panic!("expected duplicate error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_benefits_paid_sums_both_sources() {
        let employee = Employee::new(5, Gender::Male, date(1980, 1, 1), date(2000, 1, 1), 1.0)
            .with_cash_flows(1_000.0, 300.0, 200.0);
        assert_eq!(employee.benefits_paid(), 500.0);
    }
}
