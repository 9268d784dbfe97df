//! Load employee records from the canonical employee CSV
//!
//! Expected header:
//! `employee_id,gender,birth_date,start_work_date,last_salary,coverage_start_date,
//! coverage_rate,assets_value,leave_date,leave_reason,deposits,withdrawals,benefits_paid_directly`
//!
//! Dates are ISO `YYYY-MM-DD`. Blank optional cells are read as absent, blank
//! amounts as zero.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::{Employee, EmployeeBook, Gender, LeaveReason};
use crate::error::LoadError;

/// Raw CSV row matching the employee file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    employee_id: u32,
    gender: String,
    birth_date: NaiveDate,
    start_work_date: NaiveDate,
    last_salary: f64,
    coverage_start_date: Option<NaiveDate>,
    coverage_rate: Option<f64>,
    assets_value: Option<f64>,
    leave_date: Option<NaiveDate>,
    leave_reason: Option<String>,
    deposits: Option<f64>,
    withdrawals: Option<f64>,
    benefits_paid_directly: Option<f64>,
}

impl CsvRow {
    fn into_employee(self) -> Result<Employee, LoadError> {
        let gender = Gender::from_code(&self.gender)
            .ok_or_else(|| LoadError::UnknownGender(self.gender.clone()))?;

        Ok(Employee {
            employee_id: self.employee_id,
            gender,
            birth_date: self.birth_date,
            start_work_date: self.start_work_date,
            last_salary: self.last_salary,
            coverage_start_date: self.coverage_start_date,
            coverage_rate: self.coverage_rate,
            assets_value: self.assets_value.unwrap_or(0.0),
            leave_date: self.leave_date,
            leave_reason: self.leave_reason.as_deref().and_then(LeaveReason::parse),
            deposits: self.deposits.unwrap_or(0.0),
            withdrawals: self.withdrawals.unwrap_or(0.0),
            benefits_paid_directly: self.benefits_paid_directly.unwrap_or(0.0),
        })
    }
}

/// Load all employees from a CSV file
pub fn load_employees<P: AsRef<Path>>(path: P) -> Result<EmployeeBook, LoadError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path).map_err(|e| LoadError::open(path, e))?;
    read_employees(reader)
}

/// Load employees from any reader (e.g. string buffer)
pub fn load_employees_from_reader<R: Read>(reader: R) -> Result<EmployeeBook, LoadError> {
    read_employees(Reader::from_reader(reader))
}

fn read_employees<R: Read>(mut reader: Reader<R>) -> Result<EmployeeBook, LoadError> {
    let mut employees = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        employees.push(row.into_employee()?);
    }

    log::debug!("read {} employee records", employees.len());
    EmployeeBook::from_records(employees)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "employee_id,gender,birth_date,start_work_date,last_salary,coverage_start_date,coverage_rate,assets_value,leave_date,leave_reason,deposits,withdrawals,benefits_paid_directly\n";

    #[test]
    fn test_load_employees_from_reader() {
        let data = format!(
            "{HEADER}\
             11,M,1970-05-04,2001-02-01,12000,,,35000,,,4000,,\n\
             12,F,1985-11-20,2012-07-15,9500,2015-01-01,72,18000,2025-03-31,resigned,2500,1000,300\n"
        );

        let book = load_employees_from_reader(data.as_bytes()).expect("Failed to load employees");
        assert_eq!(book.len(), 2);

        let first = book.get(11).unwrap();
        assert_eq!(first.gender, Gender::Male);
        assert_eq!(first.coverage_rate, None);
        assert_eq!(first.leave_date, None);
        assert_eq!(first.leave_reason, None);
        assert_eq!(first.withdrawals, 0.0);
        assert_eq!(first.deposits, 4000.0);

        let second = book.get(12).unwrap();
        assert_eq!(second.coverage_rate, Some(72.0));
        assert_eq!(second.coverage_start_date, NaiveDate::from_ymd_opt(2015, 1, 1));
        assert_eq!(second.leave_reason, Some(LeaveReason::Resigned));
        assert_eq!(second.benefits_paid(), 1300.0);
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let data = format!("{HEADER}1,X,1970-05-04,2001-02-01,12000,,,,,,,,\n");
        let err = load_employees_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownGender(code) if code == "X"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let data = format!(
            "{HEADER}\
             3,M,1970-05-04,2001-02-01,12000,,,,,,,,\n\
             3,M,1970-05-04,2010-02-01,13000,,,,,,,,\n"
        );
        let err = load_employees_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateEmployee(3)));
    }
}
