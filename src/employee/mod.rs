//! Employee data structures and file loading

mod data;
pub mod loader;

pub use data::{Employee, EmployeeBook, Gender, LeaveReason, DAYS_PER_YEAR};
pub use loader::{load_employees, load_employees_from_reader};
