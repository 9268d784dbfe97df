//! Prior-period balances and closing-value overrides
//!
//! File shapes:
//! - opening balances: `employee_id,pv_open,assets_open`
//! - closing overrides: `employee_id,pv_close`

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Obligation and plan assets carried from the previous period end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningBalance {
    pub employee_id: u32,
    pub pv_open: f64,
    pub assets_open: f64,
}

impl OpeningBalance {
    /// Balance for an employee with nothing carried forward
    pub fn zero(employee_id: u32) -> Self {
        Self {
            employee_id,
            pv_open: 0.0,
            assets_open: 0.0,
        }
    }
}

/// Opening balances keyed by employee id
#[derive(Debug, Clone, Default)]
pub struct OpeningBalances {
    balances: BTreeMap<u32, OpeningBalance>,
}

impl OpeningBalances {
    pub fn from_records(records: Vec<OpeningBalance>) -> Result<Self, LoadError> {
        let mut balances = BTreeMap::new();
        for record in records {
            if balances.insert(record.employee_id, record).is_some() {
                return Err(LoadError::DuplicateEmployee(record.employee_id));
            }
        }
        Ok(Self { balances })
    }

    pub fn get(&self, employee_id: u32) -> Option<&OpeningBalance> {
        self.balances.get(&employee_id)
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct OverrideRow {
    employee_id: u32,
    pv_close: f64,
}

pub fn load_opening_balances(path: &Path) -> Result<OpeningBalances, LoadError> {
    let reader = Reader::from_path(path).map_err(|e| LoadError::open(path, e))?;
    read_opening_balances(reader)
}

pub fn load_opening_balances_from_reader<R: Read>(reader: R) -> Result<OpeningBalances, LoadError> {
    read_opening_balances(Reader::from_reader(reader))
}

fn read_opening_balances<R: Read>(mut reader: Reader<R>) -> Result<OpeningBalances, LoadError> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: OpeningBalance = result?;
        records.push(record);
    }
    log::debug!("loaded {} opening balances", records.len());
    OpeningBalances::from_records(records)
}

/// Load closing present values that replace the engine's own figures
pub fn load_closing_overrides(path: &Path) -> Result<BTreeMap<u32, f64>, LoadError> {
    let reader = Reader::from_path(path).map_err(|e| LoadError::open(path, e))?;
    read_closing_overrides(reader)
}

pub fn load_closing_overrides_from_reader<R: Read>(
    reader: R,
) -> Result<BTreeMap<u32, f64>, LoadError> {
    read_closing_overrides(Reader::from_reader(reader))
}

fn read_closing_overrides<R: Read>(mut reader: Reader<R>) -> Result<BTreeMap<u32, f64>, LoadError> {
    let mut overrides = BTreeMap::new();
    for result in reader.deserialize() {
        let row: OverrideRow = result?;
        if overrides.insert(row.employee_id, row.pv_close).is_some() {
            return Err(LoadError::DuplicateEmployee(row.employee_id));
        }
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_opening_balances() {
        let data = "employee_id,pv_open,assets_open\n1,150000,40000\n2,82000.5,0\n";
        let balances = load_opening_balances_from_reader(data.as_bytes()).unwrap();

        assert_eq!(balances.len(), 2);
        let first = balances.get(1).unwrap();
        assert_eq!(first.pv_open, 150_000.0);
        assert_eq!(first.assets_open, 40_000.0);
        assert!(balances.get(3).is_none());
    }

    #[test]
    fn test_duplicate_opening_balance_rejected() {
        let data = "employee_id,pv_open,assets_open\n1,150000,40000\n1,1,1\n";
        let err = load_opening_balances_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateEmployee(1)));
    }

    #[test]
    fn test_load_closing_overrides() {
        let data = "employee_id,pv_close\n4,99000\n9,0\n";
        let overrides = load_closing_overrides_from_reader(data.as_bytes()).unwrap();

        assert_eq!(overrides.get(&4), Some(&99_000.0));
        assert_eq!(overrides.get(&9), Some(&0.0));
        assert_eq!(overrides.len(), 2);
    }
}
