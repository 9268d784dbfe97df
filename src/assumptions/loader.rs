//! CSV-based reference table loader
//!
//! File shapes:
//! - mortality: `age,lx,px,qx`
//! - decrements: `min_age,max_age,resignation,dismissal`
//! - discount curve: `duration,rate`

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use super::{DecrementBand, DecrementModel, DiscountCurve, MortalityRates, MortalityTable};
use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct MortalityRow {
    age: u32,
    lx: f64,
    px: f64,
    qx: f64,
}

#[derive(Debug, Deserialize)]
struct CurveRow {
    duration: u32,
    rate: f64,
}

fn open(path: &Path) -> Result<Reader<std::fs::File>, LoadError> {
    Reader::from_path(path).map_err(|e| LoadError::open(path, e))
}

/// Load a single-gender life table from CSV
pub fn load_mortality_table(path: &Path) -> Result<MortalityTable, LoadError> {
    read_mortality_table(open(path)?)
}

pub fn load_mortality_table_from_reader<R: Read>(reader: R) -> Result<MortalityTable, LoadError> {
    read_mortality_table(Reader::from_reader(reader))
}

fn read_mortality_table<R: Read>(mut reader: Reader<R>) -> Result<MortalityTable, LoadError> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: MortalityRow = result?;
        rows.push((
            row.age,
            MortalityRates {
                survivors: row.lx,
                survival: row.px,
                death: row.qx,
            },
        ));
    }
    Ok(MortalityTable::new(rows)?)
}

/// Load turnover bands from CSV
pub fn load_decrement_model(path: &Path) -> Result<DecrementModel, LoadError> {
    read_decrement_model(open(path)?)
}

pub fn load_decrement_model_from_reader<R: Read>(reader: R) -> Result<DecrementModel, LoadError> {
    read_decrement_model(Reader::from_reader(reader))
}

fn read_decrement_model<R: Read>(mut reader: Reader<R>) -> Result<DecrementModel, LoadError> {
    let mut bands = Vec::new();
    for result in reader.deserialize() {
        let band: DecrementBand = result?;
        bands.push(band);
    }
    Ok(DecrementModel::new(bands)?)
}

/// Load the discount curve from CSV
pub fn load_discount_curve(path: &Path) -> Result<DiscountCurve, LoadError> {
    read_discount_curve(open(path)?)
}

pub fn load_discount_curve_from_reader<R: Read>(reader: R) -> Result<DiscountCurve, LoadError> {
    read_discount_curve(Reader::from_reader(reader))
}

fn read_discount_curve<R: Read>(mut reader: Reader<R>) -> Result<DiscountCurve, LoadError> {
    let mut points = Vec::new();
    for result in reader.deserialize() {
        let row: CurveRow = result?;
        points.push((row.duration, row.rate));
    }
    Ok(DiscountCurve::new(points)?)
}
