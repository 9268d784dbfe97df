//! Period roll-forward of obligations and plan assets

mod balances;
mod engine;
mod schedule;

pub use balances::{
    load_closing_overrides, load_closing_overrides_from_reader, load_opening_balances,
    load_opening_balances_from_reader, OpeningBalance, OpeningBalances,
};
pub use engine::RollForwardEngine;
pub use schedule::MovementSchedule;
