//! Movement schedule output

use serde::{Deserialize, Serialize};

/// Reconciliation of one employee's obligation and plan assets over the period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementSchedule {
    pub employee_id: u32,

    // Obligation
    pub pv_open: f64,
    pub service_cost: f64,
    pub interest_cost: f64,
    pub benefits_paid: f64,
    pub liability_gain_loss: f64,
    pub pv_close: f64,

    /// Closing PV relative to the undecremented benefit; `None` when that benefit is zero
    pub actuarial_factor: Option<f64>,

    // Plan assets
    pub assets_open: f64,
    pub expected_return: f64,
    pub deposits: f64,
    pub withdrawals: f64,
    pub asset_gain_loss: f64,
    pub assets_close: f64,

    // Diagnostics
    pub fraction_worked: f64,
    pub expected_service_years: f64,
    pub discount_rate: f64,
}

impl MovementSchedule {
    /// What remains of the obligation identity; zero up to rounding
    pub fn liability_residual(&self) -> f64 {
        self.pv_close
            - self.pv_open
            - self.service_cost
            - self.interest_cost
            + self.benefits_paid
            - self.liability_gain_loss
    }

    /// What remains of the asset identity; zero up to rounding
    pub fn asset_residual(&self) -> f64 {
        self.assets_close
            - self.assets_open
            - self.expected_return
            - self.deposits
            + self.withdrawals
            - self.asset_gain_loss
    }
}
