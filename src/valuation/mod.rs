//! Present value of severance obligations

mod basis;
mod engine;
mod result;
mod state;

pub use basis::{BenefitBasis, CoverageAdjusted, Uncovered, ValuationVariant};
pub use engine::ValuationEngine;
pub use result::{ValuationRecord, ValuationResult};
pub use state::{ProjectionEnd, ProjectionState, SkipReason, YearOutcome, YearPoint, YearRecord};
