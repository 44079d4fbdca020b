//! Projection engine for monthly cash flow and balance projections

mod state;
mod engine;
mod cashflows;
mod amortization;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig, ScheduleMode, project};
pub use cashflows::{ProjectionRecord, ProjectionResult};
pub use amortization::{amortized_payment, round_cents};

// ============================================================================
// Horizon Presets
// ============================================================================
// Horizons offered to callers. The engine accepts any month count; these are
// the menu a front end is expected to present.

/// Preset horizons in months: 1 year, 2 years, 5 years
pub const HORIZON_PRESETS: [i32; 3] = [12, 24, 60];
