//! Cashflow Projection - month-by-month projection of a personal financial model
//!
//! This library provides:
//! - The financial model (accounts, incomes, expenses, transfers) and its
//!   JSON snapshot import/export
//! - Loan amortization
//! - The projection engine: per-month income, expenses, net flow and balances
//! - Dashboard metrics, balance changes and alerts derived from a projection

pub mod error;
pub mod model;
pub mod projection;
pub mod analysis;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{FinancialModel, YearMonth};
pub use projection::{ProjectionEngine, ProjectionConfig, ProjectionRecord, ProjectionResult, ScheduleMode};
