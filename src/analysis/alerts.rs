//! Warnings raised by a projection

use std::fmt;

use serde::Serialize;

use crate::model::FinancialModel;
use crate::projection::ProjectionRecord;

/// Months of month-0 expenses that liquid assets should cover
pub const EMERGENCY_FUND_MONTHS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Alert {
    /// Current Checking + Savings balances are below the emergency fund goal
    LowEmergencyFund { liquid_assets: f64, goal: f64 },
    /// Some projected months have negative net flow
    NegativeCashFlow { months: usize, horizon: usize },
    AllClear,
}

impl Alert {
    pub fn severity(&self) -> Severity {
        match self {
            Alert::LowEmergencyFund { .. } => Severity::Warning,
            Alert::NegativeCashFlow { .. } => Severity::Danger,
            Alert::AllClear => Severity::Success,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Alert::LowEmergencyFund { .. } => "Low Emergency Fund",
            Alert::NegativeCashFlow { .. } => "Negative Cash Flow",
            Alert::AllClear => "All Clear!",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::LowEmergencyFund { liquid_assets, goal } => write!(
                f,
                "Your liquid assets (${liquid_assets:.2}) are below a {EMERGENCY_FUND_MONTHS}-month expense cushion of ${goal:.2}."
            ),
            Alert::NegativeCashFlow { months, horizon } => write!(
                f,
                "You have a projected negative cash flow in {months} of the next {horizon} months."
            ),
            Alert::AllClear => write!(f, "Your financial projections look healthy."),
        }
    }
}

/// Sum of current Checking and Savings balances
pub fn liquid_assets(model: &FinancialModel) -> f64 {
    model
        .accounts
        .iter()
        .filter(|a| a.account_type.is_liquid())
        .map(|a| a.balance)
        .sum()
}

/// Evaluate all alerts. Always returns at least one entry; `AllClear` when
/// nothing else fired.
pub fn alerts(model: &FinancialModel, records: &[ProjectionRecord]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let first_expenses = records.first().map(|r| r.expenses).unwrap_or(0.0);
    let goal = first_expenses * EMERGENCY_FUND_MONTHS;
    let liquid = liquid_assets(model);
    if liquid < goal {
        alerts.push(Alert::LowEmergencyFund { liquid_assets: liquid, goal });
    }

    let negative = records.iter().filter(|r| r.net_flow < 0.0).count();
    if negative > 0 {
        alerts.push(Alert::NegativeCashFlow {
            months: negative,
            horizon: records.len(),
        });
    }

    if alerts.is_empty() {
        alerts.push(Alert::AllClear);
    }
    alerts
}
