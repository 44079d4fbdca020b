//! Readers of a finished projection: dashboard metrics, balance changes, alerts

mod metrics;
mod alerts;

pub use metrics::{DashboardMetrics, AccountChange, BalanceSummary};
pub use alerts::{Alert, Severity, alerts, liquid_assets, EMERGENCY_FUND_MONTHS};

/// Label a horizon for titles: "6 Months", "1 Year", "2yr 6mo"
pub fn horizon_label(months: i32) -> String {
    let years = months.max(0) / 12;
    let rest = months.max(0) % 12;

    if years > 0 && rest > 0 {
        format!("{years}yr {rest}mo")
    } else if years > 0 {
        format!("{years} Year{}", if years > 1 { "s" } else { "" })
    } else {
        format!("{rest} Month{}", if rest == 1 { "" } else { "s" })
    }
}
