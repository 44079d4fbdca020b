//! Dashboard metrics and balance changes read from a projection

use serde::Serialize;

use crate::model::{AccountType, FinancialModel};
use crate::projection::ProjectionRecord;

/// Headline numbers for the first projected month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub income: f64,
    pub expenses: f64,
    pub net_flow: f64,
    /// Net flow as a percentage of income; 0 when income is 0
    pub savings_rate: f64,
}

impl DashboardMetrics {
    /// All zero for an empty projection
    pub fn from_projection(records: &[ProjectionRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };

        let net_flow = first.income - first.expenses;
        let savings_rate = if first.income > 0.0 {
            net_flow / first.income * 100.0
        } else {
            0.0
        };

        Self {
            income: first.income,
            expenses: first.expenses,
            net_flow,
            savings_rate,
        }
    }
}

/// Current vs. projected balance for one account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChange {
    pub account_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub current: f64,
    pub projected: f64,
    pub change: f64,
}

/// Per-account balance changes over the horizon, plus totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub accounts: Vec<AccountChange>,
    pub total_current: f64,
    pub total_projected: f64,
    pub total_change: f64,
}

impl BalanceSummary {
    /// Compares each account's stored balance with its balance in the last
    /// record. None for an empty projection.
    pub fn from_projection(model: &FinancialModel, records: &[ProjectionRecord]) -> Option<Self> {
        let last = records.last()?;

        let accounts: Vec<AccountChange> = model
            .accounts
            .iter()
            .map(|account| {
                let projected = last.balance(&account.id);
                AccountChange {
                    account_id: account.id.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    current: account.balance,
                    projected,
                    change: projected - account.balance,
                }
            })
            .collect();

        let total_current: f64 = accounts.iter().map(|a| a.current).sum();
        let total_projected: f64 = accounts.iter().map(|a| a.projected).sum();

        Some(Self {
            accounts,
            total_current,
            total_projected,
            total_change: total_projected - total_current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YearMonth;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use approx::assert_relative_eq;

    fn run(model: &FinancialModel, months: i32) -> Vec<ProjectionRecord> {
        ProjectionEngine::new(ProjectionConfig {
            horizon_months: months,
            start_month: YearMonth::parse("2026-10"),
            ..Default::default()
        })
        .project(model)
        .records
    }

    #[test]
    fn test_metrics_from_first_month() {
        let model = FinancialModel::sample();
        let records = run(&model, 12);
        let metrics = DashboardMetrics::from_projection(&records);

        assert_eq!(metrics.income, 6000.0);
        assert_eq!(metrics.expenses, records[0].expenses);
        assert_relative_eq!(metrics.net_flow, records[0].net_flow);
        assert_relative_eq!(metrics.savings_rate, metrics.net_flow / 6000.0 * 100.0);
    }

    #[test]
    fn test_metrics_zero_income() {
        let mut model = FinancialModel::sample();
        model.incomes.clear();
        let metrics = DashboardMetrics::from_projection(&run(&model, 1));

        assert_eq!(metrics.income, 0.0);
        assert_eq!(metrics.savings_rate, 0.0);
        assert!(metrics.net_flow < 0.0);

        assert_eq!(DashboardMetrics::from_projection(&[]), DashboardMetrics::default());
    }

    #[test]
    fn test_balance_summary() {
        let model = FinancialModel::sample();
        let records = run(&model, 12);
        let summary = BalanceSummary::from_projection(&model, &records).unwrap();

        assert_eq!(summary.accounts.len(), 3);
        let savings = &summary.accounts[1];
        assert_eq!(savings.current, 10_000.0);
        // 300/month Oct-Dec, 400/month from Jan 2027
        assert_eq!(savings.projected, 10_000.0 + 3.0 * 300.0 + 9.0 * 400.0);
        assert_eq!(savings.change, 4500.0);

        assert_eq!(summary.total_current, 65_000.0);
        assert_relative_eq!(
            summary.total_change,
            records.iter().map(|r| r.net_flow).sum::<f64>(),
            epsilon = 1e-6
        );

        assert!(BalanceSummary::from_projection(&model, &[]).is_none());
    }
}
