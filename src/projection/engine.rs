//! Core projection engine
//!
//! Walks forward one calendar month at a time from the start month. Each
//! month applies scheduled raises and transfer increases, totals income and
//! expenses, then moves money between account balances:
//!
//! 1. incomes deposit into their accounts
//! 2. expenses are paid from their accounts
//! 3. transfers leave the from-account and arrive in the to-account
//!
//! Legs that name an unknown account are skipped without error.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::cashflows::{ProjectionRecord, ProjectionResult};
use super::state::ProjectionState;
use super::HORIZON_PRESETS;
use crate::model::{ExpenseTerms, FinancialModel, YearMonth};

/// When a dated schedule entry (raise or transfer increase) takes effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleMode {
    /// Only in the month whose key equals the entry's date. Entries dated
    /// before the start month never apply.
    #[default]
    ExactMonth,
    /// In the first projected month at or after the entry's date, so entries
    /// dated before the start month apply in month 0
    StickyFromMonth,
}

/// Projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of months to project. Zero or negative yields no records.
    #[serde(default = "default_horizon_months")]
    pub horizon_months: i32,

    /// First projected month. None means the current calendar month at run time.
    #[serde(default)]
    pub start_month: Option<YearMonth>,

    #[serde(default)]
    pub schedule_mode: ScheduleMode,
}

fn default_horizon_months() -> i32 { HORIZON_PRESETS[0] }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: HORIZON_PRESETS[0],
            start_month: None,
            schedule_mode: ScheduleMode::ExactMonth,
        }
    }
}

impl ProjectionConfig {
    pub fn with_horizon(horizon_months: i32) -> Self {
        Self {
            horizon_months,
            ..Default::default()
        }
    }
}

/// Projection engine. Holds only configuration; every call to
/// [`ProjectionEngine::project`] starts from fresh state.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project `model` forward. The model is read, never modified.
    pub fn project(&self, model: &FinancialModel) -> ProjectionResult {
        let horizon = usize::try_from(self.config.horizon_months).unwrap_or(0);
        let start = self.config.start_month.unwrap_or_else(YearMonth::current);
        let mode = self.config.schedule_mode;

        debug!(
            "Projecting {} months from {} ({:?}): {} accounts, {} incomes, {} expenses, {} transfers",
            horizon,
            start,
            mode,
            model.accounts.len(),
            model.incomes.len(),
            model.expenses.len(),
            model.transfers.len()
        );
        for (item, account) in model.dangling_references() {
            warn!("{item} references unknown account '{account}'; that leg will be skipped");
        }

        let expense_terms: Vec<ExpenseTerms> = model.expenses.iter().map(|e| e.terms()).collect();
        let mut state = ProjectionState::new(model);
        let mut records = Vec::with_capacity(horizon);

        for i in 0..horizon {
            let month = start.add_months(i as i64);
            state.apply_schedules(month, mode);

            let monthly_income = state.total_income();
            let charges: Vec<f64> = expense_terms
                .iter()
                .map(|terms| terms.charge(month, monthly_income))
                .collect();
            let monthly_expenses: f64 = charges.iter().sum();

            for (index, income) in model.incomes.iter().enumerate() {
                state.adjust_balance(&income.deposit_account_id, state.income_amount(index));
            }
            for (expense, charge) in model.expenses.iter().zip(&charges) {
                state.adjust_balance(&expense.payment_account_id, -charge);
            }
            for (index, transfer) in model.transfers.iter().enumerate() {
                let amount = state.transfer_amount(index);
                state.adjust_balance(&transfer.from_account_id, -amount);
                state.adjust_balance(&transfer.to_account_id, amount);
            }

            records.push(ProjectionRecord {
                month,
                month_label: month.label(),
                income: monthly_income,
                expenses: monthly_expenses,
                net_flow: monthly_income - monthly_expenses,
                balances: state.balances().clone(),
            });
        }

        if let Some(last) = records.last() {
            debug!("Projection ends {} with net flow {:.2}", last.month, last.net_flow);
        }

        ProjectionResult { records }
    }
}

/// Project `model` for `horizon_months` starting at the current month
pub fn project(model: &FinancialModel, horizon_months: i32) -> Vec<ProjectionRecord> {
    ProjectionEngine::new(ProjectionConfig::with_horizon(horizon_months))
        .project(model)
        .records
}
