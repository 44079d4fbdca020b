//! Month-to-month working state for a single projection run

use std::collections::BTreeMap;

use log::{debug, warn};

use super::engine::ScheduleMode;
use crate::model::{FinancialModel, YearMonth};

/// One scheduled entry, parsed once per run
#[derive(Debug, Clone)]
struct ScheduledEntry {
    /// None if the stored date does not parse; such entries never fire
    date: Option<YearMonth>,
    value: f64,
    applied: bool,
}

impl ScheduledEntry {
    fn is_due(&self, month: YearMonth, mode: ScheduleMode) -> bool {
        match (self.date, mode) {
            (None, _) => false,
            (Some(_), _) if self.applied => false,
            (Some(date), ScheduleMode::ExactMonth) => date == month,
            (Some(date), ScheduleMode::StickyFromMonth) => date <= month,
        }
    }
}

/// An income or transfer amount that evolves over the run
#[derive(Debug, Clone)]
struct WorkingAmount {
    amount: f64,
    schedule: Vec<ScheduledEntry>,
}

impl WorkingAmount {
    fn new<I>(owner: &str, amount: f64, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let schedule = entries
            .into_iter()
            .map(|(date, value)| {
                let parsed = YearMonth::parse(&date);
                if parsed.is_none() && !date.trim().is_empty() {
                    warn!("{owner}: ignoring schedule entry with unparseable date '{date}'");
                }
                ScheduledEntry { date: parsed, value, applied: false }
            })
            .collect();
        Self { amount, schedule }
    }

    /// Take the entries due this month, marking them applied.
    /// Returned in date order, list order within a date.
    fn take_due(&mut self, month: YearMonth, mode: ScheduleMode) -> Vec<f64> {
        let mut due: Vec<(YearMonth, f64)> = Vec::new();
        for entry in &mut self.schedule {
            if entry.is_due(month, mode) {
                entry.applied = true;
                if let Some(date) = entry.date {
                    due.push((date, entry.value));
                }
            }
        }
        due.sort_by_key(|(date, _)| *date);
        due.into_iter().map(|(_, value)| value).collect()
    }
}

/// State carried between months: working amounts and running balances.
/// Built from the model at the start of a run; the model itself is never
/// written to.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    incomes: Vec<WorkingAmount>,
    transfers: Vec<WorkingAmount>,
    balances: BTreeMap<String, f64>,
}

impl ProjectionState {
    pub fn new(model: &FinancialModel) -> Self {
        let incomes = model
            .incomes
            .iter()
            .map(|income| {
                WorkingAmount::new(
                    &income.id,
                    income.amount,
                    income.raises.iter().map(|r| (r.date.clone(), r.percent)),
                )
            })
            .collect();

        let transfers = model
            .transfers
            .iter()
            .map(|transfer| {
                WorkingAmount::new(
                    &transfer.id,
                    transfer.amount,
                    transfer.increases.iter().map(|i| (i.date.clone(), i.amount)),
                )
            })
            .collect();

        let balances = model
            .accounts
            .iter()
            .map(|account| (account.id.clone(), account.balance))
            .collect();

        Self { incomes, transfers, balances }
    }

    /// Apply this month's raises (compounding) and transfer increases
    /// (replacing; the latest one wins)
    pub fn apply_schedules(&mut self, month: YearMonth, mode: ScheduleMode) {
        for (i, income) in self.incomes.iter_mut().enumerate() {
            for percent in income.take_due(month, mode) {
                income.amount *= 1.0 + percent / 100.0;
                debug!("{month}: income #{i} raised {percent}% to {:.2}", income.amount);
            }
        }
        for (i, transfer) in self.transfers.iter_mut().enumerate() {
            if let Some(amount) = transfer.take_due(month, mode).pop() {
                transfer.amount = amount;
                debug!("{month}: transfer #{i} set to {amount:.2}");
            }
        }
    }

    /// Working amount of the income at `index` (model order)
    pub fn income_amount(&self, index: usize) -> f64 {
        self.incomes.get(index).map(|w| w.amount).unwrap_or(0.0)
    }

    /// Working amount of the transfer at `index` (model order)
    pub fn transfer_amount(&self, index: usize) -> f64 {
        self.transfers.get(index).map(|w| w.amount).unwrap_or(0.0)
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().map(|w| w.amount).sum()
    }

    /// Add `delta` to an account balance. Returns false, changing nothing,
    /// if the account is unknown.
    pub fn adjust_balance(&mut self, account_id: &str, delta: f64) -> bool {
        match self.balances.get_mut(account_id) {
            Some(balance) => {
                *balance += delta;
                true
            }
            None => false,
        }
    }

    pub fn balances(&self) -> &BTreeMap<String, f64> {
        &self.balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, AccountType, Income, Raise, Transfer, TransferIncrease};
    use approx::assert_relative_eq;

    fn ym(s: &str) -> YearMonth {
        YearMonth::parse(s).unwrap()
    }

    fn model() -> FinancialModel {
        FinancialModel {
            accounts: vec![Account {
                id: "acc1".into(),
                name: "Checking".into(),
                account_type: AccountType::Checking,
                balance: 100.0,
            }],
            incomes: vec![Income {
                id: "inc1".into(),
                name: "Salary".into(),
                amount: 1000.0,
                deposit_account_id: "acc1".into(),
                raises: vec![
                    Raise { date: "2027-03".into(), percent: 3.0 },
                    Raise { date: "2027-01".into(), percent: 2.0 },
                    Raise { date: "garbage".into(), percent: 50.0 },
                ],
            }],
            expenses: Vec::new(),
            transfers: vec![Transfer {
                id: "trn1".into(),
                amount: 300.0,
                from_account_id: "acc1".into(),
                to_account_id: "acc2".into(),
                increases: vec![
                    TransferIncrease { date: "2027-02".into(), amount: 500.0 },
                    TransferIncrease { date: "2027-01".into(), amount: 400.0 },
                ],
            }],
        }
    }

    #[test]
    fn test_exact_month_only_fires_on_match() {
        let mut state = ProjectionState::new(&model());

        state.apply_schedules(ym("2027-02"), ScheduleMode::ExactMonth);
        assert_eq!(state.income_amount(0), 1000.0);
        assert_eq!(state.transfer_amount(0), 500.0);

        state.apply_schedules(ym("2027-03"), ScheduleMode::ExactMonth);
        assert_relative_eq!(state.income_amount(0), 1030.0);
        assert_eq!(state.transfer_amount(0), 500.0);
    }

    #[test]
    fn test_sticky_catches_up_in_date_order() {
        let mut state = ProjectionState::new(&model());

        state.apply_schedules(ym("2027-06"), ScheduleMode::StickyFromMonth);
        assert_relative_eq!(state.income_amount(0), 1000.0 * 1.02 * 1.03);
        // 2027-02 is the latest increase, even though it is listed first
        assert_eq!(state.transfer_amount(0), 500.0);

        // Already applied; nothing more happens
        state.apply_schedules(ym("2027-07"), ScheduleMode::StickyFromMonth);
        assert_relative_eq!(state.income_amount(0), 1000.0 * 1.02 * 1.03);
    }

    #[test]
    fn test_unknown_account_is_noop() {
        let mut state = ProjectionState::new(&model());

        assert!(state.adjust_balance("acc1", 50.0));
        assert!(!state.adjust_balance("acc2", 50.0));
        assert_eq!(state.balances().len(), 1);
        assert_eq!(state.balances()["acc1"], 150.0);
    }
}
