//! Editing operations on the model
//!
//! New items get the same defaults a blank form would show, and an id made
//! of a type prefix and the current millisecond timestamp.

use chrono::Utc;

use super::{Account, AccountType, Expense, ExpenseKind, FinancialModel, Income, Transfer};

fn unique_id(prefix: &str, taken: &[&str]) -> String {
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let id = format!("{prefix}{stamp}");
        if !taken.contains(&id.as_str()) {
            return id;
        }
        stamp += 1;
    }
}

fn remove_where<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

impl FinancialModel {
    fn first_account_id(&self) -> String {
        self.accounts.first().map(|a| a.id.clone()).unwrap_or_default()
    }

    pub fn add_account(&mut self) -> &mut Account {
        let taken: Vec<&str> = self.accounts.iter().map(|a| a.id.as_str()).collect();
        let account = Account {
            id: unique_id("acc", &taken),
            name: "New Account".to_string(),
            account_type: AccountType::Checking,
            balance: 0.0,
        };
        self.accounts.push(account);
        let last = self.accounts.len() - 1;
        &mut self.accounts[last]
    }

    pub fn add_income(&mut self) -> &mut Income {
        let taken: Vec<&str> = self.incomes.iter().map(|i| i.id.as_str()).collect();
        let income = Income {
            id: unique_id("inc", &taken),
            name: "New Income".to_string(),
            amount: 0.0,
            deposit_account_id: self.first_account_id(),
            raises: Vec::new(),
        };
        self.incomes.push(income);
        let last = self.incomes.len() - 1;
        &mut self.incomes[last]
    }

    /// New expenses start as a zero Fixed charge
    pub fn add_expense(&mut self) -> &mut Expense {
        let taken: Vec<&str> = self.expenses.iter().map(|e| e.id.as_str()).collect();
        let expense = Expense {
            id: unique_id("exp", &taken),
            name: "New Expense".to_string(),
            kind: ExpenseKind::Fixed,
            payment_account_id: self.first_account_id(),
            amount: Some(0.0),
            principal: None,
            apr: None,
            term_years: None,
            start_date: None,
            percent: None,
        };
        self.expenses.push(expense);
        let last = self.expenses.len() - 1;
        &mut self.expenses[last]
    }

    /// New transfers move money from the first account to the second
    pub fn add_transfer(&mut self) -> &mut Transfer {
        let taken: Vec<&str> = self.transfers.iter().map(|t| t.id.as_str()).collect();
        let transfer = Transfer {
            id: unique_id("trn", &taken),
            amount: 0.0,
            from_account_id: self.first_account_id(),
            to_account_id: self.accounts.get(1).map(|a| a.id.clone()).unwrap_or_default(),
            increases: Vec::new(),
        };
        self.transfers.push(transfer);
        let last = self.transfers.len() - 1;
        &mut self.transfers[last]
    }

    /// Removes the account only. Items that referenced it keep the dangling
    /// id and contribute nothing to that leg in projections.
    pub fn remove_account(&mut self, id: &str) -> bool {
        remove_where(&mut self.accounts, |a| a.id == id)
    }

    pub fn remove_income(&mut self, id: &str) -> bool {
        remove_where(&mut self.incomes, |i| i.id == id)
    }

    pub fn remove_expense(&mut self, id: &str) -> bool {
        remove_where(&mut self.expenses, |e| e.id == id)
    }

    pub fn remove_transfer(&mut self, id: &str) -> bool {
        remove_where(&mut self.transfers, |t| t.id == id)
    }
}
