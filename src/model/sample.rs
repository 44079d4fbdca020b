//! Built-in starter model
//!
//! Used when no snapshot file is supplied: three accounts, a salary with
//! scheduled raises, a spread of fixed bills, two loans, a tithe, and two
//! recurring transfers.

use super::{
    Account, AccountType, Expense, ExpenseKind, FinancialModel, Income, Raise, Transfer,
    TransferIncrease,
};

fn account(id: &str, name: &str, account_type: AccountType, balance: f64) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        account_type,
        balance,
    }
}

fn blank_expense(id: &str, name: &str, kind: ExpenseKind) -> Expense {
    Expense {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        payment_account_id: "acc1".to_string(),
        amount: None,
        principal: None,
        apr: None,
        term_years: None,
        start_date: None,
        percent: None,
    }
}

fn fixed(id: &str, name: &str, amount: f64) -> Expense {
    Expense {
        amount: Some(amount),
        ..blank_expense(id, name, ExpenseKind::Fixed)
    }
}

fn loan(id: &str, name: &str, principal: f64, apr: f64, term_years: f64, start: &str) -> Expense {
    Expense {
        principal: Some(principal),
        apr: Some(apr),
        term_years: Some(term_years),
        start_date: Some(start.to_string()),
        ..blank_expense(id, name, ExpenseKind::Amortized)
    }
}

impl FinancialModel {
    pub fn sample() -> Self {
        Self {
            accounts: vec![
                account("acc1", "Checking", AccountType::Checking, 5_000.0),
                account("acc2", "Savings", AccountType::Savings, 10_000.0),
                account("acc3", "401(k)", AccountType::Investment, 50_000.0),
            ],
            incomes: vec![
                Income {
                    id: "inc1".to_string(),
                    name: "Salary".to_string(),
                    amount: 5_000.0,
                    deposit_account_id: "acc1".to_string(),
                    raises: vec![
                        Raise { date: "2027-01".to_string(), percent: 3.0 },
                        Raise { date: "2028-01".to_string(), percent: 3.0 },
                    ],
                },
                Income {
                    id: "inc2".to_string(),
                    name: "Side Gig".to_string(),
                    amount: 1_000.0,
                    deposit_account_id: "acc1".to_string(),
                    raises: Vec::new(),
                },
            ],
            expenses: vec![
                fixed("exp1", "Rent", 1_500.0),
                fixed("exp2", "Groceries", 600.0),
                fixed("exp3", "Utilities", 200.0),
                loan("exp4", "Car Payment", 25_000.0, 4.5, 5.0, "2023-01"),
                loan("exp5", "Mortgage", 300_000.0, 3.5, 30.0, "2023-01"),
                fixed("exp6", "Dining Out", 400.0),
                fixed("exp7", "Entertainment", 200.0),
                fixed("exp8", "Insurance", 150.0),
                fixed("exp9", "Subscriptions", 50.0),
                fixed("exp10", "Internet/Phone", 150.0),
                Expense {
                    percent: Some(10.0),
                    ..blank_expense("exp11", "Tithing", ExpenseKind::Percentage)
                },
            ],
            transfers: vec![
                Transfer {
                    id: "trn1".to_string(),
                    amount: 500.0,
                    from_account_id: "acc1".to_string(),
                    to_account_id: "acc3".to_string(),
                    increases: Vec::new(),
                },
                Transfer {
                    id: "trn2".to_string(),
                    amount: 300.0,
                    from_account_id: "acc1".to_string(),
                    to_account_id: "acc2".to_string(),
                    increases: vec![
                        TransferIncrease { date: "2027-01".to_string(), amount: 400.0 },
                        TransferIncrease { date: "2028-01".to_string(), amount: 500.0 },
                    ],
                },
            ],
        }
    }
}
