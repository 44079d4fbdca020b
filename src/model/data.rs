//! Financial model data structures

use serde::{Deserialize, Serialize};

use super::loader::{lenient_f64, lenient_opt_f64, lenient_opt_string, lenient_string, lenient_tag, lenient_vec};
use super::YearMonth;
use crate::projection::amortized_payment;

/// Account classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Investment,
    /// Any type name this crate does not know; never liquid
    #[serde(other)]
    Other,
}

impl AccountType {
    /// Checking and Savings count toward liquid assets
    pub fn is_liquid(&self) -> bool {
        matches!(self, AccountType::Checking | AccountType::Savings)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::Investment => "Investment",
            AccountType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_tag")]
    pub account_type: AccountType,
    /// Starting balance for month 0; never changed by a projection
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: f64,
}

/// Percentage raise applied to an income in a given month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Raise {
    /// "YYYY-MM"
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Monthly amount as of now
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub deposit_account_id: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub raises: Vec<Raise>,
}

impl Income {
    pub fn add_raise(&mut self, date: YearMonth, percent: f64) {
        self.raises.push(Raise {
            date: date.key(),
            percent,
        });
    }

    /// Remove the raise at `index`, returning it if present
    pub fn remove_raise(&mut self, index: usize) -> Option<Raise> {
        (index < self.raises.len()).then(|| self.raises.remove(index))
    }
}

/// Which variant's fields drive an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpenseKind {
    #[default]
    Fixed,
    Amortized,
    Percentage,
    /// Any type name this crate does not know; charges nothing
    #[serde(other)]
    Unrecognized,
}

/// An expense as stored in the model.
///
/// Fields for every variant may be present at once; only the ones named by
/// `kind` are read. Use [`Expense::terms`] to get the active variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_tag")]
    pub kind: ExpenseKind,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_account_id: String,

    // Fixed
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    // Amortized
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub principal: Option<f64>,
    /// Annual percentage rate, in percent
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub term_years: Option<f64>,
    /// "YYYY-MM"
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    // Percentage
    #[serde(default, deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl Expense {
    /// Switch the active variant. Fields of the other variants are kept.
    pub fn set_kind(&mut self, kind: ExpenseKind) {
        self.kind = kind;
    }

    /// The active variant with its payload. Missing numbers read as 0.
    pub fn terms(&self) -> ExpenseTerms {
        match self.kind {
            ExpenseKind::Fixed => ExpenseTerms::Fixed {
                amount: self.amount.unwrap_or(0.0),
            },
            ExpenseKind::Amortized => ExpenseTerms::Amortized(LoanTerms {
                principal: self.principal.unwrap_or(0.0),
                apr: self.apr.unwrap_or(0.0),
                term_years: self.term_years.unwrap_or(0.0),
                start: self.start_date.as_deref().and_then(YearMonth::parse),
            }),
            ExpenseKind::Percentage => ExpenseTerms::Percentage {
                percent: self.percent.unwrap_or(0.0),
            },
            ExpenseKind::Unrecognized => ExpenseTerms::Unrecognized,
        }
    }
}

/// The active variant of an expense
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseTerms {
    /// Flat monthly charge
    Fixed { amount: f64 },
    /// Loan repaid in equal monthly payments
    Amortized(LoanTerms),
    /// Share of the month's total income, in percent
    Percentage { percent: f64 },
    /// Unknown expense type
    Unrecognized,
}

impl ExpenseTerms {
    /// Charge for `month`, given that month's total income
    pub fn charge(&self, month: YearMonth, monthly_income: f64) -> f64 {
        match self {
            ExpenseTerms::Fixed { amount } => *amount,
            ExpenseTerms::Percentage { percent } => monthly_income * percent / 100.0,
            ExpenseTerms::Unrecognized => 0.0,
            ExpenseTerms::Amortized(loan) => {
                if loan.is_active(month) {
                    loan.payment()
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual percentage rate, in percent
    pub apr: f64,
    pub term_years: f64,
    /// None when the start date is missing or unparseable
    pub start: Option<YearMonth>,
}

impl LoanTerms {
    pub fn payment(&self) -> f64 {
        amortized_payment(self.principal, self.apr, self.term_years)
    }

    /// Zero-based months since the loan started, or None if it has no start
    pub fn loan_month(&self, month: YearMonth) -> Option<i64> {
        self.start.map(|start| start.months_until(month))
    }

    /// True while `0 <= loan_month < term_years * 12`.
    /// A loan with no start or a non-positive term is never active.
    pub fn is_active(&self, month: YearMonth) -> bool {
        if self.term_years <= 0.0 {
            return false;
        }
        match self.loan_month(month) {
            Some(n) => n >= 0 && (n as f64) < self.term_years * 12.0,
            None => false,
        }
    }
}

/// Replacement amount for a transfer from a given month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransferIncrease {
    /// "YYYY-MM"
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from_account_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to_account_id: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub increases: Vec<TransferIncrease>,
}

impl Transfer {
    pub fn add_increase(&mut self, date: YearMonth, amount: f64) {
        self.increases.push(TransferIncrease {
            date: date.key(),
            amount,
        });
    }

    pub fn remove_increase(&mut self, index: usize) -> Option<TransferIncrease> {
        (index < self.increases.len()).then(|| self.increases.remove(index))
    }
}

/// The complete editable model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialModel {
    pub accounts: Vec<Account>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub transfers: Vec<Transfer>,
}

impl FinancialModel {
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// (item id, account id) pairs whose account reference points nowhere
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        let mut dangling = Vec::new();
        let mut check = |item: &str, account: &str| {
            if self.account(account).is_none() {
                dangling.push((item.to_string(), account.to_string()));
            }
        };

        for income in &self.incomes {
            check(&income.id, &income.deposit_account_id);
        }
        for expense in &self.expenses {
            check(&expense.id, &expense.payment_account_id);
        }
        for transfer in &self.transfers {
            check(&transfer.id, &transfer.from_account_id);
            check(&transfer.id, &transfer.to_account_id);
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        YearMonth::parse(s).unwrap()
    }

    fn loan(start: Option<&str>, term_years: f64) -> LoanTerms {
        LoanTerms {
            principal: 25_000.0,
            apr: 4.5,
            term_years,
            start: start.map(ym),
        }
    }

    #[test]
    fn test_loan_window() {
        let car = loan(Some("2023-01"), 5.0);

        assert!(!car.is_active(ym("2022-12")));
        assert!(car.is_active(ym("2023-01")));
        assert!(car.is_active(ym("2027-12")));
        assert!(!car.is_active(ym("2028-01")));
        assert_eq!(car.loan_month(ym("2027-12")), Some(59));
    }

    #[test]
    fn test_loan_without_start_or_term() {
        assert!(!loan(None, 5.0).is_active(ym("2023-06")));
        assert!(!loan(Some("2023-01"), 0.0).is_active(ym("2023-01")));
        assert!(!loan(Some("2023-01"), -1.0).is_active(ym("2023-01")));
    }

    #[test]
    fn test_fractional_term() {
        // 2.5 years = 30 payments
        let short = loan(Some("2024-01"), 2.5);
        assert!(short.is_active(ym("2026-06")));
        assert!(!short.is_active(ym("2026-07")));
    }

    #[test]
    fn test_expense_charges() {
        let month = ym("2026-10");

        let fixed = ExpenseTerms::Fixed { amount: 150.0 };
        assert_eq!(fixed.charge(month, 6000.0), 150.0);

        let tithe = ExpenseTerms::Percentage { percent: 10.0 };
        assert_eq!(tithe.charge(month, 6000.0), 600.0);

        let ended = ExpenseTerms::Amortized(loan(Some("2015-01"), 5.0));
        assert_eq!(ended.charge(month, 6000.0), 0.0);
    }

    #[test]
    fn test_set_kind_keeps_other_fields() {
        let mut expense = Expense {
            id: "exp1".into(),
            name: "Rent".into(),
            kind: ExpenseKind::Fixed,
            payment_account_id: "acc1".into(),
            amount: Some(1500.0),
            principal: None,
            apr: None,
            term_years: None,
            start_date: None,
            percent: None,
        };

        expense.set_kind(ExpenseKind::Percentage);
        assert_eq!(expense.terms(), ExpenseTerms::Percentage { percent: 0.0 });
        assert_eq!(expense.amount, Some(1500.0));

        expense.set_kind(ExpenseKind::Fixed);
        assert_eq!(expense.terms(), ExpenseTerms::Fixed { amount: 1500.0 });
    }

    #[test]
    fn test_amortized_terms_from_fields() {
        let expense = Expense {
            id: "exp5".into(),
            name: "Mortgage".into(),
            kind: ExpenseKind::Amortized,
            payment_account_id: "acc1".into(),
            amount: None,
            principal: Some(300_000.0),
            apr: Some(3.5),
            term_years: Some(30.0),
            start_date: Some("bogus".into()),
            percent: None,
        };

        match expense.terms() {
            ExpenseTerms::Amortized(loan) => {
                assert_eq!(loan.start, None);
                assert!(!loan.is_active(ym("2026-10")));
            }
            other => panic!("unexpected terms {other:?}"),
        }
    }

    #[test]
    fn test_schedule_entry_removal() {
        let mut income = Income {
            id: "inc1".into(),
            name: "Salary".into(),
            amount: 5000.0,
            deposit_account_id: "acc1".into(),
            raises: Vec::new(),
        };
        income.add_raise(ym("2027-01"), 3.0);
        income.add_raise(ym("2028-01"), 2.5);

        assert_eq!(income.remove_raise(5), None);
        let removed = income.remove_raise(0).unwrap();
        assert_eq!(removed.date, "2027-01");
        assert_eq!(income.raises.len(), 1);
    }

    #[test]
    fn test_transfer_increase_removal() {
        let mut transfer = Transfer {
            id: "trn2".into(),
            amount: 300.0,
            from_account_id: "acc1".into(),
            to_account_id: "acc2".into(),
            increases: Vec::new(),
        };
        transfer.add_increase(ym("2027-01"), 400.0);
        transfer.add_increase(ym("2028-01"), 500.0);
        assert_eq!(transfer.increases[1].date, "2028-01");

        assert_eq!(transfer.remove_increase(2), None);
        let removed = transfer.remove_increase(0).unwrap();
        assert_eq!(removed.amount, 400.0);
        assert_eq!(transfer.increases.len(), 1);
        assert_eq!(transfer.amount, 300.0);
    }

    #[test]
    fn test_unrecognized_kinds() {
        assert!(!AccountType::Other.is_liquid());
        assert_eq!(AccountType::Other.as_str(), "Other");
        assert_eq!(ExpenseTerms::Unrecognized.charge(ym("2026-10"), 6000.0), 0.0);
    }

    #[test]
    fn test_dangling_references() {
        let model = FinancialModel {
            accounts: vec![Account {
                id: "acc1".into(),
                name: "Checking".into(),
                account_type: AccountType::Checking,
                balance: 0.0,
            }],
            incomes: Vec::new(),
            expenses: Vec::new(),
            transfers: vec![Transfer {
                id: "trn1".into(),
                amount: 100.0,
                from_account_id: "acc1".into(),
                to_account_id: "gone".into(),
                increases: Vec::new(),
            }],
        };

        assert_eq!(
            model.dangling_references(),
            vec![("trn1".to_string(), "gone".to_string())]
        );
    }
}
