//! Financial model data structures and snapshot loading

mod data;
mod month;
mod editor;
mod sample;
pub mod loader;

pub use data::{
    Account, AccountType, Income, Raise, Expense, ExpenseKind, ExpenseTerms, LoanTerms,
    Transfer, TransferIncrease, FinancialModel,
};
pub use month::YearMonth;
pub use loader::{load_model, export_file_name, parse_amount};
