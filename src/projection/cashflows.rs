//! Projection output records

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::{FinancialModel, YearMonth};

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRecord {
    pub month: YearMonth,
    /// e.g. "Oct 2026"
    pub month_label: String,
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub net_flow: f64,
    /// Ending balance per account id
    pub balances: BTreeMap<String, f64>,
}

impl ProjectionRecord {
    /// Ending balance of an account; 0 if the account was not projected
    pub fn balance(&self, account_id: &str) -> f64 {
        self.balances.get(account_id).copied().unwrap_or(0.0)
    }
}

/// Ordered sequence of monthly records, starting at the first projected month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub records: Vec<ProjectionRecord>,
}

impl ProjectionResult {
    /// Write one CSV row per month: label, income, expenses, net flow, then
    /// one balance column per account in model order
    pub fn write_csv<W: Write>(&self, model: &FinancialModel, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec![
            "Month".to_string(),
            "Income".to_string(),
            "Expenses".to_string(),
            "Net Flow".to_string(),
        ];
        header.extend(model.accounts.iter().map(|a| a.name.clone()));
        csv.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![
                record.month_label.clone(),
                format!("{:.2}", record.income),
                format!("{:.2}", record.expenses),
                format!("{:.2}", record.net_flow),
            ];
            row.extend(
                model
                    .accounts
                    .iter()
                    .map(|a| format!("{:.2}", record.balance(&a.id))),
            );
            csv.write_record(&row)?;
        }

        csv.flush()?;
        Ok(())
    }
}
