//! Model snapshot import and export
//!
//! A snapshot is a JSON document with four top-level arrays: `accounts`,
//! `incomes`, `expenses` and `transfers`. Import only checks that the four
//! keys exist; numeric fields are coerced rather than validated.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::FinancialModel;
use crate::error::{Error, Result};

/// Top-level keys every snapshot must carry
pub const REQUIRED_KEYS: [&str; 4] = ["accounts", "incomes", "expenses", "transfers"];

/// Parse user-entered numeric text. Empty, non-numeric or non-finite input is 0.
pub fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) if !s.trim().is_empty() => Some(parse_amount(s)),
        _ => None,
    }
}

/// Deserialize a number that may arrive as a JSON number, a numeric string,
/// or something unusable (which becomes 0).
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).unwrap_or(0.0))
}

/// Like [`lenient_f64`], but keeps null and blank strings as absent
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(ref s) if s.trim().is_empty() => None,
        other => Some(coerce_number(&other).unwrap_or(0.0)),
    })
}

/// Ids, names, account references and dates. Numbers and booleans keep
/// their JSON text; null and anything structured become "".
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Like [`lenient_string`], but null and blank text are absent
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_string(deserializer)?;
    Ok((!text.trim().is_empty()).then_some(text))
}

/// Type tags. Anything that is not a string is read as an empty name, which
/// the enum's catch-all variant absorbs.
pub(crate) fn lenient_tag<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = match Value::deserialize(deserializer)? {
        Value::String(s) => Value::String(s),
        _ => Value::String(String::new()),
    };
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}

/// Schedule lists. Null or a non-array value is an empty list.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        items @ Value::Array(_) => serde_json::from_value(items).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

impl FinancialModel {
    /// Parse a snapshot. Fails if the text is not JSON or any required key is
    /// missing or null. Entries are otherwise taken as they come.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;

        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| document.get(**key).map_or(true, Value::is_null))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::InvalidFormat { missing });
        }

        let model: FinancialModel = serde_json::from_value(document)?;
        Ok(model)
    }

    /// Replace this model wholesale with a parsed snapshot.
    /// On error the current model is left as it was.
    pub fn replace_from_json(&mut self, text: &str) -> Result<()> {
        let imported = Self::from_json(text)?;
        info!(
            "Imported model: {} accounts, {} incomes, {} expenses, {} transfers",
            imported.accounts.len(),
            imported.incomes.len(),
            imported.expenses.len(),
            imported.transfers.len()
        );
        *self = imported;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot into `dir` under its date-stamped name
    pub fn export_to_dir(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        let path = dir.join(export_file_name(date));
        fs::write(&path, self.to_json_pretty()?)?;
        info!("Exported model to {}", path.display());
        Ok(path)
    }
}

/// `financial_model_YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("financial_model_{}.json", date.format("%Y-%m-%d"))
}

/// Load a snapshot file
pub fn load_model(path: &Path) -> Result<FinancialModel> {
    let text = fs::read_to_string(path)?;
    let model = FinancialModel::from_json(&text)?;
    info!("Loaded model from {}", path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountType, ExpenseKind, ExpenseTerms};

    const SNAPSHOT: &str = r#"{
        "accounts": [
            {"id": "acc1", "name": "Checking", "type": "Checking", "balance": "5000"},
            {"id": "acc2", "name": "Savings", "type": "Savings", "balance": ""}
        ],
        "incomes": [
            {"id": "inc1", "name": "Salary", "amount": 5000, "depositAccountId": "acc1",
             "raises": [{"date": "2027-01", "percent": "3"}]},
            {"id": "inc2", "name": "Side Gig", "amount": "abc", "depositAccountId": "acc1"}
        ],
        "expenses": [
            {"id": "exp1", "name": "Rent", "type": "Fixed", "paymentAccountId": "acc1", "amount": 1500},
            {"id": "exp4", "name": "Car", "type": "Amortized", "paymentAccountId": "acc1",
             "principal": 25000, "apr": 4.5, "termYears": 5, "startDate": "2023-01"},
            {"id": "exp11", "name": "Tithing", "type": "Percentage", "paymentAccountId": "acc1", "percent": 10}
        ],
        "transfers": [
            {"id": "trn1", "amount": 500, "fromAccountId": "acc1", "toAccountId": "acc2"}
        ]
    }"#;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount("  40 "), 40.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("twelve"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn test_import_coerces_numbers() {
        let model = FinancialModel::from_json(SNAPSHOT).expect("snapshot should parse");

        assert_eq!(model.accounts[0].balance, 5000.0);
        assert_eq!(model.accounts[1].balance, 0.0);
        assert_eq!(model.accounts[1].account_type, AccountType::Savings);
        assert_eq!(model.incomes[0].raises[0].percent, 3.0);
        assert_eq!(model.incomes[1].amount, 0.0);
        assert!(model.incomes[1].raises.is_empty());
        assert!(model.transfers[0].increases.is_empty());
        assert_eq!(model.expenses[1].kind, ExpenseKind::Amortized);
        assert_eq!(model.expenses[2].terms(), ExpenseTerms::Percentage { percent: 10.0 });
    }

    #[test]
    fn test_import_tolerates_loose_entries() {
        let text = r#"{
            "accounts": [
                {"id": 7, "name": "Crypto", "type": "Crypto", "balance": 900},
                {"id": "acc2", "name": null, "type": null, "balance": 100}
            ],
            "incomes": [
                {"id": "inc1", "amount": 1000, "depositAccountId": 7, "raises": null}
            ],
            "expenses": [
                {"id": "exp1", "type": "Loan", "paymentAccountId": 7, "amount": 50},
                {"id": "exp2", "type": "Amortized", "paymentAccountId": "7",
                 "principal": 1000, "apr": 5, "termYears": 1, "startDate": null}
            ],
            "transfers": [
                {"id": 3, "amount": 10, "fromAccountId": 7, "toAccountId": true, "increases": "soon"}
            ]
        }"#;
        let model = FinancialModel::from_json(text).expect("loose snapshot should import");

        assert_eq!(model.accounts[0].id, "7");
        assert_eq!(model.accounts[0].account_type, AccountType::Other);
        assert!(!model.accounts[0].account_type.is_liquid());
        assert_eq!(model.accounts[1].name, "");
        assert_eq!(model.accounts[1].account_type, AccountType::Other);

        assert_eq!(model.incomes[0].deposit_account_id, "7");
        assert!(model.incomes[0].raises.is_empty());

        assert_eq!(model.expenses[0].kind, ExpenseKind::Unrecognized);
        assert_eq!(model.expenses[0].terms(), ExpenseTerms::Unrecognized);
        assert_eq!(model.expenses[1].payment_account_id, "7");
        assert_eq!(model.expenses[1].start_date, None);

        assert_eq!(model.transfers[0].id, "3");
        assert_eq!(model.transfers[0].to_account_id, "true");
        assert!(model.transfers[0].increases.is_empty());
    }

    #[test]
    fn test_null_top_level_key_rejected() {
        let err = FinancialModel::from_json(
            r#"{"accounts": [], "incomes": null, "expenses": [], "transfers": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { ref missing } if missing == &["incomes".to_string()]));
    }

    #[test]
    fn test_missing_keys_rejected() {
        let err = FinancialModel::from_json(r#"{"accounts": [], "incomes": []}"#).unwrap_err();
        match err {
            Error::InvalidFormat { missing } => {
                assert_eq!(missing, vec!["expenses".to_string(), "transfers".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_failed_import_keeps_model() {
        let mut model = FinancialModel::from_json(SNAPSHOT).unwrap();
        let before = model.clone();

        assert!(model.replace_from_json("not json").is_err());
        assert!(model.replace_from_json(r#"{"accounts": []}"#).is_err());
        assert_eq!(model, before);

        model
            .replace_from_json(r#"{"accounts": [], "incomes": [], "expenses": [], "transfers": []}"#)
            .unwrap();
        assert!(model.accounts.is_empty());
    }

    #[test]
    fn test_export_round_trip() {
        let model = FinancialModel::from_json(SNAPSHOT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let path = model.export_to_dir(dir.path(), date).unwrap();
        assert_eq!(path.file_name().unwrap(), "financial_model_2026-10-16.json");

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_export_omits_unused_variant_fields() {
        let model = FinancialModel::from_json(SNAPSHOT).unwrap();
        let json = model.to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let rent = &value["expenses"][0];
        assert_eq!(rent["type"], "Fixed");
        assert!(rent.get("principal").is_none());
        assert_eq!(value["incomes"][0]["depositAccountId"], "acc1");
    }
}
