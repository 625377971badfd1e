use crate::model::{Amount, Record, RecordId};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether money came in or went out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// The sign shown in front of an amount of this category.
    pub fn sign(&self) -> char {
        match self {
            Category::Income => '+',
            Category::Expense => '-',
        }
    }
}

/// One income or expense entry in the ledger.
///
/// The amount is always a magnitude; the direction comes from `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub(crate) id: RecordId,
    pub(crate) category: Category,
    pub(crate) amount: Amount,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
}

impl Transaction {
    pub fn new(
        id: RecordId,
        category: Category,
        amount: Amount,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            category,
            amount: amount.abs(),
            description: description.into(),
            date,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The magnitude of the transaction, even if a negative value was stored by hand.
    pub fn amount(&self) -> Amount {
        self.amount.abs()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for Transaction {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_text() {
        assert_eq!(Category::Expense.to_string(), "expense");
        assert_eq!("income".parse::<Category>().unwrap(), Category::Income);
        assert!("ingreso".parse::<Category>().is_err());
    }

    #[test]
    fn test_new_stores_magnitude() {
        let t = Transaction::new(
            RecordId::new("1"),
            Category::Expense,
            Amount::lenient("-15.50"),
            "Supplies",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        assert_eq!(t.amount().fixed(), "15.50");
    }

    #[test]
    fn test_storage_shape() {
        let json = r#"{"id":1717236000000,"category":"expense","amount":15.5,"description":"Supplies","date":"2025-06-01"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id().as_str(), "1717236000000");
        assert_eq!(t.category(), Category::Expense);
        assert_eq!(t.amount().fixed(), "15.50");
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

        let out = serde_json::to_value(&t).unwrap();
        assert_eq!(out["category"], "expense");
        assert_eq!(out["date"], "2025-06-01");
        assert_eq!(out["amount"], "15.5");
    }
}
