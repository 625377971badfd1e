//! Pure operations over in-memory collections.

use crate::model::{Amount, Category, Record, Transaction};
use serde::Serialize;

/// Where a new record goes in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Newest first, as the ledger is shown.
    Front,
    /// Insertion order.
    Back,
}

/// Adds `record` to `collection`.
pub fn append<T>(collection: &mut Vec<T>, record: T, placement: Placement) {
    match placement {
        Placement::Front => collection.insert(0, record),
        Placement::Back => collection.push(record),
    }
}

/// Removes every record whose identifier is `id`. Returns how many were removed, which is zero
/// for an unknown identifier.
pub fn remove_by_id<T>(collection: &mut Vec<T>, id: &str) -> usize
where
    T: Record,
{
    let before = collection.len();
    collection.retain(|r| r.id().as_str() != id);
    before - collection.len()
}

/// Income, expense and their difference over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
}

/// Sums transactions by category. Amounts count as magnitudes, and an amount that could not be
/// read from storage has already been turned into zero.
pub fn aggregate<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let (mut income, mut expense) = (Amount::ZERO, Amount::ZERO);
    for t in transactions {
        match t.category() {
            Category::Income => income = income + t.amount(),
            Category::Expense => expense = expense + t.amount(),
        }
    }
    Totals {
        total_income: income,
        total_expense: expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;
    use chrono::NaiveDate;

    fn txn(id: &str, category: Category, amount: &str) -> Transaction {
        Transaction::new(
            RecordId::new(id),
            category,
            Amount::lenient(amount),
            "x",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_append_front_and_back() {
        let mut v = vec![1, 2];
        append(&mut v, 0, Placement::Front);
        append(&mut v, 3, Placement::Back);
        assert_eq!(v, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut v = vec![
            txn("a", Category::Income, "1"),
            txn("b", Category::Income, "2"),
        ];
        assert_eq!(remove_by_id(&mut v, "a"), 1);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].id().as_str(), "b");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut v = vec![
            txn("a", Category::Income, "1"),
            txn("b", Category::Expense, "2"),
        ];
        let before = v.clone();
        assert_eq!(remove_by_id(&mut v, "zzz"), 0);
        assert_eq!(v, before);
    }

    #[test]
    fn test_aggregate() {
        let v = vec![
            txn("1", Category::Income, "100"),
            txn("2", Category::Expense, "15.50"),
        ];
        let totals = aggregate(&v);
        assert_eq!(totals.total_income.fixed(), "100.00");
        assert_eq!(totals.total_expense.fixed(), "15.50");
        assert_eq!(totals.balance.fixed(), "84.50");
    }

    #[test]
    fn test_aggregate_empty() {
        let totals = aggregate(&Vec::<Transaction>::new());
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_aggregate_tolerates_malformed_amounts() {
        let json = r#"[
            {"id":1,"category":"income","amount":"abc","description":"x","date":"2025-06-01"},
            {"id":2,"category":"income","amount":null,"description":"x","date":"2025-06-01"},
            {"id":3,"category":"expense","amount":"-5","description":"x","date":"2025-06-01"}
        ]"#;
        let v: Vec<Transaction> = serde_json::from_str(json).unwrap();
        let totals = aggregate(&v);
        assert!(totals.total_income.is_zero());
        assert_eq!(totals.total_expense.fixed(), "5.00");
        assert_eq!(totals.balance.fixed(), "-5.00");
    }

    #[test]
    fn test_balance_is_income_minus_expense() {
        let v = vec![
            txn("1", Category::Expense, "40"),
            txn("2", Category::Income, "10.25"),
            txn("3", Category::Expense, "0.25"),
        ];
        let totals = aggregate(&v);
        assert_eq!(totals.balance, totals.total_income - totals.total_expense);
        assert!(totals.balance.is_negative());
    }
}
