//! Per-category totals over a list of records.

use crate::model::{Amount, CategoryKey, TransactionKind, TransactionRecord, UNCATEGORIZED};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Sums of record amounts keyed by category.
///
/// Keys are exactly the categories that appeared in the input, in the order they first appeared.
/// That order is what bar charts use for their labels and colours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(CategoryKey, Amount)>,
    index: HashMap<CategoryKey, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the bucket for `key`, creating the bucket at the end if it is new.
    pub fn add(&mut self, key: CategoryKey, amount: Amount) {
        match self.index.get(&key) {
            Some(&ix) => self.entries[ix].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// The total for a named category.
    pub fn get(&self, category: &str) -> Option<Amount> {
        self.get_key(&CategoryKey::new(category))
    }

    /// The total of the reserved bucket for records without a category.
    pub fn uncategorized(&self) -> Option<Amount> {
        self.get_key(&CategoryKey::Uncategorized)
    }

    pub fn get_key(&self, key: &CategoryKey) -> Option<Amount> {
        self.index.get(key).map(|&ix| self.entries[ix].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, Amount)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = Amount> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// The sum over every bucket.
    pub fn total(&self) -> Amount {
        self.values().sum()
    }

    /// Keys that are neither one of the fixed categories for `kind` nor the uncategorized
    /// bucket. These have no icon or label anywhere else in the app.
    pub fn unknown_keys(&self, kind: TransactionKind) -> Vec<&CategoryKey> {
        self.keys()
            .filter(|k| matches!(k, CategoryKey::Named(c) if !kind.is_known_category(c)))
            .collect()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // A named category spelled like the reserved label would otherwise overwrite it.
        if self.uncategorized().is_some() && self.get(UNCATEGORIZED).is_some() {
            return Err(S::Error::custom(format!(
                "The category '{UNCATEGORIZED}' clashes with the bucket for records without a \
                category"
            )));
        }
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, amount) in &self.entries {
            map.serialize_entry(key, amount)?;
        }
        map.end()
    }
}

/// Folds `records` left to right into per-category totals.
///
/// Empty input gives empty totals. Records without a category land in the `uncategorized`
/// bucket; records with a category outside the fixed enumerations get a bucket of their own.
pub fn aggregate_by_category<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> CategoryTotals {
    records
        .into_iter()
        .fold(CategoryTotals::new(), |mut totals, record| {
            totals.add(record.category_key(), record.amount());
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{expense, income};
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;

    fn amt(n: i64) -> Amount {
        Amount::new(Decimal::from(n))
    }

    #[test]
    fn test_empty() {
        let totals = aggregate_by_category(&[]);
        assert!(totals.is_empty());
        assert_eq!(totals.total(), Amount::ZERO);
        assert_eq!(serde_json::to_string(&totals).unwrap(), "{}");
    }

    #[test]
    fn test_salary_and_bank() {
        let records = vec![
            income(100, 1, "salary"),
            income(50, 2, "salary"),
            income(30, 3, "bank"),
        ];
        let totals = aggregate_by_category(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("salary"), Some(amt(150)));
        assert_eq!(totals.get("bank"), Some(amt(30)));
        assert_eq!(totals.get("stocks"), None);
    }

    #[test]
    fn test_first_occurrence_order() {
        let records = vec![
            expense(5, 1, "health"),
            expense(7, 2, "groceries"),
            expense(1, 3, "health"),
            expense(2, 4, "clothing"),
        ];
        let totals = aggregate_by_category(&records);
        let keys: Vec<&str> = totals.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["health", "groceries", "clothing"]);
        assert_eq!(
            serde_json::to_string(&totals).unwrap(),
            r#"{"health":6.0,"groceries":7.0,"clothing":2.0}"#
        );
    }

    #[test]
    fn test_sum_and_partition() {
        let records = vec![
            expense(12, 1, "takeaways"),
            expense(40, 2, "education"),
            expense(3, 3, "takeaways"),
            expense(9, 4, "subscriptions"),
            expense(0, 5, "education"),
        ];
        let totals = aggregate_by_category(&records);

        let input_sum: Amount = records.iter().map(|r| r.amount()).sum();
        assert_eq!(totals.total(), input_sum);

        let distinct: BTreeSet<&str> = records.iter().filter_map(|r| r.category()).collect();
        let keys: BTreeSet<&str> = totals.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, distinct);

        for (key, value) in totals.iter() {
            let expected: Amount = records
                .iter()
                .filter(|r| r.category() == Some(key.as_str()))
                .map(|r| r.amount())
                .sum();
            assert_eq!(value, expected, "bucket {key}");
        }
    }

    #[test]
    fn test_missing_category_goes_to_reserved_bucket() {
        let records = vec![
            income(10, 1, "salary").without_category(),
            income(20, 2, ""),
            income(5, 3, "salary"),
        ];
        let totals = aggregate_by_category(&records);
        assert_eq!(totals.uncategorized(), Some(amt(30)));
        assert_eq!(totals.get(UNCATEGORIZED), None);
        assert_eq!(totals.get("salary"), Some(amt(5)));
        assert_eq!(totals.get(""), None);
    }

    #[test]
    fn test_unknown_categories_keep_their_own_bucket_and_are_flagged() {
        // Nothing stops the backend from storing a category the forms never offer. It is totalled
        // like any other, but it has no icon, so it is reported as unknown.
        let records = vec![
            income(10, 1, "salary"),
            income(20, 2, "lottery"),
            income(1, 3, "Salary"),
            income(4, 4, "salary").without_category(),
        ];
        let totals = aggregate_by_category(&records);
        assert_eq!(totals.get("lottery"), Some(amt(20)));
        assert_eq!(totals.get("Salary"), Some(amt(1)));
        let unknown: Vec<&str> = totals
            .unknown_keys(TransactionKind::Income)
            .into_iter()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(unknown, vec!["lottery", "Salary"]);
    }

    #[test]
    fn test_literal_uncategorized_category_stays_apart() {
        let records = vec![
            income(10, 1, UNCATEGORIZED),
            income(5, 2, "salary").without_category(),
        ];
        let totals = aggregate_by_category(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get(UNCATEGORIZED), Some(amt(10)));
        assert_eq!(totals.uncategorized(), Some(amt(5)));
        let unknown: Vec<&CategoryKey> = totals.unknown_keys(TransactionKind::Income);
        assert_eq!(unknown, vec![&CategoryKey::new(UNCATEGORIZED)]);
        assert!(serde_json::to_string(&totals)
            .unwrap_err()
            .to_string()
            .contains("clashes"));
    }

    #[test]
    fn test_literal_uncategorized_alone_serializes() {
        let totals = aggregate_by_category(&[income(10, 1, UNCATEGORIZED)]);
        assert_eq!(
            serde_json::to_string(&totals).unwrap(),
            r#"{"uncategorized":10.0}"#
        );
    }

    #[test]
    fn test_income_category_is_unknown_for_expenses() {
        let totals = aggregate_by_category(&[expense(10, 1, "salary")]);
        assert_eq!(totals.unknown_keys(TransactionKind::Expense).len(), 1);
        assert!(totals.unknown_keys(TransactionKind::Income).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            income(100, 1, "salary"),
            income(30, 2, "bank"),
            income(12, 3, "youtube"),
        ];
        let first = aggregate_by_category(&records);
        let second = aggregate_by_category(&records);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
