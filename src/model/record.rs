use crate::model::{Amount, CategoryKey, TransactionKind};
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// The point in time a transaction happened.
///
/// Parses either an RFC 3339 timestamp, which is what the backend sends, e.g.
/// `2024-01-01T00:00:00.000Z`, or a bare `YYYY-MM-DD` date, which is taken as midnight UTC.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TransactionDate(DateTime<Utc>);

impl TransactionDate {
    pub fn new(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// Midnight UTC on the given day. Returns `None` if the day does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }

    pub fn value(&self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for TransactionDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        let day = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Unable to parse '{s}' as a date"))?;
        match day.and_hms_opt(0, 0, 0) {
            Some(dt) => Ok(Self(dt.and_utc())),
            None => bail!("Unable to construct midnight for '{s}'"),
        }
    }
}

impl Display for TransactionDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for TransactionDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TransactionDate::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One income or expense entry as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionRecord {
    #[serde(alias = "_id", default)]
    pub(crate) id: String,
    /// A missing or `null` title reads as an empty one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) title: String,
    /// A record without an amount contributes nothing.
    #[serde(default)]
    pub(crate) amount: Amount,
    pub(crate) date: TransactionDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(crate) kind: Option<TransactionKind>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TransactionRecord {
    /// Creates a record with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        amount: impl Into<Amount>,
        date: TransactionDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            amount: amount.into(),
            date,
            category: Some(category.into()),
            description: None,
            kind: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn without_category(mut self) -> Self {
        self.category = None;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> TransactionDate {
        self.date
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The bucket this record is totalled under.
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::for_category(self.category())
    }

    /// The description, treating an empty string the same as no description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_date_parses_rfc3339_and_plain() {
        let a = TransactionDate::from_str("2024-01-02T00:00:00.000Z").unwrap();
        let b = TransactionDate::from_str("2024-01-02").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, TransactionDate::from_ymd(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_date_with_offset_is_normalized_to_utc() {
        let a = TransactionDate::from_str("2024-01-02T05:30:00+05:30").unwrap();
        assert_eq!(a, TransactionDate::from_ymd(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert!(TransactionDate::from_str("yesterday").is_err());
        assert!(TransactionDate::from_str("2024-02-30").is_err());
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "title": "January pay",
            "amount": 45000,
            "type": "income",
            "date": "2024-01-31T00:00:00.000Z",
            "category": "salary",
            "description": "",
            "createdAt": "2024-02-01T10:00:00.000Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(record.amount().value(), Decimal::from(45000));
        assert_eq!(record.kind(), Some(TransactionKind::Income));
        assert_eq!(record.category(), Some("salary"));
        assert_eq!(record.description(), None);
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{"date": "2024-03-01"}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert!(record.amount().is_zero());
        assert!(record.category_key().is_uncategorized());
        assert_eq!(record.kind(), None);
    }

    #[test]
    fn test_deserialize_null_fields() {
        let json = r#"{
            "title": null,
            "amount": null,
            "date": "2024-03-01",
            "category": null,
            "description": null
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title(), "");
        assert!(record.amount().is_zero());
        assert!(record.category_key().is_uncategorized());
        assert_eq!(record.description(), None);
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        let date = TransactionDate::from_ymd(2024, 1, 1).unwrap();
        let a = TransactionRecord::new("a", 1u32, date, "bank");
        let b = TransactionRecord::new("b", 1u32, date, "bank");
        assert_ne!(a.id(), b.id());
    }
}
