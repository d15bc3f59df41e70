use crate::model::{Amount, TransactionKind, TransactionRecord};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A read-only snapshot of everything the charts are drawn from.
///
/// The lists keep the order the backend returned them in. Nothing derived from a `Ledger` is
/// cached; every report is recomputed from it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Ledger {
    incomes: Vec<TransactionRecord>,
    expenses: Vec<TransactionRecord>,
}

/// The two shapes a ledger file may take: the split shape the app state holds, or the flat list
/// of records where each record says whether it is an income or an expense.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LedgerFile {
    Split {
        #[serde(default)]
        incomes: Vec<TransactionRecord>,
        #[serde(default)]
        expenses: Vec<TransactionRecord>,
    },
    Flat(Vec<TransactionRecord>),
}

impl Ledger {
    /// Creates a ledger after checking that no record carries a negative amount and that each
    /// list's total fits in an [`Amount`]. Every per-category sum is then
    /// bounded by that total.
    pub fn new(incomes: Vec<TransactionRecord>, expenses: Vec<TransactionRecord>) -> Result<Self> {
        for (kind, records) in [
            (TransactionKind::Income, &incomes),
            (TransactionKind::Expense, &expenses),
        ] {
            if let Some(bad) = records.iter().find(|r| r.amount().is_negative()) {
                bail!(
                    "The {kind} record '{}' ({}) has a negative amount {}",
                    bad.title(),
                    bad.id(),
                    bad.amount()
                );
            }
            let total = records
                .iter()
                .try_fold(Amount::ZERO, |sum, r| sum.checked_add(r.amount()));
            if total.is_none() {
                bail!("The {kind} amounts add up to more than the largest supported amount");
            }
        }
        Ok(Self { incomes, expenses })
    }

    /// Parses a ledger from JSON in either the split or the flat shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: LedgerFile =
            serde_json::from_str(json).context("Unable to parse the ledger JSON")?;
        match file {
            LedgerFile::Split { incomes, expenses } => Self::new(incomes, expenses),
            LedgerFile::Flat(records) => Self::from_records(records),
        }
    }

    /// Loads a ledger from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = utils::read(path).await?;
        let ledger = Self::from_json(&json)
            .with_context(|| format!("Invalid ledger file {}", path.display()))?;
        debug!(
            "Loaded {} incomes and {} expenses from {}",
            ledger.incomes.len(),
            ledger.expenses.len(),
            path.display()
        );
        Ok(ledger)
    }

    /// Partitions a flat list of records by their `type`, keeping relative order.
    pub fn from_records(records: impl IntoIterator<Item = TransactionRecord>) -> Result<Self> {
        let mut incomes = Vec::new();
        let mut expenses = Vec::new();
        for record in records {
            match record.kind() {
                Some(TransactionKind::Income) => incomes.push(record),
                Some(TransactionKind::Expense) => expenses.push(record),
                None => bail!(
                    "The record '{}' ({}) does not say whether it is an income or an expense",
                    record.title(),
                    record.id()
                ),
            }
        }
        Self::new(incomes, expenses)
    }

    pub fn incomes(&self) -> &[TransactionRecord] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[TransactionRecord] {
        &self.expenses
    }

    pub fn records(&self, kind: TransactionKind) -> &[TransactionRecord] {
        match kind {
            TransactionKind::Income => self.incomes(),
            TransactionKind::Expense => self.expenses(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}
