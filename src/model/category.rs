use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// The bucket that records without a category are totalled under.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Whether a record is money coming in or going out.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

impl TransactionKind {
    /// Returns true if `category` is one of the fixed tags for this kind of record.
    pub fn is_known_category(&self, category: &str) -> bool {
        match self {
            TransactionKind::Income => category.parse::<IncomeCategory>().is_ok(),
            TransactionKind::Expense => category.parse::<ExpenseCategory>().is_ok(),
        }
    }

    /// The font-awesome class of the icon shown next to `category`, if the category is known.
    pub fn category_icon(&self, category: &str) -> Option<&'static str> {
        match self {
            TransactionKind::Income => category.parse::<IncomeCategory>().ok().map(|c| c.icon()),
            TransactionKind::Expense => {
                category.parse::<ExpenseCategory>().ok().map(|c| c.icon())
            }
        }
    }
}

/// The fixed set of income categories the entry forms offer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Salary,
    Freelancing,
    Investments,
    Stocks,
    Bitcoin,
    Bank,
    Youtube,
    Other,
}

serde_plain::derive_display_from_serialize!(IncomeCategory);
serde_plain::derive_fromstr_from_deserialize!(IncomeCategory);

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 8] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelancing,
        IncomeCategory::Investments,
        IncomeCategory::Stocks,
        IncomeCategory::Bitcoin,
        IncomeCategory::Bank,
        IncomeCategory::Youtube,
        IncomeCategory::Other,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            IncomeCategory::Salary => icons::MONEY,
            IncomeCategory::Freelancing => icons::FREELANCE,
            IncomeCategory::Investments => icons::STOCKS,
            IncomeCategory::Stocks => icons::USERS,
            IncomeCategory::Bitcoin => icons::BITCOIN,
            IncomeCategory::Bank => icons::CARD,
            IncomeCategory::Youtube => icons::YOUTUBE,
            IncomeCategory::Other => icons::PIGGY,
        }
    }
}

/// The fixed set of expense categories the entry forms offer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Education,
    Groceries,
    Health,
    Subscriptions,
    Takeaways,
    Clothing,
    Travelling,
    Other,
}

serde_plain::derive_display_from_serialize!(ExpenseCategory);
serde_plain::derive_fromstr_from_deserialize!(ExpenseCategory);

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Education,
        ExpenseCategory::Groceries,
        ExpenseCategory::Health,
        ExpenseCategory::Subscriptions,
        ExpenseCategory::Takeaways,
        ExpenseCategory::Clothing,
        ExpenseCategory::Travelling,
        ExpenseCategory::Other,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            ExpenseCategory::Education => icons::BOOK,
            ExpenseCategory::Groceries => icons::FOOD,
            ExpenseCategory::Health => icons::MEDICAL,
            ExpenseCategory::Subscriptions => icons::TV,
            ExpenseCategory::Takeaways => icons::TAKEAWAY,
            ExpenseCategory::Clothing => icons::CLOTHING,
            ExpenseCategory::Travelling => icons::FREELANCE,
            ExpenseCategory::Other => icons::CIRCLE,
        }
    }
}

/// The key category totals are grouped under: the record's category text verbatim, or the
/// reserved bucket when the record has none. Named keys are not checked against the fixed
/// enumerations.
///
/// The reserved bucket is its own variant, so a record whose category text happens to be
/// `"uncategorized"` is never totalled together with records that have no category.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CategoryKey {
    Named(String),
    Uncategorized,
}

impl CategoryKey {
    pub fn new(category: impl Into<String>) -> Self {
        CategoryKey::Named(category.into())
    }

    /// Picks the bucket for an optional category. Missing or blank categories all share the
    /// reserved bucket.
    pub fn for_category(category: Option<&str>) -> Self {
        match category {
            Some(c) if !c.trim().is_empty() => Self::new(c),
            _ => Self::uncategorized(),
        }
    }

    pub fn uncategorized() -> Self {
        CategoryKey::Uncategorized
    }

    pub fn is_uncategorized(&self) -> bool {
        matches!(self, CategoryKey::Uncategorized)
    }

    /// The label shown for this key. The reserved bucket is labelled [`UNCATEGORIZED`].
    pub fn as_str(&self) -> &str {
        match self {
            CategoryKey::Named(name) => name,
            CategoryKey::Uncategorized => UNCATEGORIZED,
        }
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        CategoryKey::new(value)
    }
}

/// Font-awesome classes for the category glyphs.
pub mod icons {
    pub const MONEY: &str = "fa-solid fa-money-bill";
    pub const FREELANCE: &str = "fa-solid fa-earth-americas";
    pub const STOCKS: &str = "fa-solid fa-arrow-trend-up";
    pub const USERS: &str = "fa-solid fa-users-between-lines";
    pub const BITCOIN: &str = "fa-brands fa-bitcoin";
    pub const CARD: &str = "fa-brands fa-cc-visa";
    pub const YOUTUBE: &str = "fa-brands fa-youtube";
    pub const PIGGY: &str = "fa-solid fa-piggy-bank";
    pub const BOOK: &str = "fa-solid fa-book-open";
    pub const FOOD: &str = "fa-solid fa-bowl-food";
    pub const MEDICAL: &str = "fa-solid fa-briefcase-medical";
    pub const TV: &str = "fa-solid fa-tv";
    pub const TAKEAWAY: &str = "fa-solid fa-utensils";
    pub const CLOTHING: &str = "fa-solid fa-shirt";
    pub const CIRCLE: &str = "fa-solid fa-circle-dot";
}
