//! Types that represent the core data model, such as `TransactionRecord` and `Ledger`.
mod amount;
mod category;
mod ledger;
mod record;

pub use amount::{Amount, AmountError};
pub use category::{
    icons, CategoryKey, ExpenseCategory, IncomeCategory, TransactionKind, UNCATEGORIZED,
};
pub use ledger::Ledger;
pub use record::{TransactionDate, TransactionRecord};
