pub mod expense;
pub mod money;

pub use expense::{Expense, ExpenseOverrides, UNCATEGORIZED, UNKNOWN_VENDOR};
pub use money::{Money, MoneyError};
