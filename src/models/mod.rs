mod budget;
mod category;
mod month;
mod transaction;

pub use budget::Budget;
pub use category::CategoryTable;
pub use month::MonthKey;
pub use transaction::{Transaction, TransactionType};
