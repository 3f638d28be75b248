use rust_decimal::Decimal;

use super::MonthKey;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub category: String,
    pub month: MonthKey,
    pub amount: Decimal,
}

impl Budget {
    pub fn new(category: String, month: MonthKey, amount: Decimal) -> Self {
        Self {
            category,
            month,
            amount,
        }
    }
}
