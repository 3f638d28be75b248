use super::TransactionType;

const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments", "Gifts", "Other"];

const EXPENSE_CATEGORIES: &[&str] = &[
    "Housing",
    "Food",
    "Transport",
    "Entertainment",
    "Healthcare",
    "Education",
    "Shopping",
    "Other",
];

/// Allowed categories per transaction type.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    income: Vec<String>,
    expense: Vec<String>,
}

impl CategoryTable {
    pub fn allowed(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    /// Find a category by name (case-insensitive) and return its canonical spelling.
    pub fn resolve(&self, kind: TransactionType, name: &str) -> Option<&str> {
        let lower = name.trim().to_lowercase();
        self.allowed(kind)
            .iter()
            .find(|c| c.to_lowercase() == lower)
            .map(String::as_str)
    }

    /// Canonical spelling of `name` under either type.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        TransactionType::all()
            .iter()
            .find_map(|&kind| self.resolve(kind, name))
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            income: INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            expense: EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
