/// Category labels offered to the entry form. Categories stay free-form; this
/// is only the suggested set.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];
