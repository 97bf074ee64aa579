//! Category id to label table.

/// Label reported for ids the table does not cover.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Labels indexed by category id (0..=24), in the order the classifier was
/// trained with.
pub const CATEGORIES: [&str; 25] = [
    "Advocate",
    "Arts",
    "Automation Testing",
    "Blockchain",
    "Business Analyst",
    "Civil Engineer",
    "Data Science",
    "Database",
    "DevOps Engineer",
    "DotNet Developer",
    "ETL Developer",
    "Electrical Engineering",
    "HR",
    "Hadoop",
    "Health and fitness",
    "Java Developer",
    "Mechanical Engineer",
    "Network Security Engineer",
    "Operations Manager",
    "PMO",
    "Python Developer",
    "SAP Developer",
    "Sales",
    "Testing",
    "Web Designing",
];

/// Label for a category id. Negative and out-of-range ids give `"Unknown"`.
pub fn resolve_category(id: i64) -> &'static str {
    usize::try_from(id)
        .ok()
        .and_then(|i| CATEGORIES.get(i))
        .copied()
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// All `(id, label)` pairs.
pub fn categories() -> impl Iterator<Item = (i64, &'static str)> {
    CATEGORIES.iter().enumerate().map(|(i, label)| (i as i64, *label))
}

/// Whether `label` is one of the 25 table labels.
pub fn is_category_label(label: &str) -> bool {
    CATEGORIES.contains(&label)
}
