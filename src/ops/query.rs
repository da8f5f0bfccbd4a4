use crate::model::text::{Category, TextRecord};

/// Search string plus optional category, as set in the filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    pub search: String,
    /// `None` means every category
    pub category: Option<Category>,
}

impl TextFilter {
    pub fn new(search: impl Into<String>, category: Option<Category>) -> Self {
        TextFilter {
            search: search.into(),
            category,
        }
    }

    /// Whether a single record passes both predicates
    pub fn matches(&self, record: &TextRecord) -> bool {
        let needle = self.search.to_lowercase();
        matches_with(record, &needle, self.category)
    }

    /// Visible subset of `records`, in input order
    pub fn apply<'a>(&self, records: &'a [TextRecord]) -> Vec<&'a TextRecord> {
        filter_texts(records, &self.search, self.category)
    }

    /// Select `category`, or clear the selection if it is already selected
    pub fn toggle_category(&mut self, category: Category) {
        self.category = if self.category == Some(category) {
            None
        } else {
            Some(category)
        };
    }

    pub fn clear_category(&mut self) {
        self.category = None;
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.is_some()
    }
}

/// Records whose body contains `search` (case-insensitive) and whose
/// category equals `category` when one is given. Order is preserved.
pub fn filter_texts<'a>(
    records: &'a [TextRecord],
    search: &str,
    category: Option<Category>,
) -> Vec<&'a TextRecord> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| matches_with(record, &needle, category))
        .collect()
}

fn matches_with(record: &TextRecord, lowered_needle: &str, category: Option<Category>) -> bool {
    let matches_type = category.is_none_or(|c| record.category == c);
    matches_type && record.body.to_lowercase().contains(lowered_needle)
}

/// Number of records per category, in category order
pub fn category_counts(records: &[TextRecord]) -> Vec<(Category, usize)> {
    Category::ALL
        .iter()
        .map(|&c| (c, records.iter().filter(|r| r.category == c).count()))
        .collect()
}
