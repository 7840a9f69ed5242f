//! Search filters for task listings.

use super::{TaskDate, TaskRecord};

/// Row filter applied by task listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Tasks due on exactly this date.
    Date(TaskDate),
    /// Tasks whose title or comment contains the text, ignoring case.
    Text(String),
}

impl TaskFilter {
    /// Interprets a free-form search string.
    ///
    /// A `DD.MM.YYYY` date selects tasks due that day; any other non-blank
    /// value is matched as text. Blank input yields no filter.
    #[must_use]
    pub fn from_search(search: &str) -> Option<Self> {
        let trimmed = search.trim();
        if trimmed.is_empty() {
            return None;
        }
        let filter = TaskDate::parse_search(trimmed)
            .map_or_else(|| Self::Text(trimmed.to_owned()), Self::Date);
        Some(filter)
    }

    /// Returns whether a stored row passes the filter.
    #[must_use]
    pub fn matches(&self, record: &TaskRecord) -> bool {
        match self {
            Self::Date(date) => record.date == date.to_string(),
            Self::Text(text) => {
                let needle = text.to_lowercase();
                record.title.to_lowercase().contains(&needle)
                    || record.comment.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Listing request handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Maximum number of rows returned.
    pub limit: u32,
    /// Optional row filter.
    pub filter: Option<TaskFilter>,
}

impl TaskQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            filter: None,
        }
    }

    /// Restricts the query to rows matching `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<TaskFilter>) -> Self {
        self.filter = filter;
        self
    }
}
