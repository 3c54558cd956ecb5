//! Pagination window and empty-state presentation.

/// Position of the loaded page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Index of the first row on the page.
    pub offset: u64,
    /// Page size.
    pub limit: u32,
    /// Rows matching the query across all pages.
    pub total: u64,
}

impl PageWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(offset: u64, limit: u32, total: u64) -> Self {
        Self {
            offset,
            limit,
            total,
        }
    }

    /// Whether the "Previous" control is enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// Whether the "Next" control is enabled.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.end_exclusive() < self.total
    }

    /// Offset of the following page.
    #[must_use]
    pub fn next_offset(&self) -> u64 {
        self.end_exclusive()
    }

    /// Offset of the preceding page, never below zero.
    #[must_use]
    pub fn previous_offset(&self) -> u64 {
        self.offset.saturating_sub(u64::from(self.limit))
    }

    /// Range label such as `21 - 25 of 25`.
    #[must_use]
    pub fn range_label(&self) -> String {
        let first = self.offset.saturating_add(1);
        let last = self.end_exclusive().min(self.total);
        format!("{first} - {last} of {}", self.total)
    }

    /// Result count label shown beneath the search box.
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.total {
            0 => "No scans found".to_owned(),
            1 => "1 scan found".to_owned(),
            total => format!("{total} scans found"),
        }
    }

    fn end_exclusive(&self) -> u64 {
        self.offset.saturating_add(u64::from(self.limit))
    }
}

/// Why the history list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// A search query is active and nothing matched.
    NoMatches,
    /// Nothing has been analysed yet.
    NoScansYet,
}

impl EmptyState {
    /// Heading shown for both variants.
    pub const HEADING: &'static str = "No Scans Yet";

    /// Picks the variant for the current query. A blank query counts as no
    /// search, matching what is sent to the backend.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.trim().is_empty() {
            Self::NoScansYet
        } else {
            Self::NoMatches
        }
    }

    /// Explanatory text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoMatches => "No scans match your search query",
            Self::NoScansYet => "Start by analyzing a merge request on the Analysis tab",
        }
    }
}
