//! User-driven view state: sort, filters, pagination, selection

use std::collections::BTreeSet;

use super::SortRule;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// One entry of the active sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Column key to sort by.
    pub key: String,
    /// Direction for this key.
    pub direction: Direction,
}

impl SortKey {
    /// Creates an ascending sort key.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort key.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }
}

/// Current page index and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index. Clamped by the engine against the filtered
    /// page count on every snapshot.
    pub page_index: usize,
    /// Rows per page; never zero.
    pub page_size: usize,
}

/// Default rows per page, matching the dashboard's page-size selector.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The transient, user-driven state of one mounted table view.
///
/// All mutation goes through intent methods so the invariants (non-empty
/// sort under [`SortRule::RequireSorted`], no filter-for-empty-string
/// entries) are enforced at a single point. Every intent is a total
/// function: out-of-range values clamp, nothing errors.
///
/// State lives only as long as the mounted view; it is never persisted.
#[derive(Debug, Clone)]
pub struct ViewState {
    sort_rule: SortRule,
    sort: Vec<SortKey>,
    column_filters: Vec<(String, String)>,
    global_filter: String,
    pagination: Pagination,
    selection: BTreeSet<String>,
}

impl ViewState {
    /// Creates the initial state for a view with the given sort rule.
    ///
    /// Under `RequireSorted` the state starts sorted by the default key
    /// ascending.
    pub fn new(sort_rule: SortRule) -> Self {
        let sort = match sort_rule {
            SortRule::Unsorted => Vec::new(),
            SortRule::RequireSorted { default_key } => vec![SortKey::asc(default_key)],
        };
        Self {
            sort_rule,
            sort,
            column_filters: Vec::new(),
            global_filter: String::new(),
            pagination: Pagination {
                page_index: 0,
                page_size: DEFAULT_PAGE_SIZE,
            },
            selection: BTreeSet::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The active sort order.
    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    /// The active per-column filters.
    pub fn column_filters(&self) -> &[(String, String)] {
        &self.column_filters
    }

    /// The global search string.
    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Current pagination.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// The selected row ids.
    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// Returns `true` if the row with `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    // =========================================================================
    // Sort intents
    // =========================================================================

    /// Replaces the sort order.
    ///
    /// Under [`SortRule::RequireSorted`], an empty `next` reapplies the
    /// previous primary key ascending instead of clearing.
    pub fn set_sort(&mut self, next: Vec<SortKey>) {
        if next.is_empty() {
            if let SortRule::RequireSorted { default_key } = self.sort_rule {
                let key = self
                    .sort
                    .first()
                    .map(|s| s.key.clone())
                    .unwrap_or_else(|| default_key.to_string());
                self.sort = vec![SortKey::asc(key)];
                return;
            }
        }
        self.sort = next;
    }

    /// Header-click cycle on one column: unsorted → ascending → descending
    /// → cleared (or back to ascending when sorting is required).
    pub fn toggle_sort(&mut self, key: &str) {
        match self.sort.first() {
            Some(primary) if primary.key == key => match primary.direction {
                Direction::Asc => self.set_sort(vec![SortKey::desc(key)]),
                Direction::Desc => self.set_sort(Vec::new()),
            },
            _ => self.set_sort(vec![SortKey::asc(key)]),
        }
    }

    // =========================================================================
    // Filter intents
    // =========================================================================

    /// Replaces or inserts the filter for `key`.
    ///
    /// An empty value removes the entry entirely, so "no filter" stays
    /// distinguishable from "filter for the empty string".
    pub fn set_column_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.column_filters.retain(|(k, _)| *k != key);
        if !value.is_empty() {
            self.column_filters.push((key, value));
        }
    }

    /// Replaces the global search string.
    ///
    /// Pagination is not reset here; the engine's clamp step moves an
    /// out-of-range page back into bounds on the next snapshot.
    pub fn set_global_filter(&mut self, value: impl Into<String>) {
        self.global_filter = value.into();
    }

    // =========================================================================
    // Pagination intents
    // =========================================================================

    /// Requests a page index; the engine clamps it against the filtered
    /// page count on the next snapshot.
    pub fn set_page_index(&mut self, index: usize) {
        self.pagination.page_index = index;
    }

    /// Changes the page size, moving the page index so the first currently
    /// visible row stays visible.
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        let first_visible = self.pagination.page_index * self.pagination.page_size;
        self.pagination.page_index = first_visible / size;
        self.pagination.page_size = size;
    }

    // =========================================================================
    // Selection intents
    // =========================================================================

    /// Selects or deselects one row.
    pub fn select_row(&mut self, id: impl Into<String>, selected: bool) {
        let id = id.into();
        if selected {
            self.selection.insert(id);
        } else {
            self.selection.remove(&id);
        }
    }

    /// Selects or deselects every id in `ids` (the current page).
    pub fn select_many<I, S>(&mut self, ids: I, selected: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.select_row(id, selected);
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // Rebase (engine write-back)
    // =========================================================================

    /// Writes back the engine's derived corrections: the pruned selection
    /// and the clamped page index.
    ///
    /// Pruning is permanent; clearing a filter later does not resurrect
    /// ids that were pruned while it was active.
    pub(crate) fn rebase(&mut self, selection: BTreeSet<String>, page_index: usize) {
        self.selection = selection;
        self.pagination.page_index = page_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_required_sort_reapplies_ascending() {
        let mut state = ViewState::new(SortRule::RequireSorted { default_key: "name" });
        assert_eq!(state.sort(), &[SortKey::asc("name")]);

        state.toggle_sort("name"); // asc -> desc
        assert_eq!(state.sort(), &[SortKey::desc("name")]);

        state.toggle_sort("name"); // desc -> would clear, falls back to asc
        assert_eq!(state.sort(), &[SortKey::asc("name")]);
    }

    #[test]
    fn optional_sort_can_be_cleared() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.toggle_sort("price");
        state.toggle_sort("price");
        assert_eq!(state.sort(), &[SortKey::desc("price")]);
        state.toggle_sort("price");
        assert!(state.sort().is_empty());
    }

    #[test]
    fn empty_filter_value_removes_entry() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_column_filter("name", "asp");
        assert_eq!(state.column_filters().len(), 1);
        state.set_column_filter("name", "");
        assert!(state.column_filters().is_empty());
    }

    #[test]
    fn page_size_change_keeps_first_visible_row() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_page_size(10);
        state.set_page_index(3); // rows 30..40
        state.set_page_size(25);
        assert_eq!(state.pagination().page_index, 1); // row 30 lives on page 1
        state.set_page_size(100);
        assert_eq!(state.pagination().page_index, 0);
    }
}
