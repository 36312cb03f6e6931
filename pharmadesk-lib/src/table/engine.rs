//! The pure filter → sort → paginate → aggregate pipeline

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::TableRow;

use super::ColumnPolicy;
use super::Direction;
use super::ViewState;

/// Tri-state of the header select-all control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Nothing in the filtered set is selected.
    Unchecked,
    /// Every row on the current page is selected.
    Checked,
    /// Some filtered rows are selected, but not the whole page.
    Indeterminate,
}

/// The derived visible slice and its statistics.
///
/// `Snapshot::compute` is a pure function of the row model, the column
/// policy and the view state: identical inputs always yield an identical
/// snapshot. All mutable state stays in [`ViewState`]; the snapshot only
/// reports the corrections (pruned selection, clamped page index) that the
/// owning view writes back.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    /// The rows of the current (clamped) page, filtered and sorted.
    pub rows: Vec<R>,
    /// Page index after clamping against the filtered page count.
    pub page_index: usize,
    /// `ceil(filtered_count / page_size)`.
    pub page_count: usize,
    /// Rows surviving all filters.
    pub filtered_count: usize,
    /// Rows in the unfiltered model.
    pub total_count: usize,
    /// Selection pruned to ids present in the filtered set.
    pub selection: BTreeSet<String>,
    /// Number of selected rows within the filtered set.
    pub selected_count: usize,
    /// `true` if every row on the current page is selected.
    pub all_on_page_selected: bool,
    /// `true` if every filtered row is selected.
    pub all_filtered_selected: bool,
    /// Tri-state for the select-all control.
    pub select_all: SelectAllState,
}

impl<R: TableRow> Snapshot<R> {
    /// Runs the pipeline: column filters, global filter, stable sort,
    /// pagination clamp, selection aggregation.
    pub fn compute(rows: &[R], policy: &ColumnPolicy<R>, state: &ViewState) -> Self {
        let total_count = rows.len();

        // Per-column filters AND-ed together, then the global filter.
        // Matching is a case-insensitive substring test on the column's
        // display text, so an empty filter value passes every row.
        let column_filters: Vec<_> = state
            .column_filters()
            .iter()
            .filter_map(|(key, value)| {
                let column = policy.column(key)?;
                column
                    .filterable
                    .then(|| (column, value.to_lowercase()))
            })
            .collect();
        let global = state.global_filter().to_lowercase();

        let filtered: Vec<&R> = rows
            .iter()
            .filter(|row| {
                column_filters.iter().all(|(column, needle)| {
                    column.display_text(row).to_lowercase().contains(needle)
                })
            })
            .filter(|row| {
                global.is_empty()
                    || policy.searchable_keys().iter().any(|key| {
                        row.cell(key).display_text().to_lowercase().contains(&global)
                    })
            })
            .collect();

        let sorted = sort_rows(filtered, policy, state);
        let filtered_count = sorted.len();

        // Prune selection to the filtered set before aggregating.
        let filtered_ids: BTreeSet<&str> = sorted.iter().map(|row| row.id()).collect();
        let selection: BTreeSet<String> = state
            .selection()
            .iter()
            .filter(|id| filtered_ids.contains(id.as_str()))
            .cloned()
            .collect();
        let selected_count = selection.len();

        let page_size = state.pagination().page_size.max(1);
        let page_count = filtered_count.div_ceil(page_size);
        let page_index = state
            .pagination()
            .page_index
            .min(page_count.saturating_sub(1));

        let start = page_index * page_size;
        let page: Vec<R> = sorted
            .iter()
            .skip(start)
            .take(page_size)
            .map(|row| (*row).clone())
            .collect();

        let all_on_page_selected =
            !page.is_empty() && page.iter().all(|row| selection.contains(row.id()));
        let all_filtered_selected = filtered_count > 0 && selected_count == filtered_count;
        let select_all = if all_on_page_selected {
            SelectAllState::Checked
        } else if selected_count > 0 {
            SelectAllState::Indeterminate
        } else {
            SelectAllState::Unchecked
        };

        Snapshot {
            rows: page,
            page_index,
            page_count,
            filtered_count,
            total_count,
            selection,
            selected_count,
            all_on_page_selected,
            all_filtered_selected,
            select_all,
        }
    }

    /// Returns `true` if no row survived filtering.
    ///
    /// The renderer shows its "No results" placeholder row for this case
    /// instead of an empty table body.
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// Ids of the rows on the current page.
    pub fn page_ids(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.id().to_string()).collect()
    }
}

/// Stable multi-key sort. Rows comparing equal keep their pre-sort relative
/// order, which also makes re-sorting by the same key idempotent.
fn sort_rows<'a, R: TableRow>(
    mut rows: Vec<&'a R>,
    policy: &ColumnPolicy<R>,
    state: &ViewState,
) -> Vec<&'a R> {
    let keys: Vec<_> = state
        .sort()
        .iter()
        .filter(|sort| policy.column(&sort.key).is_some_and(|c| c.sortable))
        .collect();
    if keys.is_empty() {
        return rows;
    }

    rows.sort_by(|a, b| {
        for sort in &keys {
            let ordering = a.cell(&sort.key).cmp(&b.cell(&sort.key));
            let ordering = match sort.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    rows
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::CellValue;
    use crate::table::ColumnDef;
    use crate::table::SortKey;
    use crate::table::SortRule;

    /// Minimal row for engine tests: an id, a name and a numeric rank.
    #[derive(Debug, Clone, PartialEq)]
    struct TestRow {
        id: String,
        name: String,
        rank: i64,
    }

    impl TestRow {
        fn new(id: &str, name: &str, rank: i64) -> Self {
            Self {
                id: id.into(),
                name: name.into(),
                rank,
            }
        }
    }

    impl TableRow for TestRow {
        fn id(&self) -> &str {
            &self.id
        }

        fn cell(&self, key: &str) -> CellValue {
            match key {
                "id" => self.id.as_str().into(),
                "name" => self.name.as_str().into(),
                "rank" => self.rank.into(),
                _ => CellValue::Null,
            }
        }
    }

    fn policy() -> ColumnPolicy<TestRow> {
        ColumnPolicy::new(vec![
            ColumnDef::new("id", "ID"),
            ColumnDef::new("name", "Name"),
            ColumnDef::new("rank", "Rank"),
        ])
        .searchable(["id", "name"])
    }

    fn rows() -> Vec<TestRow> {
        vec![
            TestRow::new("AAA111", "Aspirin", 3),
            TestRow::new("BBB222", "Bandage", 1),
            TestRow::new("CCC333", "Cough Syrup", 2),
            TestRow::new("DDD444", "Aspirin", 1),
        ]
    }

    #[test]
    fn column_filters_are_anded() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_column_filter("name", "asp");
        state.set_column_filter("id", "ddd");
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        assert_eq!(snapshot.filtered_count, 1);
        assert_eq!(snapshot.rows[0].id, "DDD444");
    }

    #[test]
    fn global_filter_matches_any_searchable_column() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_global_filter("asp");
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        assert_eq!(snapshot.filtered_count, 2);

        // "rank" is not in the whitelist, so numeric text never matches.
        state.set_global_filter("3");
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        let ids = snapshot.page_ids();
        assert_eq!(ids, vec!["CCC333".to_string()]);
    }

    #[test]
    fn global_filter_applies_after_column_filters() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_column_filter("name", "aspirin");
        state.set_global_filter("bbb");
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        assert_eq!(snapshot.filtered_count, 0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_sort(vec![SortKey::asc("name")]);
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        // Two Aspirin rows keep their original relative order.
        assert_eq!(
            snapshot.page_ids(),
            vec!["AAA111", "DDD444", "BBB222", "CCC333"]
        );
    }

    #[test]
    fn multi_key_sort_breaks_ties_with_secondary_key() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_sort(vec![SortKey::asc("name"), SortKey::asc("rank")]);
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        assert_eq!(
            snapshot.page_ids(),
            vec!["DDD444", "AAA111", "BBB222", "CCC333"]
        );
    }

    #[test]
    fn numeric_sort_is_numeric_not_lexicographic() {
        let rows = vec![
            TestRow::new("a", "x", 10),
            TestRow::new("b", "y", 2),
            TestRow::new("c", "z", 1),
        ];
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_sort(vec![SortKey::asc("rank")]);
        let snapshot = Snapshot::compute(&rows, &policy(), &state);
        assert_eq!(snapshot.page_ids(), vec!["c", "b", "a"]);
    }

    #[test]
    fn page_index_clamps_when_filters_shrink_the_set() {
        let many: Vec<TestRow> = (0..25)
            .map(|i| TestRow::new(&format!("ID{i:03}"), &format!("Drug {i}"), i))
            .collect();
        let mut state = ViewState::new(SortRule::Unsorted);
        state.set_page_index(2); // rows 20..25
        let snapshot = Snapshot::compute(&many, &policy(), &state);
        assert_eq!(snapshot.page_index, 2);
        assert_eq!(snapshot.rows.len(), 5);

        // A filter that leaves 5 rows (ID020..ID024) clamps the index to
        // page 0.
        state.set_column_filter("id", "ID02");
        let snapshot = Snapshot::compute(&many, &policy(), &state);
        assert_eq!(snapshot.filtered_count, 5);
        assert_eq!(snapshot.page_index, 0);
        assert_eq!(snapshot.page_count, 1);
    }

    #[test]
    fn empty_model_yields_empty_snapshot() {
        let state = ViewState::new(SortRule::Unsorted);
        let snapshot = Snapshot::compute(&[], &policy(), &state);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.page_count, 0);
        assert_eq!(snapshot.page_index, 0);
        assert_eq!(snapshot.select_all, SelectAllState::Unchecked);
    }

    #[test]
    fn selection_aggregates_within_filtered_set() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.select_many(["AAA111", "BBB222", "DDD444"], true);
        state.set_column_filter("name", "asp"); // excludes BBB222
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        assert_eq!(snapshot.selected_count, 2);
        assert!(snapshot.all_filtered_selected);
        assert_eq!(snapshot.select_all, SelectAllState::Checked);
        assert!(!snapshot.selection.contains("BBB222"));
    }

    #[test]
    fn partially_selected_page_is_indeterminate() {
        let mut state = ViewState::new(SortRule::Unsorted);
        state.select_row("AAA111", true);
        let snapshot = Snapshot::compute(&rows(), &policy(), &state);
        assert_eq!(snapshot.select_all, SelectAllState::Indeterminate);
        assert!(!snapshot.all_on_page_selected);
    }

    proptest! {
        /// Pages partition the filtered set: sizes sum to the filtered
        /// count and ids are unique across pages.
        #[test]
        fn pages_partition_filtered_set(
            names in prop::collection::vec("[a-d]{1,3}", 0..60),
            needle in "[a-d]{0,2}",
            page_size in 1usize..20,
        ) {
            let rows: Vec<TestRow> = names
                .iter()
                .enumerate()
                .map(|(i, name)| TestRow::new(&format!("ID{i:03}"), name, i as i64))
                .collect();
            let mut state = ViewState::new(SortRule::Unsorted);
            state.set_page_size(page_size);
            state.set_column_filter("name", needle.clone());

            let first = Snapshot::compute(&rows, &policy(), &state);
            let mut seen = BTreeSet::new();
            let mut total = 0usize;
            for page in 0..first.page_count {
                state.set_page_index(page);
                let snapshot = Snapshot::compute(&rows, &policy(), &state);
                total += snapshot.rows.len();
                for id in snapshot.page_ids() {
                    prop_assert!(seen.insert(id), "duplicate id across pages");
                }
            }
            prop_assert_eq!(total, first.filtered_count);
        }

        /// Sorting by the same key twice is idempotent, and equal keys keep
        /// their relative order.
        #[test]
        fn resorting_is_idempotent(
            names in prop::collection::vec("[a-c]{1,2}", 0..40),
        ) {
            let rows: Vec<TestRow> = names
                .iter()
                .enumerate()
                .map(|(i, name)| TestRow::new(&format!("ID{i:03}"), name, i as i64))
                .collect();
            let mut state = ViewState::new(SortRule::Unsorted);
            state.set_page_size(100);
            state.set_sort(vec![SortKey::asc("name")]);

            let once = Snapshot::compute(&rows, &policy(), &state);
            let resorted = Snapshot::compute(&once.rows, &policy(), &state);
            prop_assert_eq!(once.page_ids(), resorted.page_ids());

            // Equal names appear in ascending id order (insertion order).
            for pair in once.rows.windows(2) {
                if pair[0].name == pair[1].name {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
