//! TableView: the per-view owner of row model and view state

use log::debug;

use crate::model::Role;
use crate::model::TableRow;

use super::ColumnPolicy;
use super::Snapshot;
use super::ViewState;

/// One mounted table view: the row model, the view state, the column policy
/// and the viewer's role.
///
/// This is the data side of the container contract: a page supplies rows via
/// [`apply_rows`](TableView::apply_rows) (initial fetch and every
/// post-mutation reload) and reads the derived slice via
/// [`snapshot`](TableView::snapshot). The view owns its state exclusively;
/// nothing is shared across views and nothing survives
/// [`close`](TableView::close).
pub struct TableView<R: TableRow> {
    policy: ColumnPolicy<R>,
    viewer: Role,
    rows: Vec<R>,
    state: ViewState,
    is_loading: bool,
    closed: bool,
}

impl<R: TableRow> TableView<R> {
    /// Creates a view for a viewer role, initially empty and loading.
    pub fn new(policy: ColumnPolicy<R>, viewer: Role) -> Self {
        let state = ViewState::new(policy.rule());
        Self {
            policy,
            viewer,
            rows: Vec::new(),
            state,
            is_loading: true,
            closed: false,
        }
    }

    /// The column policy.
    pub fn policy(&self) -> &ColumnPolicy<R> {
        &self.policy
    }

    /// The viewer's role, used to resolve column visibility.
    pub fn viewer(&self) -> Role {
        self.viewer
    }

    /// The current row model.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Mutable access to the view state for the user-interaction intents.
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// `true` while a fetch for this view is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Marks a fetch as started or finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Computes the visible slice and rebases the view state.
    ///
    /// This is the single point where the engine's corrections (selection
    /// pruned to the filtered set, page index clamped) are written back, so
    /// a pruned id stays gone even after the filter that excluded it is
    /// cleared.
    pub fn snapshot(&mut self) -> Snapshot<R> {
        let snapshot = Snapshot::compute(&self.rows, &self.policy, &self.state);
        self.state
            .rebase(snapshot.selection.clone(), snapshot.page_index);
        snapshot
    }

    /// Replaces the row model wholesale (initial load or reload).
    ///
    /// Ids that disappeared from the collection are dropped from the
    /// selection; sort, filters and page are left as the user set them.
    /// Applied last-write-wins when reloads overlap. After
    /// [`close`](TableView::close) the rows are discarded, so a fetch that
    /// completes after unmount cannot touch dead state.
    pub fn apply_rows(&mut self, rows: Vec<R>) {
        if self.closed {
            debug!("Discarding {} rows that arrived after close", rows.len());
            return;
        }
        let ids: std::collections::BTreeSet<&str> = rows.iter().map(|row| row.id()).collect();
        let kept = self
            .state
            .selection()
            .iter()
            .filter(|id| ids.contains(id.as_str()))
            .cloned()
            .collect();
        self.state.rebase(kept, self.state.pagination().page_index);
        self.rows = rows;
        self.is_loading = false;
    }

    /// Selects or deselects every row on the current page.
    pub fn select_all_on_page(&mut self, selected: bool) {
        let page_ids = self.snapshot().page_ids();
        self.state.select_many(page_ids, selected);
    }

    /// Marks the view unmounted; later [`apply_rows`](TableView::apply_rows)
    /// calls become no-ops.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// `true` once the view has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
