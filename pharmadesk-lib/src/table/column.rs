//! Column descriptors and role-based visibility

use crate::model::Role;
use crate::model::TableRow;

/// Inline row actions a column can carry.
///
/// Actions are declarative intents; the rendering collaborator maps them to
/// controls keyed by the column id. The engine itself never executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Open a read-only detail view of the row.
    View,
    /// Open the edit dialog for the row.
    Edit,
    /// Delete the row (with confirmation).
    Delete,
    /// Copy the row id to the clipboard.
    CopyId,
}

/// When a column is shown.
///
/// Visibility is a capability check against the *viewer's* role, not a data
/// property of the row. The one exception is [`Visibility::PerRow`], used by
/// the Users action column, where the row's own role is also consulted so a
/// Manager cannot edit an Admin row. Hidden means absent from the rendered
/// output entirely, not merely disabled.
#[derive(Debug, Clone, Copy)]
pub enum Visibility {
    /// Always shown.
    Always,
    /// Never shown (default-hidden columns like long descriptions).
    Hidden,
    /// Shown when the predicate holds for the viewer's role.
    Viewer(fn(Role) -> bool),
    /// Shown when the predicate holds for the viewer's role and the row's
    /// role (if the row carries one).
    PerRow(fn(Role, Option<Role>) -> bool),
}

/// Declarative description of one column.
///
/// # Example
///
/// ```
/// use pharmadesk_lib::model::Drug;
/// use pharmadesk_lib::table::ColumnDef;
///
/// let col: ColumnDef<Drug> = ColumnDef::new("price", "Price")
///     .with_render(|drug: &Drug| format!("${}", drug.price));
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDef<R> {
    /// Identifier, also the cell key on the row.
    pub key: &'static str,
    /// Header text.
    pub header: &'static str,
    /// Whether header clicks can sort by this column.
    pub sortable: bool,
    /// Whether per-column filters may target this column.
    pub filterable: bool,
    /// Fixed width hint for the renderer, if any.
    pub width: Option<u16>,
    /// Visibility rule.
    pub visibility: Visibility,
    /// Custom display renderer; defaults to the cell's display text.
    pub render: Option<fn(&R) -> String>,
    /// Inline actions carried by this column.
    pub actions: &'static [RowAction],
}

impl<R: TableRow> ColumnDef<R> {
    /// Creates a sortable, filterable, always-visible column.
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: true,
            filterable: true,
            width: None,
            visibility: Visibility::Always,
            render: None,
            actions: &[],
        }
    }

    /// Creates an action column: unsortable, unfilterable, carrying intents.
    pub fn action(key: &'static str, header: &'static str, actions: &'static [RowAction]) -> Self {
        Self {
            key,
            header,
            sortable: false,
            filterable: false,
            width: None,
            visibility: Visibility::Always,
            render: None,
            actions,
        }
    }

    /// Disables sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Disables per-column filtering on this column.
    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Sets a fixed width hint.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the visibility rule.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets a custom display renderer.
    pub fn with_render(mut self, render: fn(&R) -> String) -> Self {
        self.render = Some(render);
        self
    }

    /// Returns the display text of this column's cell on `row`.
    pub fn display_text(&self, row: &R) -> String {
        match self.render {
            Some(render) => render(row),
            None => row.cell(self.key).display_text(),
        }
    }
}

/// Whether a view's sort order may be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRule {
    /// The user may clear sorting entirely.
    Unsorted,
    /// Sorting is never empty: clearing reapplies the previous primary key
    /// ascending, and the view starts sorted by `default_key`.
    RequireSorted {
        /// The initial (and fallback) sort key.
        default_key: &'static str,
    },
}

/// The full column policy for one view.
///
/// Combines the column list, the whitelist of keys the global search
/// consults, and the sort rule.
#[derive(Debug, Clone)]
pub struct ColumnPolicy<R> {
    columns: Vec<ColumnDef<R>>,
    searchable: Vec<&'static str>,
    sort_rule: SortRule,
}

impl<R: TableRow> ColumnPolicy<R> {
    /// Creates a policy from column definitions.
    pub fn new(columns: Vec<ColumnDef<R>>) -> Self {
        Self {
            columns,
            searchable: Vec::new(),
            sort_rule: SortRule::Unsorted,
        }
    }

    /// Sets the keys the global search matches against.
    pub fn searchable(mut self, keys: impl IntoIterator<Item = &'static str>) -> Self {
        self.searchable = keys.into_iter().collect();
        self
    }

    /// Sets the sort rule.
    pub fn sort_rule(mut self, rule: SortRule) -> Self {
        self.sort_rule = rule;
        self
    }

    /// Returns all column definitions.
    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    /// Returns the column with the given key, if any.
    pub fn column(&self, key: &str) -> Option<&ColumnDef<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns the global-search whitelist.
    pub fn searchable_keys(&self) -> &[&'static str] {
        &self.searchable
    }

    /// Returns the sort rule.
    pub fn rule(&self) -> SortRule {
        self.sort_rule
    }

    /// Resolves visibility of one column for a viewer and an optional row.
    ///
    /// Evaluated fresh on every render pass; row sets are small enough that
    /// caching would buy nothing.
    pub fn is_visible(&self, column: &ColumnDef<R>, viewer: Role, row: Option<&R>) -> bool {
        match column.visibility {
            Visibility::Always => true,
            Visibility::Hidden => false,
            Visibility::Viewer(check) => check(viewer),
            Visibility::PerRow(check) => check(viewer, row.and_then(TableRow::role)),
        }
    }

    /// Returns the keys of the columns visible to `viewer` on `row`.
    ///
    /// Pass `None` for header rows; `PerRow` columns are then shown whenever
    /// the predicate holds for a role-less row.
    pub fn visible_keys(&self, viewer: Role, row: Option<&R>) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| self.is_visible(c, viewer, row))
            .map(|c| c.key)
            .collect()
    }
}
