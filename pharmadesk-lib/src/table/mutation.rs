//! MutationCoordinator: remote write + required reload

use std::marker::PhantomData;

use futures::future::join_all;
use log::warn;

use crate::api::DataSource;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::TableRow;

use super::TableView;

/// Outcome of a single-row mutation attempt.
///
/// `Completed` corresponds to the dialog closing; `Failed` leaves the dialog
/// open with the error for the user to retry. There is no automatic retry.
#[derive(Debug)]
pub enum MutationOutcome {
    /// The write succeeded and the reload (if it succeeded) was applied.
    Completed,
    /// The write failed; the row model was left untouched.
    Failed(Error),
}

impl MutationOutcome {
    /// Returns `true` if the mutation succeeded.
    pub fn is_completed(&self) -> bool {
        matches!(self, MutationOutcome::Completed)
    }

    /// Returns the error if the mutation failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            MutationOutcome::Completed => None,
            MutationOutcome::Failed(e) => Some(e),
        }
    }
}

/// Outcome of a bulk delete.
///
/// Selection is cleared and a reload is triggered no matter how the
/// individual deletes fared; per-id failures are reported here for callers
/// that want to surface them, but they do not change the flow.
#[derive(Debug)]
pub struct BulkDeleteOutcome {
    /// Ids whose DELETE failed, with the error.
    pub failures: Vec<(String, ApiError)>,
    /// Error of the post-batch reload, if it failed.
    pub reload_error: Option<ApiError>,
}

impl BulkDeleteOutcome {
    /// Returns `true` if every delete and the reload succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.reload_error.is_none()
    }
}

/// Sequences create/update/delete against a [`DataSource`] with the required
/// post-mutation reload, and tracks the in-flight flag the submitting dialog
/// uses to disable its own controls.
///
/// Each attempt runs `Idle → Submitting → Idle`; a second submit while one
/// is in flight is rejected. On success the full collection is refetched and
/// applied to the view (so the new row appears at its sorted position under
/// the user's current view state); on failure the row model is left alone so
/// stale data cannot clobber an open dialog.
///
/// # Example
///
/// ```ignore
/// let mut coordinator = MutationCoordinator::new(RestCollection::drugs(client));
/// let outcome = coordinator
///     .create(&mut view, serde_json::json!({
///         "name": "Paracetamol",
///         "price": 5,
///         "quantity": 100,
///     }))
///     .await;
/// if outcome.is_completed() {
///     // close the add dialog
/// }
/// ```
pub struct MutationCoordinator<R, S> {
    source: S,
    in_flight: bool,
    _row: PhantomData<fn() -> R>,
}

impl<R, S> MutationCoordinator<R, S>
where
    R: TableRow,
    S: DataSource<R>,
{
    /// Creates a coordinator over a data source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            in_flight: false,
            _row: PhantomData,
        }
    }

    /// The underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// `true` while a mutation attempt is in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Loads (or reloads) the collection into the view.
    ///
    /// A failed fetch leaves the view on its last-known-good rows (empty on
    /// first load) and logs; the view is never put into a hard error state.
    pub async fn load(&self, view: &mut TableView<R>) {
        view.set_loading(true);
        match self.source.list().await {
            Ok(rows) => view.apply_rows(rows),
            Err(e) => {
                warn!("Failed to load collection: {e}");
                view.set_loading(false);
            }
        }
    }

    /// Creates a row, then reloads.
    pub async fn create(
        &mut self,
        view: &mut TableView<R>,
        payload: serde_json::Value,
    ) -> MutationOutcome {
        if let Err(e) = self.begin() {
            return MutationOutcome::Failed(e);
        }
        let result = self.source.create(&payload).await;
        self.finish(view, result).await
    }

    /// Updates a row, then reloads.
    pub async fn update(
        &mut self,
        view: &mut TableView<R>,
        id: &str,
        payload: serde_json::Value,
    ) -> MutationOutcome {
        if let Err(e) = self.begin() {
            return MutationOutcome::Failed(e);
        }
        let result = self.source.update(id, &payload).await;
        self.finish(view, result).await
    }

    /// Deletes a row, then reloads.
    pub async fn delete(&mut self, view: &mut TableView<R>, id: &str) -> MutationOutcome {
        if let Err(e) = self.begin() {
            return MutationOutcome::Failed(e);
        }
        let result = self.source.delete(id).await;
        self.finish(view, result).await
    }

    /// Deletes every selected row in the current filtered set.
    ///
    /// All DELETEs are issued concurrently and joined. After the batch
    /// settles the selection is cleared unconditionally and a single reload
    /// runs, regardless of individual failures.
    ///
    /// Fails with [`Error::InvalidOperation`] when another mutation is in
    /// flight; in that case nothing ran.
    pub async fn bulk_delete(
        &mut self,
        view: &mut TableView<R>,
    ) -> Result<BulkDeleteOutcome, Error> {
        self.begin()?;

        let ids: Vec<String> = view.snapshot().selection.into_iter().collect();
        let deletes = ids.iter().map(|id| self.source.delete(id));
        let results = join_all(deletes).await;

        let failures: Vec<(String, ApiError)> = ids
            .into_iter()
            .zip(results)
            .filter_map(|(id, result)| result.err().map(|e| (id, e)))
            .collect();
        for (id, e) in &failures {
            warn!("Failed to delete row {id}: {e}");
        }

        view.state_mut().clear_selection();

        let reload_error = match self.source.list().await {
            Ok(rows) => {
                view.apply_rows(rows);
                None
            }
            Err(e) => {
                warn!("Reload after bulk delete failed: {e}");
                Some(e)
            }
        };

        self.in_flight = false;
        Ok(BulkDeleteOutcome {
            failures,
            reload_error,
        })
    }

    /// Marks an attempt as started, rejecting re-entrant submits.
    fn begin(&mut self) -> Result<(), Error> {
        if self.in_flight {
            return Err(Error::InvalidOperation(
                "A mutation is already in flight".to_string(),
            ));
        }
        self.in_flight = true;
        Ok(())
    }

    /// Settles one write: reload on success only, then clear the flag.
    async fn finish(
        &mut self,
        view: &mut TableView<R>,
        result: Result<(), ApiError>,
    ) -> MutationOutcome {
        let outcome = match result {
            Ok(()) => {
                // Reload failure is a fetch failure: keep last-known-good
                // rows, the mutation itself still completed.
                match self.source.list().await {
                    Ok(rows) => view.apply_rows(rows),
                    Err(e) => warn!("Reload after mutation failed: {e}"),
                }
                MutationOutcome::Completed
            }
            Err(e) => MutationOutcome::Failed(e.into()),
        };

        self.in_flight = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::model::Role;
    use crate::table::ColumnDef;
    use crate::table::ColumnPolicy;

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
    }

    impl TableRow for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn cell(&self, key: &str) -> CellValue {
            match key {
                "id" => self.id.as_str().into(),
                _ => CellValue::Null,
            }
        }
    }

    struct EmptySource;

    #[async_trait::async_trait]
    impl DataSource<Item> for EmptySource {
        async fn list(&self) -> Result<Vec<Item>, ApiError> {
            Ok(Vec::new())
        }

        async fn create(&self, _payload: &serde_json::Value) -> Result<(), ApiError> {
            Ok(())
        }

        async fn update(&self, _id: &str, _payload: &serde_json::Value) -> Result<(), ApiError> {
            Ok(())
        }

        async fn delete(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn view() -> TableView<Item> {
        TableView::new(ColumnPolicy::new(vec![ColumnDef::new("id", "ID")]), Role::Admin)
    }

    #[tokio::test]
    async fn overlapping_submits_are_rejected() {
        let mut view = view();
        let mut coordinator = MutationCoordinator::new(EmptySource);
        coordinator.in_flight = true;

        let outcome = coordinator.create(&mut view, serde_json::json!({})).await;
        assert!(matches!(
            outcome,
            MutationOutcome::Failed(Error::InvalidOperation(_))
        ));

        let bulk = coordinator.bulk_delete(&mut view).await;
        assert!(matches!(bulk, Err(Error::InvalidOperation(_))));
        // The guard itself stays set; the owning attempt clears it.
        assert!(coordinator.is_in_flight());
    }

    #[tokio::test]
    async fn flag_clears_after_a_settled_attempt() {
        let mut view = view();
        let mut coordinator = MutationCoordinator::new(EmptySource);

        let outcome = coordinator.create(&mut view, serde_json::json!({})).await;
        assert!(outcome.is_completed());
        assert!(!coordinator.is_in_flight());

        let bulk = coordinator.bulk_delete(&mut view).await;
        assert!(bulk.is_ok_and(|b| b.is_clean()));
        assert!(!coordinator.is_in_flight());
    }
}
