//! DataSource trait and the REST-backed implementation
//!
//! A data source is one entity collection on the backend: listable as a JSON
//! array and mutable through POST/PUT/DELETE. The table engine never talks
//! HTTP itself; the mutation coordinator drives a `DataSource` and feeds the
//! reloaded rows back into the view.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::PharmacyClient;
use crate::error::ApiError;
use crate::model::Drug;
use crate::model::Order;
use crate::model::TableRow;
use crate::model::User;

/// A remote collection of rows with CRUD verbs.
///
/// Create/update payloads arrive as JSON values: the form layer validates
/// them before they reach this library, so only syntactically valid bodies
/// pass through here.
#[async_trait]
pub trait DataSource<R>: Send + Sync {
    /// Fetches the full collection.
    async fn list(&self) -> Result<Vec<R>, ApiError>;

    /// Creates a new row.
    async fn create(&self, payload: &serde_json::Value) -> Result<(), ApiError>;

    /// Updates the row with the given id.
    async fn update(&self, id: &str, payload: &serde_json::Value) -> Result<(), ApiError>;

    /// Deletes the row with the given id.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// REST-backed [`DataSource`] over a [`PharmacyClient`] and a collection path.
///
/// # Example
///
/// ```ignore
/// use pharmadesk_lib::api::RestCollection;
///
/// let drugs = RestCollection::drugs(client.clone());
/// let rows = drugs.list().await?;
/// ```
#[derive(Clone)]
pub struct RestCollection<R> {
    client: PharmacyClient,
    path: String,
    _row: PhantomData<fn() -> R>,
}

impl<R> RestCollection<R> {
    /// Creates a collection for a path relative to the client's base URL.
    pub fn new(client: PharmacyClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _row: PhantomData,
        }
    }

    /// Returns the collection path.
    pub fn path(&self) -> &str {
        &self.path
    }

    async fn send_expect_success(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.client.request(method, path).await?;
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::http(status, body))
        }
    }
}

impl RestCollection<Drug> {
    /// The drugs collection.
    pub fn drugs(client: PharmacyClient) -> Self {
        Self::new(client, "api/drugs")
    }
}

impl RestCollection<Order> {
    /// The orders collection.
    pub fn orders(client: PharmacyClient) -> Self {
        Self::new(client, "api/orders")
    }
}

impl RestCollection<User> {
    /// The users collection.
    pub fn users(client: PharmacyClient) -> Self {
        Self::new(client, "api/users")
    }
}

#[async_trait]
impl<R> DataSource<R> for RestCollection<R>
where
    R: TableRow + DeserializeOwned,
{
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        let response = self
            .send_expect_success(Method::GET, &self.path, None)
            .await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(format!("Invalid collection body: {e}"), body))
    }

    async fn create(&self, payload: &serde_json::Value) -> Result<(), ApiError> {
        self.send_expect_success(Method::POST, &self.path, Some(payload))
            .await?;
        Ok(())
    }

    async fn update(&self, id: &str, payload: &serde_json::Value) -> Result<(), ApiError> {
        let path = format!("{}/{id}", self.path);
        self.send_expect_success(Method::PUT, &path, Some(payload))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{id}", self.path);
        self.send_expect_success(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
