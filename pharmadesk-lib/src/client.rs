//! Main PharmacyClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::RequestBuilder;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::CurrentUser;

/// The client for the pharmacy management REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across views safely.
///
/// # Example
///
/// ```ignore
/// use pharmadesk_lib::{PharmacyClient, auth::StaticTokenProvider};
///
/// let provider = StaticTokenProvider::new("session-token");
/// let client = PharmacyClient::builder()
///     .base_url("https://pharmacy.example.com")
///     .token_provider(provider)
///     .build();
///
/// let me = client.me().await?;
/// println!("viewer role: {:?}", me.role);
/// ```
#[derive(Clone)]
pub struct PharmacyClient {
    inner: Arc<PharmacyClientInner>,
}

struct PharmacyClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl PharmacyClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> PharmacyClientBuilder<Missing, Missing> {
        PharmacyClientBuilder::new()
    }

    /// Fetches the authenticated viewer.
    ///
    /// The viewer's role parameterizes column visibility in every view, so
    /// containers typically call this once on mount.
    pub async fn me(&self) -> Result<CurrentUser, Error> {
        let request = self.request(reqwest::Method::GET, "api/auth/me").await?;
        let response = request.send().await.map_err(ApiError::from)?;

        if response.status().is_success() {
            let me: CurrentUser = response.json().await.map_err(ApiError::from)?;
            Ok(me)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(ApiError::http(status, body)))
        }
    }

    /// Builds an authenticated request for a path relative to the base URL.
    pub(crate) async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await
            .map_err(|e| ApiError::http(401, e.to_string()))?;

        let mut request = self
            .inner
            .http_client
            .request(method, &url)
            .bearer_auth(&token.access_token);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        Ok(request)
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`PharmacyClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile
/// time.
///
/// # Required Fields
///
/// - `base_url` - The backend URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct PharmacyClientBuilder<Url, Provider> {
    base_url: Url,
    token_provider: Provider,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl PharmacyClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for PharmacyClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PharmacyClientBuilder<Missing, P> {
    /// Sets the backend URL.
    pub fn base_url(self, url: impl Into<String>) -> PharmacyClientBuilder<Set<String>, P> {
        PharmacyClientBuilder {
            base_url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> PharmacyClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> PharmacyClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        PharmacyClientBuilder {
            base_url: self.base_url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> PharmacyClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl PharmacyClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`PharmacyClient`].
    ///
    /// This method is only available when both `base_url` and
    /// `token_provider` have been set.
    pub fn build(self) -> PharmacyClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        PharmacyClient {
            inner: Arc::new(PharmacyClientInner {
                base_url: self.base_url.0,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
