//! Client layer: holds credentials and environment, orchestrates transport calls.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use phonenumber::country;
use tracing::{debug, warn};

use crate::domain::{
    Credentials, EndpointSet, Endpoints, Environment, RawPhoneNumber, SendBulk, SendSms,
    ValidationError,
};

const APPLICATION_JSON: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            // `RequestBuilder::json` would append a second Content-Type next to ours.
            let mut request = self.client.post(url).body(serde_json::to_vec(&body)?);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NextSmsClient`].
///
/// Nothing is retried or recovered internally; every failure reaches the caller.
pub enum NextSmsError {
    /// One of the domain constructors or builder options rejected a value.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// A request was attempted before credentials were set.
    #[error("client is not initialized: set credentials before sending")]
    NotInitialized,

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code whose body is not JSON.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body is not valid JSON.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A phone number could not be parsed under the given region.
    #[error("cannot parse phone number {input:?}: {reason}")]
    PhoneNumberParse { input: String, reason: String },
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Single,
    Bulk,
}

#[derive(Debug, Clone, Default)]
struct ClientState {
    credentials: Option<Arc<Credentials>>,
    environment: Environment,
}

#[derive(Debug, Clone)]
/// Builder for [`NextSmsClient`].
///
/// Use this when you need sandbox mode, an uninitialized client, a different
/// host, or a timeout/user-agent override.
pub struct NextSmsClientBuilder {
    credentials: Option<Credentials>,
    environment: Environment,
    base_url: Option<String>,
    production_endpoints: Option<Endpoints>,
    sandbox_endpoints: Option<Endpoints>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NextSmsClientBuilder {
    /// Create a builder for a production client without credentials.
    pub fn new() -> Self {
        Self {
            credentials: None,
            environment: Environment::Production,
            base_url: None,
            production_endpoints: None,
            sandbox_endpoints: None,
            timeout: None,
            user_agent: None,
        }
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Start in sandbox mode when `is_active` is `true`.
    pub fn sandbox(mut self, is_active: bool) -> Self {
        self.environment = Environment::from_sandbox(is_active);
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Serve every gateway path from another base URL (a proxy or a local mock).
    ///
    /// Explicit [`production_endpoints`](Self::production_endpoints) and
    /// [`sandbox_endpoints`](Self::sandbox_endpoints) still take precedence.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn production_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.production_endpoints = Some(endpoints);
        self
    }

    pub fn sandbox_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.sandbox_endpoints = Some(endpoints);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`NextSmsClient`].
    pub fn build(self) -> Result<NextSmsClient, NextSmsError> {
        let mut endpoints = match self.base_url.as_deref() {
            Some(base_url) => EndpointSet::with_base_url(base_url)?,
            None => EndpointSet::default(),
        };
        if let Some(production) = self.production_endpoints {
            endpoints.production = production;
        }
        if let Some(sandbox) = self.sandbox_endpoints {
            endpoints.sandbox = sandbox;
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NextSmsError::Transport(Box::new(err)))?;

        Ok(NextSmsClient::from_parts(
            ClientState {
                credentials: self.credentials.map(Arc::new),
                environment: self.environment,
            },
            endpoints,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

impl Default for NextSmsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
/// High-level NextSMS client.
///
/// Credentials and the sandbox flag can be replaced at any time; each request
/// reads both in one snapshot, so a concurrent switch is never seen half-applied.
/// Clones share that state.
///
/// By default it talks to the production endpoints:
/// - `https://messaging-service.co.tz/api/sms/v1/text/single` for single sends
/// - `https://messaging-service.co.tz/api/sms/v1/text/multi` for bulk sends
pub struct NextSmsClient {
    state: Arc<RwLock<ClientState>>,
    endpoints: Arc<EndpointSet>,
    http: Arc<dyn HttpTransport>,
}

impl NextSmsClient {
    /// Create an initialized production client.
    ///
    /// For more customization, use [`NextSmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self::from_parts(
            ClientState {
                credentials: Some(Arc::new(credentials)),
                environment: Environment::Production,
            },
            EndpointSet::default(),
            Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        )
    }

    /// Start building a client with custom settings.
    pub fn builder() -> NextSmsClientBuilder {
        NextSmsClientBuilder::new()
    }

    fn from_parts(
        state: ClientState,
        endpoints: EndpointSet,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            endpoints: Arc::new(endpoints),
            http,
        }
    }

    /// Validate a username/password pair and make it the active credentials.
    ///
    /// Any previous credentials are replaced as a whole.
    pub fn initialize(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), NextSmsError> {
        let credentials = Credentials::new(username, password)?;
        self.set_credentials(credentials);
        Ok(())
    }

    pub fn set_credentials(&self, credentials: Credentials) {
        debug!(username = credentials.username().as_str(), "replacing NextSMS credentials");
        self.write_state().credentials = Some(Arc::new(credentials));
    }

    pub fn is_initialized(&self) -> bool {
        self.read_state().credentials.is_some()
    }

    /// Switch both endpoints to the sandbox (`true`) or production (`false`) pair.
    ///
    /// Requests already in flight keep the endpoint they started with.
    pub fn set_sandbox(&self, is_active: bool) {
        let environment = Environment::from_sandbox(is_active);
        debug!(?environment, "switching NextSMS environment");
        self.write_state().environment = environment;
    }

    pub fn environment(&self) -> Environment {
        self.read_state().environment
    }

    /// Endpoint pair of the current environment.
    pub fn endpoints(&self) -> Endpoints {
        let environment = self.environment();
        self.endpoints.for_environment(environment).clone()
    }

    /// Headers sent with every request: `Accept`, `Content-Type`, and Basic `Authorization`.
    ///
    /// Errors:
    /// - [`NextSmsError::NotInitialized`] when no credentials are set.
    pub fn build_auth_header(&self) -> Result<Vec<(String, String)>, NextSmsError> {
        let (credentials, _) = self.snapshot()?;
        Ok(auth_headers(&credentials))
    }

    /// Send one message through the single-send endpoint.
    ///
    /// The gateway's JSON answer is returned as-is, whatever the HTTP status;
    /// gateway error codes inside it are left to the caller.
    ///
    /// Errors:
    /// - [`NextSmsError::NotInitialized`] when no credentials are set,
    /// - [`NextSmsError::Transport`] for network failures,
    /// - [`NextSmsError::HttpStatus`] for non-2xx HTTP responses without a JSON body,
    /// - [`NextSmsError::Decode`] when the body is not JSON.
    pub async fn send(&self, request: SendSms) -> Result<serde_json::Value, NextSmsError> {
        let body =
            crate::transport::encode_send_sms_body(&request).map_err(NextSmsError::Encode)?;
        self.post(Endpoint::Single, body, request.to().count()).await
    }

    /// Send a batch of messages through the bulk-send endpoint.
    ///
    /// Errors are the same as for [`NextSmsClient::send`].
    pub async fn send_bulk(&self, request: SendBulk) -> Result<serde_json::Value, NextSmsError> {
        let body =
            crate::transport::encode_send_bulk_body(&request).map_err(NextSmsError::Encode)?;
        self.post(Endpoint::Bulk, body, request.len()).await
    }

    /// Normalize numbers into E.164, in input order.
    ///
    /// The whole batch fails with [`NextSmsError::PhoneNumberParse`] on the
    /// first entry that cannot be parsed. No I/O is performed.
    pub fn normalize_numbers<I, S>(
        &self,
        numbers: I,
        default_region: country::Id,
    ) -> Result<Vec<RawPhoneNumber>, NextSmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        crate::domain::normalize_numbers(numbers, default_region).map_err(|err| match err {
            ValidationError::InvalidPhoneNumber { input, reason } => {
                NextSmsError::PhoneNumberParse { input, reason }
            }
            other => NextSmsError::InvalidArgument(other),
        })
    }

    async fn post(
        &self,
        endpoint: Endpoint,
        body: serde_json::Value,
        count: usize,
    ) -> Result<serde_json::Value, NextSmsError> {
        let (credentials, environment) = self.snapshot()?;
        let endpoints = self.endpoints.for_environment(environment);
        let url = match endpoint {
            Endpoint::Single => endpoints.single(),
            Endpoint::Bulk => endpoints.bulk(),
        };

        debug!(url, ?environment, ?endpoint, count, "sending NextSMS request");
        let response = self
            .http
            .post_json(url, auth_headers(&credentials), body)
            .await
            .map_err(NextSmsError::Transport)?;
        debug!(status = response.status, "NextSMS responded");

        if (200..=299).contains(&response.status) {
            return crate::transport::decode_json_response(&response.body)
                .map_err(|err| NextSmsError::Decode(Box::new(err)));
        }

        warn!(url, status = response.status, "NextSMS returned a non-success status");
        // Gateway error payloads are JSON too; hand them back like any other answer.
        if let Ok(value) = crate::transport::decode_json_response(&response.body) {
            return Ok(value);
        }

        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        Err(NextSmsError::HttpStatus {
            status: response.status,
            body,
        })
    }

    fn snapshot(&self) -> Result<(Arc<Credentials>, Environment), NextSmsError> {
        let state = self.read_state();
        let credentials = state
            .credentials
            .clone()
            .ok_or(NextSmsError::NotInitialized)?;
        Ok((credentials, state.environment))
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, ClientState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, ClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn auth_headers(credentials: &Credentials) -> Vec<(String, String)> {
    vec![
        ("Accept".to_owned(), APPLICATION_JSON.to_owned()),
        ("Content-Type".to_owned(), APPLICATION_JSON.to_owned()),
        ("Authorization".to_owned(), credentials.authorization()),
    ]
}
