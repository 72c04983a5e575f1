use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default number of bytes moved per transfer loop iteration.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Which authentication parameters a client appends to each request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// Parameters are already part of the query path; nothing is appended.
    #[default]
    Embedded,
    /// Append `APIKey=<key>&AuthToken=<token>`.
    AuthToken,
    /// Append `APIKey=<key>&Token=<token>`.
    Token,
}

/// Configuration for a [`crate::StreamingClient`].
///
/// # Examples
///
/// ```
/// use lapi_fetch::{AuthScheme, ClientOptions};
/// use std::time::Duration;
///
/// let options = ClientOptions::default()
///     .base_url("http://localhost:8080/api")
///     .chunk_size(4096)
///     .auth(AuthScheme::Token)
///     .read_timeout(Duration::from_secs(10));
/// assert_eq!(options.chunk_size, 4096);
/// ```
#[derive(Clone)]
pub struct ClientOptions {
    /// Prefix joined with every query path that does not name its own base.
    ///
    /// Default: [`crate::DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Bytes requested per chunk read. Never zero.
    ///
    /// Default: 1024
    pub chunk_size: usize,

    /// Authentication parameters appended to request URLs.
    ///
    /// Default: [`AuthScheme::Embedded`]
    pub auth: AuthScheme,

    /// Custom HTTP headers sent with every request.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,

    /// Connection timeout applied by transports that support it.
    ///
    /// Default: None (transport default)
    pub connect_timeout: Option<Duration>,

    /// Per-read timeout applied by transports that support it.
    ///
    /// Default: None (transport default)
    pub read_timeout: Option<Duration>,

    /// `User-Agent` header value.
    ///
    /// Default: `lapi-fetch/<version>`
    pub user_agent: String,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("chunk_size", &self.chunk_size)
            .field("auth", &self.auth)
            .field("headers", &self.headers.len())
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url:        crate::effects::DEFAULT_BASE_URL.to_string(),
            chunk_size:      DEFAULT_CHUNK_SIZE,
            auth:            AuthScheme::default(),
            headers:         Arc::new([]),
            connect_timeout: None,
            read_timeout:    None,
            user_agent:      concat!("lapi-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the chunk size. Zero is raised to one byte.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Add a single custom HTTP header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
