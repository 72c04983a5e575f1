use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;
use url::Url;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Response head plus a streaming body.
pub struct HttpResponse<E> {
    /// Declared body length, if the transport knows it.
    pub content_length: Option<u64>,
    pub body:           BoxStream<'static, std::result::Result<Bytes, E>>,
}

impl<E> HttpResponse<E> {
    pub fn new(
        content_length: Option<u64>,
        body: BoxStream<'static, std::result::Result<Bytes, E>>,
    ) -> Self {
        Self {
            content_length,
            body,
        }
    }
}

/// Asynchronous HTTP transport abstraction.
///
/// Only the single request shape the client needs: a GET returning the
/// response as soon as headers are read. Redirects, pooling and TLS are the
/// implementation's business.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET and return once the response headers are available.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent (DNS failure,
    /// connection error, protocol error).
    fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> impl Future<Output = std::result::Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::ClientOptions;
    use crate::error::{Error, Result};

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self> { Self::from_options(&ClientOptions::default()) }

        /// Apply the user agent and timeouts from `options`.
        pub fn from_options(options: &ClientOptions) -> Result<Self> {
            let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());
            if let Some(timeout) = options.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            if let Some(timeout) = options.read_timeout {
                builder = builder.read_timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| Error::ClientBuild(e.to_string()))?;
            Ok(Self { client })
        }

        pub fn from_client(client: reqwest::Client) -> Self { Self { client } }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &Url,
            headers: &[(String, String)],
        ) -> std::result::Result<HttpResponse<Self::Error>, Self::Error> {
            let mut request = self.client.get(url.clone());

            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let content_length = response.content_length();

            Ok(HttpResponse::new(content_length, Box::pin(response.bytes_stream())))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
