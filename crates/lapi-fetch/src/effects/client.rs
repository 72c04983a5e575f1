use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::TryStreamExt;
use lapi_model::{Credential, LapiModel};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::{percent_of, request_url};
use crate::data::{
    AggregatedProgress, ClientOptions, ClientProperty, Failure, ProgressSnapshot, ProgressState,
};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::effects::{Cancellation, Transfer, transfer};
use crate::error::{Error, Result};

/// Base address used when a call does not name its own.
pub const DEFAULT_BASE_URL: &str = "https://ivle.nus.edu.sg/api/Lapi.svc";

/// Observer of [`StreamingClient`] property changes.
///
/// Invoked synchronously with the property that changed and the progress
/// after the change. Only real changes are delivered.
pub type ClientObserver = Arc<dyn Fn(ClientProperty, &AggregatedProgress) + Send + Sync>;

#[derive(Default)]
struct Shared {
    progress:  Mutex<AggregatedProgress>,
    observers: Mutex<Vec<ClientObserver>>,
}

impl Shared {
    fn progress(&self) -> MutexGuard<'_, AggregatedProgress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        let mut changed = Vec::with_capacity(2);
        let current = {
            let mut progress = self.progress();
            if progress.set_active(snapshot.in_progress) {
                changed.push(ClientProperty::OperationInProgress);
            }
            if let Some(percent) = percent_of(snapshot)
                && progress.raise_percent(percent)
            {
                changed.push(ClientProperty::OperationProgress);
            }
            progress.clone()
        };
        self.notify(&changed, &current);
    }

    fn notify(&self, changed: &[ClientProperty], current: &AggregatedProgress) {
        if changed.is_empty() {
            return;
        }
        let observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for property in changed {
            for observer in &observers {
                observer(*property, current);
            }
        }
    }
}

/// Authenticated GET client that streams response bodies with progress.
///
/// Every entry point returns a [`Result`] and also records a failure in
/// [`StreamingClient::last_error`]. Entry points take `&mut self`, so one
/// instance runs one operation at a time. Independent instances share
/// nothing.
///
/// # Examples
///
/// ```no_run
/// use lapi_fetch::{AuthScheme, ClientOptions, Credential, StreamingClient};
///
/// # async fn run() -> lapi_fetch::Result<()> {
/// let options = ClientOptions::default().auth(AuthScheme::Token);
/// let mut client = StreamingClient::connect(Credential::with_token("key", "token"), options)?;
/// client.observe(|property, progress| println!("{property}: {}%", progress.percent));
///
/// let modules = client.get_string("/Modules?Duration=0&IncludeAllInfo=false&").await?;
/// println!("{modules}");
/// # Ok(())
/// # }
/// ```
pub struct StreamingClient<C: HttpClient> {
    client:       C,
    credential:   Credential,
    options:      ClientOptions,
    cancellation: Cancellation,
    shared:       Arc<Shared>,
}

#[cfg(feature = "reqwest")]
impl StreamingClient<crate::effects::ReqwestClient> {
    /// Build a reqwest-backed client configured from `options`.
    pub fn connect(credential: Credential, options: ClientOptions) -> Result<Self> {
        let client = crate::effects::ReqwestClient::from_options(&options)?;
        Ok(Self::new(client, credential).with_options(options))
    }
}

impl<C: HttpClient> StreamingClient<C> {
    pub fn new(client: C, credential: Credential) -> Self {
        Self {
            client,
            credential,
            options: ClientOptions::default(),
            cancellation: Cancellation::Never,
            shared: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Thread `token` through every transfer this client runs.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Cancellation::Token(token);
        self
    }

    pub fn set_cancellation(&mut self, cancellation: Cancellation) {
        self.cancellation = cancellation;
    }

    pub fn cancellation(&self) -> &Cancellation { &self.cancellation }

    pub fn transport(&self) -> &C { &self.client }

    pub fn credential(&self) -> &Credential { &self.credential }

    pub fn set_credential(&mut self, credential: Credential) { self.credential = credential; }

    pub fn options(&self) -> &ClientOptions { &self.options }

    /// Register a change observer. Observers live as long as the client.
    pub fn observe<F>(&self, observer: F)
    where
        F: Fn(ClientProperty, &AggregatedProgress) + Send + Sync + 'static,
    {
        self.shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    pub fn progress(&self) -> AggregatedProgress { self.shared.progress().clone() }

    /// Percentage high-water mark, `0..=100`.
    pub fn percent(&self) -> u8 { self.shared.progress().percent }

    pub fn is_active(&self) -> bool { self.shared.progress().active }

    /// Diagnostics for the most recent failed operation.
    pub fn last_error(&self) -> Option<Failure> { self.shared.progress().last_error.clone() }

    /// Return the percentage to zero so the next operation starts fresh.
    pub fn reset_progress(&mut self) {
        let current = {
            let mut progress = self.shared.progress();
            if progress.percent == 0 {
                return;
            }
            progress.reset();
            progress.clone()
        };
        self.shared.notify(&[ClientProperty::OperationProgress], &current);
    }

    /// GET `query_path` under the configured base address as UTF-8 text.
    pub async fn get_string(&mut self, query_path: &str) -> Result<String> {
        let base = self.options.base_url.clone();
        self.get_string_from(&base, query_path).await
    }

    /// GET `base + query_path` as UTF-8 text.
    ///
    /// A cancelled transfer decodes whatever arrived before cancellation.
    pub async fn get_string_from(&mut self, base: &str, query_path: &str) -> Result<String> {
        let result = self.fetch_string(base, query_path).await;
        self.settle(result)
    }

    /// GET `query_path` under the configured base address and build a model.
    pub async fn get_model<T: LapiModel>(&mut self, query_path: &str) -> Result<T> {
        let base = self.options.base_url.clone();
        self.get_model_from(&base, query_path).await
    }

    /// GET `base + query_path` and build a model from the decoded text.
    pub async fn get_model_from<T: LapiModel>(
        &mut self,
        base: &str,
        query_path: &str,
    ) -> Result<T> {
        let result = match self.fetch_string(base, query_path).await {
            Ok(text) => T::build(&text).map_err(Error::from),
            Err(e) => Err(e),
        };
        self.settle(result)
    }

    /// GET `base + query_path` and return the raw body.
    pub async fn get_bytes_from(&mut self, base: &str, query_path: &str) -> Result<Transfer> {
        let result = self.fetch(base, query_path).await;
        self.settle(result)
    }

    fn settle<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            warn!(kind = %e.kind(), error = %e, "operation failed");
            self.shared.progress().record_failure(e);
        }
        result
    }

    async fn fetch_string(&self, base: &str, query_path: &str) -> Result<String> {
        let transfer = self.fetch(base, query_path).await?;
        Ok(String::from_utf8(transfer.into_bytes())?)
    }

    async fn fetch(&self, base: &str, query_path: &str) -> Result<Transfer> {
        let url = request_url(base, query_path, &self.credential, self.options.auth)?;
        // The query carries credentials, keep it out of the logs.
        debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "issuing GET");

        let HttpResponse {
            content_length,
            body,
        } = self
            .client
            .get(&url, &self.options.headers)
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let reader = StreamReader::new(body.map_err(io::Error::other));
        let shared = Arc::clone(&self.shared);
        let mut progress = ProgressState::with_observer(Arc::new(move |s: &ProgressSnapshot| {
            shared.on_progress(s)
        }));

        let out = transfer(
            reader,
            self.options.chunk_size,
            content_length,
            &self.cancellation,
            &mut progress,
        )
        .await?;

        if out.cancelled {
            warn!(bytes = out.len(), total = ?content_length, "transfer cancelled, body is partial");
        } else {
            info!(bytes = out.len(), path = url.path(), "transfer complete");
        }
        Ok(out)
    }
}
