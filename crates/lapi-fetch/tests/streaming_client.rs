//! End-to-end tests for `StreamingClient` over an in-memory transport.
//!
//! The mock transport hands back scripted body chunks so the whole pipeline
//! (URL assembly, transfer loop, progress adaptation, decoding) runs without
//! a network.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures_util::stream;
use lapi_fetch::{
    AuthScheme, Cancellation, ClientOptions, ClientProperty, Credential, ErrorKind, HttpClient,
    HttpResponse, Json, StreamingClient, Url,
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct MockError(String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

/// Mock HTTP client serving a fixed body.
#[derive(Default)]
struct MockHttpClient {
    chunks:         Vec<Bytes>,
    content_length: Option<u64>,
    fail_body:      bool,
    refuse:         bool,
    requests:       Mutex<Vec<String>>,
}

impl MockHttpClient {
    fn serving(body: &[u8]) -> Self {
        Self {
            chunks: vec![Bytes::copy_from_slice(body)],
            content_length: Some(body.len() as u64),
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<String> { self.requests.lock().unwrap().clone() }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;

    async fn get(
        &self,
        url: &Url,
        _headers: &[(String, String)],
    ) -> Result<HttpResponse<MockError>, MockError> {
        self.requests.lock().unwrap().push(url.to_string());
        if self.refuse {
            return Err(MockError("connection refused".into()));
        }

        let mut items: Vec<Result<Bytes, MockError>> =
            self.chunks.iter().cloned().map(Ok).collect();
        if self.fail_body {
            items.push(Err(MockError("connection reset".into())));
        }
        Ok(HttpResponse::new(self.content_length, Box::pin(stream::iter(items))))
    }
}

fn client(mock: MockHttpClient) -> StreamingClient<MockHttpClient> {
    StreamingClient::new(mock, Credential::with_token("K1", "T1"))
        .with_options(ClientOptions::default().base_url("http://lapi.test/api"))
}

fn record_percent(client: &StreamingClient<MockHttpClient>) -> Arc<Mutex<Vec<u8>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    client.observe(move |property, progress| {
        if property == ClientProperty::OperationProgress {
            sink.lock().unwrap().push(progress.percent);
        }
    });
    seen
}

#[tokio::test]
async fn test_get_string_streams_whole_body() {
    let body = "x".repeat(2500);
    let mut client = client(MockHttpClient::serving(body.as_bytes()));
    let percents = record_percent(&client);

    let text = client.get_string("/Modules?a=1&").await.unwrap();

    assert_eq!(text, body);
    assert_eq!(client.percent(), 100);
    assert!(!client.is_active());
    assert!(client.last_error().is_none());
    // floor(1024*100/2500), floor(2048*100/2500), 100
    assert_eq!(*percents.lock().unwrap(), vec![40, 81, 100]);
}

#[tokio::test]
async fn test_percent_never_decreases_over_chunked_body() {
    let chunks: Vec<Bytes> = (0..10).map(|_| Bytes::from(vec![b'a'; 300])).collect();
    let mut client = client(MockHttpClient {
        chunks,
        content_length: Some(3000),
        ..Default::default()
    });
    let percents = record_percent(&client);

    client.get_string("/Stream?").await.unwrap();

    let percents = percents.lock().unwrap();
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(percents.last(), Some(&100));
}

#[tokio::test]
async fn test_activity_notifications_are_edge_triggered() {
    let mut client = client(MockHttpClient::serving(b"hello"));
    let flags = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&flags);
    client.observe(move |property, progress| {
        if property == ClientProperty::OperationInProgress {
            sink.lock().unwrap().push(progress.active);
        }
    });

    client.get_string("/Hello?").await.unwrap();

    assert_eq!(*flags.lock().unwrap(), vec![true, false]);
}

#[tokio::test]
async fn test_requests_carry_exact_urls() {
    let mock = MockHttpClient::serving(b"ok");
    let mut client = StreamingClient::new(mock, Credential::with_token("K1", "T1"))
        .with_options(ClientOptions::default().auth(AuthScheme::Token));

    client.get_string_from("http://x", "/?a=1").await.unwrap();
    client
        .get_string_from("http://x", "/?APIKey=K1&Token=T1")
        .await
        .unwrap();

    assert_eq!(
        client.transport().requests(),
        vec![
            "http://x/?a=1APIKey=K1&Token=T1".to_string(),
            "http://x/?APIKey=K1&Token=T1".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_empty_body_completes_without_dividing_by_zero() {
    let mut client = client(MockHttpClient::serving(b""));

    let text = client.get_string("/Empty?").await.unwrap();

    assert!(text.is_empty());
    assert_eq!(client.percent(), 100);
    assert!(!client.is_active());
}

#[tokio::test]
async fn test_unknown_length_has_no_percent_estimate() {
    let mut client = client(MockHttpClient {
        chunks: vec![Bytes::from_static(b"abc")],
        content_length: None,
        ..Default::default()
    });

    let out = client.get_bytes_from("http://x", "/Unknown?").await.unwrap();

    assert_eq!(out.data, b"abc");
    assert!(out.is_complete(None));
    assert_eq!(client.percent(), 0);
}

#[tokio::test]
async fn test_get_model_builds_json() {
    #[derive(Debug, Deserialize)]
    struct Modules {
        #[serde(rename = "Results")]
        results: Vec<String>,
    }

    let mut client = client(MockHttpClient::serving(br#"{ "Results": ["CS1010", "CS2040"] }"#));

    let Json(modules) = client.get_model::<Json<Modules>>("/Modules?").await.unwrap();

    assert_eq!(modules.results, vec!["CS1010", "CS2040"]);
}

#[tokio::test]
async fn test_model_parse_failure_is_decode_error() {
    let mut client = client(MockHttpClient::serving(b"<html>not json</html>"));

    let err = client
        .get_model::<Json<Vec<String>>>("/Modules?")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(client.last_error().unwrap().kind, ErrorKind::Decode);
}

#[tokio::test]
async fn test_invalid_utf8_is_decode_error() {
    let mut client = client(MockHttpClient::serving(&[0xff, 0xfe, 0x00]));

    let err = client.get_string("/Binary?").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(client.last_error().is_some());
    assert_eq!(client.percent(), 100);
}

#[tokio::test]
async fn test_malformed_url_is_request_construction_error() {
    let mut client = client(MockHttpClient::serving(b"unused"));

    let err = client.get_string_from("not a url", "/x").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestConstruction);
    assert_eq!(client.last_error().unwrap().kind, ErrorKind::RequestConstruction);
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_transfer_error() {
    let mut client = client(MockHttpClient {
        refuse: true,
        ..Default::default()
    });

    let err = client.get_string("/Modules?").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transfer);
    let failure = client.last_error().unwrap();
    assert!(failure.message.contains("connection refused"));
    assert!(!client.is_active());
}

#[tokio::test]
async fn test_body_error_mid_stream_is_transfer_error() {
    let mut client = client(MockHttpClient {
        chunks: vec![Bytes::from(vec![b'a'; 1024])],
        content_length: Some(4096),
        fail_body: true,
        ..Default::default()
    });

    let err = client.get_string("/Modules?").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transfer);
    assert_eq!(client.percent(), 25);
    assert!(!client.is_active());
}

#[tokio::test]
async fn test_last_error_survives_later_success() {
    let mut client = client(MockHttpClient::serving(b"fine"));

    client.get_string_from("bad base", "/x").await.unwrap_err();
    client.get_string("/Ok?").await.unwrap();

    assert_eq!(client.last_error().unwrap().kind, ErrorKind::RequestConstruction);
}

#[tokio::test]
async fn test_cancel_before_start_returns_empty_body() {
    let token = CancellationToken::new();
    token.cancel();
    let mut client = client(MockHttpClient::serving(&[b'z'; 4096])).with_cancellation(token);

    let out = client.get_bytes_from("http://x", "/Big?").await.unwrap();

    assert!(out.cancelled);
    assert!(out.is_empty());
    assert!(!client.is_active());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn test_cancel_mid_transfer_returns_partial_body() {
    let token = CancellationToken::new();
    let mut client = client(MockHttpClient::serving(&[b'z'; 8192]));
    client.set_cancellation(Cancellation::from(token.clone()));
    client.observe(move |property, progress| {
        if property == ClientProperty::OperationProgress && progress.percent >= 25 {
            token.cancel();
        }
    });

    let out = client.get_bytes_from("http://x", "/Big?").await.unwrap();

    assert!(out.cancelled);
    assert_eq!(out.len(), 2048);
    assert!(!out.is_complete(Some(8192)));
    assert_eq!(client.percent(), 25);
    assert!(!client.is_active());
}

#[tokio::test]
async fn test_percent_high_water_mark_spans_operations() {
    let mut client = client(MockHttpClient::serving(&[b'a'; 100]));

    client.get_string("/First?").await.unwrap();
    assert_eq!(client.percent(), 100);

    let percents = record_percent(&client);
    client.get_string("/Second?").await.unwrap();
    assert!(percents.lock().unwrap().is_empty());

    client.reset_progress();
    assert_eq!(client.percent(), 0);
    client.get_string("/Third?").await.unwrap();
    assert_eq!(client.percent(), 100);
}

#[tokio::test]
async fn test_small_chunk_size_is_honoured() {
    let mut client =
        StreamingClient::new(MockHttpClient::serving(b"abcdefghij"), Credential::new("K"))
            .with_options(ClientOptions::default().base_url("http://x").chunk_size(3));
    let percents = record_percent(&client);

    assert_eq!(client.get_string("/Letters?").await.unwrap(), "abcdefghij");
    assert_eq!(*percents.lock().unwrap(), vec![30, 60, 90, 100]);
}
