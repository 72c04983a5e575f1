//! I/O operations for streaming fetch.
//!
//! The HTTP transport sits behind [`HttpClient`] so the transfer loop and the
//! client can be driven by in-memory bodies in tests.

mod cancel;
mod client;
mod http;
mod transfer;

pub use cancel::Cancellation;
pub use client::{ClientObserver, DEFAULT_BASE_URL, StreamingClient};
pub use http::{BoxStream, HttpClient, HttpResponse};
pub use transfer::{Transfer, transfer};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
