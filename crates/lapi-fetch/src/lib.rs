//! Credential-authenticated HTTP GET with chunked streaming and progress reporting.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and progress types
//! - [`core`] - Pure transformations (percentage, URL assembly)
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Chunked Copy**: The response body is read in fixed-size chunks into memory,
//!   with a progress report after every chunk
//! - **Exclusive Direction**: [`ProgressState`] keeps receive and send counters
//!   mutually exclusive
//! - **High-Water Mark**: [`StreamingClient`] exposes a percentage that never decreases
//! - **Cooperative Cancellation**: A [`Cancellation`] context stops the copy at the
//!   next chunk read and keeps the bytes moved so far

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{join_url, percent_of};
pub use data::{
    AggregatedProgress, AuthScheme, ClientOptions, ClientProperty, Direction, Failure,
    ProgressCallback, ProgressSnapshot, ProgressState,
};
pub use effects::{
    BoxStream, Cancellation, ClientObserver, DEFAULT_BASE_URL, HttpClient, HttpResponse,
    StreamingClient, Transfer, transfer,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, ErrorKind, Result};
pub use lapi_model::{Credential, Json, LapiModel, ModelParseError};
pub use url::Url;
