//! Pure transformations for streaming fetch operations.
//!
//! Nothing in here performs I/O: progress percentages and request URL
//! assembly are plain functions of their inputs.

mod percent;
mod request;

pub use percent::percent_of;
pub use request::{authenticate, join_url, request_url};
