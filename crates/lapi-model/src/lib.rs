//! Credentials and payload models for the LAPI streaming client.
//!
//! Everything here is pure: formatting authentication parameters into a
//! query string and turning a response payload into a typed value. No I/O.

pub use self::credential::Credential;
pub use self::error::{ModelParseError, Result};
pub use self::model::{Json, LapiModel};

mod credential;
mod error;
mod model;
