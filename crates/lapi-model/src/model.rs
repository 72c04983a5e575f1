use serde::de::DeserializeOwned;

use crate::{ModelParseError, Result};

/// A value that can be built from a decoded response payload.
pub trait LapiModel: Sized {
    fn build(raw: &str) -> Result<Self>;
}

impl LapiModel for String {
    fn build(raw: &str) -> Result<Self> { Ok(raw.to_string()) }
}

/// Builds any `serde` type from a JSON payload.
///
/// ```
/// use lapi_model::{Json, LapiModel};
///
/// let Json(values) = Json::<Vec<u32>>::build("[1, 2, 3]").unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T { self.0 }
}

impl<T: DeserializeOwned> LapiModel for Json<T> {
    fn build(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(ModelParseError::Empty);
        }
        Ok(Json(serde_json::from_str(raw)?))
    }
}
