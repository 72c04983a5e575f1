use serde::{Deserialize, Serialize};

/// API key plus an optional user token.
///
/// The authentication parameters are appended to a URL by plain string
/// concatenation: the caller owns the query separator (`?` or `&`). Both
/// attach methods are idempotent, the parameters are only appended when the
/// exact parameter string is not already part of the URL.
///
/// # Examples
///
/// ```
/// use lapi_model::Credential;
///
/// let credential = Credential::with_token("K1", "T1");
/// let url = credential.attach_token("http://x/?a=1");
/// assert_eq!(url, "http://x/?a=1APIKey=K1&Token=T1");
/// assert_eq!(credential.attach_token(&url), url);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token:   Option<String>,
}

impl Credential {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token:   None,
        }
    }

    pub fn with_token(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token:   Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> { self.token.as_deref() }

    /// `APIKey=<key>&AuthToken=<token>`
    pub fn auth_token_params(&self) -> String {
        format!("APIKey={}&AuthToken={}", self.api_key, self.token().unwrap_or_default())
    }

    /// `APIKey=<key>&Token=<token>`
    pub fn token_params(&self) -> String {
        format!("APIKey={}&Token={}", self.api_key, self.token().unwrap_or_default())
    }

    pub fn attach_auth_token(&self, url: &str) -> String {
        append_once(url, &self.auth_token_params())
    }

    pub fn attach_token(&self, url: &str) -> String { append_once(url, &self.token_params()) }
}

fn append_once(url: &str, params: &str) -> String {
    if url.contains(params) {
        url.to_string()
    } else {
        format!("{url}{params}")
    }
}
