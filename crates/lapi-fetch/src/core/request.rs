use lapi_model::Credential;
use url::Url;

use crate::data::AuthScheme;
use crate::error::{Error, Result};

/// Joins a base address and a query path by concatenation.
///
/// The query path carries its own leading `/` and query string, as in
/// `"/Modules?Duration=0&"`.
#[must_use]
pub fn join_url(base: &str, query_path: &str) -> String { format!("{base}{query_path}") }

/// Appends the authentication parameters `scheme` asks for.
#[must_use]
pub fn authenticate(credential: &Credential, scheme: AuthScheme, url: &str) -> String {
    match scheme {
        AuthScheme::Embedded => url.to_string(),
        AuthScheme::AuthToken => credential.attach_auth_token(url),
        AuthScheme::Token => credential.attach_token(url),
    }
}

/// Builds and parses the full request URL.
pub fn request_url(
    base: &str,
    query_path: &str,
    credential: &Credential,
    scheme: AuthScheme,
) -> Result<Url> {
    let raw = authenticate(credential, scheme, &join_url(base, query_path));
    Url::parse(&raw).map_err(|source| Error::InvalidUrl { url: raw, source })
}
