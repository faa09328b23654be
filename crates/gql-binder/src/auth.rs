//! Authorization header assembly
//!
//! Builds the header a request-dispatch collaborator attaches when calling a
//! client's endpoint. A missing or empty token yields no header rather than
//! an error.

use http::{HeaderName, HeaderValue};
use secrecy::ExposeSecret as _;
use tracing::warn;

use crate::clients::ClientConfig;
use crate::tokens::TokenState;

/// Default authorization scheme prefix
pub const DEFAULT_AUTH_SCHEME: &str = "Bearer";

/// Build the authorization header for a client from its current token state.
///
/// The header name and scheme come from the client's token configuration,
/// with a runtime scheme override from `set_token` taking precedence. An
/// empty scheme sends the bare token. Returns `None` when no token is set or
/// the token cannot form a valid header value.
pub fn authorization_header(
    client: &ClientConfig,
    state: &TokenState,
) -> Option<(HeaderName, HeaderValue)> {
    if !state.is_set() {
        return None;
    }
    let token = state.value()?.expose_secret();

    let name = client
        .token
        .as_ref()
        .map(|token| token.header.clone())
        .unwrap_or(http::header::AUTHORIZATION);

    let scheme = state
        .scheme_override()
        .or_else(|| client.token.as_ref().map(|token| token.scheme.as_str()))
        .unwrap_or(DEFAULT_AUTH_SCHEME);

    let raw = if scheme.is_empty() {
        token.to_string()
    } else {
        format!("{scheme} {token}")
    };

    match HeaderValue::from_str(&raw) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some((name, value))
        }
        Err(_) => {
            warn!(
                "Token for client {} does not form a valid header value; no authorization header will be attached",
                client.name
            );
            None
        }
    }
}
