use secrecy::{ExposeSecret as _, SecretString};

/// Where a client's active token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Supplied by the lifecycle hook at session init
    Hook,
    /// A `GQL_<CLIENTNAME>_TOKEN` environment variable
    Environment,
    /// The client's static configuration
    Config,
    /// An explicit runtime `set_token` call
    Runtime,
    Unset,
}

/// Which rendering contexts may observe a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVisibility {
    ServerOnly,
    ClientAndServer,
}

/// An immutable snapshot of one client's credential.
///
/// Mutations replace the whole snapshot, so concurrent readers never observe
/// a partially updated token/scheme pair.
#[derive(Debug, Clone)]
pub struct TokenState {
    value: Option<SecretString>,
    source: TokenSource,
    visibility: TokenVisibility,
    scheme_override: Option<String>,
}

impl TokenState {
    pub(crate) fn new(
        value: Option<SecretString>,
        source: TokenSource,
        visibility: TokenVisibility,
    ) -> Self {
        Self {
            value,
            source,
            visibility,
            scheme_override: None,
        }
    }

    pub(crate) fn unset() -> Self {
        Self::new(None, TokenSource::Unset, TokenVisibility::ServerOnly)
    }

    pub(crate) fn with_scheme_override(mut self, scheme: Option<String>) -> Self {
        self.scheme_override = scheme;
        self
    }

    pub fn value(&self) -> Option<&SecretString> {
        self.value.as_ref()
    }

    pub fn source(&self) -> TokenSource {
        self.source
    }

    pub fn visibility(&self) -> TokenVisibility {
        self.visibility
    }

    /// A runtime scheme override from `set_token`, if any
    pub fn scheme_override(&self) -> Option<&str> {
        self.scheme_override.as_deref()
    }

    /// Whether a non-empty token is held
    pub fn is_set(&self) -> bool {
        self.value
            .as_ref()
            .is_some_and(|value| !value.expose_secret().is_empty())
    }
}
