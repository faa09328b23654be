use http::HeaderName;
use secrecy::SecretString;
use url::Url;

use crate::errors::ConfigError;

/// The client name that designates the default client
pub const DEFAULT_CLIENT_NAME: &str = "default";

/// A named backend GraphQL endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub name: String,
    pub host: Url,
    pub token: Option<TokenConfig>,
    /// Forward cookies from the server-side request to the upstream endpoint
    pub proxy_cookies: bool,
    /// Expose config- and environment-sourced tokens to the client context
    pub retain_token: bool,
}

impl ClientConfig {
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CLIENT_NAME
    }

    /// Look up a credential environment variable for this client.
    ///
    /// Qualified keys take the form `GQL_<CLIENTNAME>_<KEY>`; the default
    /// client also answers to the bare `GQL_<KEY>` form.
    pub(crate) fn credential_env(&self, key: &str) -> Option<String> {
        credential_env(&self.name, key)
    }
}

/// Static token configuration for a client
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// The header the token is sent in
    pub header: HeaderName,
    pub value: Option<SecretString>,
    /// The authorization scheme prefix; an empty scheme sends the bare token
    pub scheme: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            header: http::header::AUTHORIZATION,
            value: None,
            scheme: crate::auth::DEFAULT_AUTH_SCHEME.to_string(),
        }
    }
}

/// The validated, read-only set of configured clients.
///
/// Insertion order is preserved; names are unique.
#[derive(Debug)]
pub struct ClientSet {
    clients: Vec<ClientConfig>,
}

impl ClientSet {
    pub fn new(clients: Vec<ClientConfig>) -> Result<Self, ConfigError> {
        if clients.is_empty() {
            return Err(ConfigError::NoClients);
        }
        let mut seen = std::collections::HashSet::new();
        for client in &clients {
            if !seen.insert(client.name.as_str()) {
                return Err(ConfigError::DuplicateClient(client.name.clone()));
            }
        }
        Ok(Self { clients })
    }

    pub fn get(&self, name: &str) -> Option<&ClientConfig> {
        self.clients.iter().find(|client| client.name == name)
    }

    /// The designated default client, if one is configured
    pub fn default_client(&self) -> Option<&ClientConfig> {
        self.get(DEFAULT_CLIENT_NAME)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientConfig> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// The qualified environment variable key for a client credential
pub(crate) fn env_key(client_name: &str, key: &str) -> String {
    format!("GQL_{}_{key}", env_client_name(client_name))
}

/// See [`ClientConfig::credential_env`]
pub(crate) fn credential_env(client_name: &str, key: &str) -> Option<String> {
    let non_empty = |value: String| (!value.is_empty()).then_some(value);
    std::env::var(env_key(client_name, key))
        .ok()
        .and_then(non_empty)
        .or_else(|| {
            if client_name == DEFAULT_CLIENT_NAME {
                std::env::var(format!("GQL_{key}")).ok().and_then(non_empty)
            } else {
                None
            }
        })
}

/// Uppercase the client name for use in an environment variable key,
/// replacing anything outside `[A-Z0-9]` with an underscore
fn env_client_name(client_name: &str) -> String {
    client_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
