use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr as _;

use http::HeaderName;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::clients::{credential_env, env_key, ClientConfig, ClientSet, TokenConfig};
use crate::errors::ConfigError;

use super::Logging;

/// Configuration for the binder
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The configured clients, keyed by name; the entry named `default` is
    /// the default client
    pub clients: BTreeMap<String, ClientEntry>,

    /// Code generation options
    pub codegen: Codegen,

    /// Operation document files or directories to scan
    pub documents: Vec<PathBuf>,

    /// Logging configuration
    pub logging: Logging,

    /// Token storage backend used by the request dispatcher
    pub token_storage: TokenStorage,
}

impl Config {
    /// Resolve the configured clients into an immutable client set.
    ///
    /// Per-client credential environment variables (`GQL_<CLIENTNAME>_HOST`,
    /// `GQL_<CLIENTNAME>_TOKEN_NAME`; bare `GQL_HOST` for the default
    /// client) beat the file values for the fields they cover.
    pub fn client_set(&self) -> Result<ClientSet, ConfigError> {
        let mut clients = Vec::with_capacity(self.clients.len());
        for (name, entry) in &self.clients {
            clients.push(entry.resolve(name)?);
        }
        ClientSet::new(clients)
    }
}

/// A client declaration: either a bare host URL or a detailed entry
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ClientEntry {
    /// Shorthand declaring only the host
    Host(Url),

    /// A detailed client entry
    Entry {
        /// The client's GraphQL endpoint
        host: Option<Url>,

        /// Static token configuration
        #[serde(default)]
        token: Option<TokenEntry>,

        /// Forward cookies from the server-side request to the endpoint
        #[serde(default = "defaults::proxy_cookies")]
        proxy_cookies: bool,

        /// Expose config- and environment-sourced tokens to the client context
        #[serde(default)]
        retain_token: bool,
    },
}

impl ClientEntry {
    fn resolve(&self, name: &str) -> Result<ClientConfig, ConfigError> {
        let (file_host, token_entry, proxy_cookies, retain_token) = match self {
            ClientEntry::Host(url) => (Some(url), None, defaults::proxy_cookies(), false),
            ClientEntry::Entry {
                host,
                token,
                proxy_cookies,
                retain_token,
            } => (host.as_ref(), token.as_ref(), *proxy_cookies, *retain_token),
        };

        let host = match credential_env(name, "HOST") {
            Some(value) => Url::parse(&value).map_err(|source| ConfigError::Host {
                client: name.to_string(),
                source,
            })?,
            None => file_host
                .cloned()
                .ok_or_else(|| ConfigError::MissingHost {
                    client: name.to_string(),
                    env_var: env_key(name, "HOST"),
                })?,
        };

        let header_name = credential_env(name, "TOKEN_NAME");
        let token = match (token_entry, header_name) {
            (None, None) => None,
            (entry, header_name) => {
                let header = header_name
                    .or_else(|| entry.map(|entry| entry.name.clone()))
                    .unwrap_or_else(defaults::token_header);
                Some(TokenConfig {
                    header: HeaderName::from_str(&header).map_err(|source| {
                        ConfigError::TokenHeaderName {
                            client: name.to_string(),
                            source,
                        }
                    })?,
                    value: entry.and_then(|entry| entry.value.clone()),
                    scheme: entry
                        .map(|entry| entry.scheme.clone())
                        .unwrap_or_else(defaults::scheme),
                })
            }
        };

        Ok(ClientConfig {
            name: name.to_string(),
            host,
            token,
            proxy_cookies,
            retain_token,
        })
    }
}

/// Static token configuration for a client entry
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TokenEntry {
    /// The header the token is sent in
    pub name: String,

    /// The token value
    #[schemars(with = "Option<String>")]
    pub value: Option<SecretString>,

    /// The authorization scheme prefix; an empty scheme sends the bare token
    pub scheme: String,
}

impl Default for TokenEntry {
    fn default() -> Self {
        Self {
            name: defaults::token_header(),
            value: None,
            scheme: defaults::scheme(),
        }
    }
}

/// Code generation options.
///
/// Accepts either a bare boolean (`codegen: false` disables binding
/// generation entirely) or a map with `enabled` and `prefix`.
#[derive(Debug, JsonSchema)]
pub struct Codegen {
    /// Disable to skip binding generation entirely
    pub enabled: bool,

    /// Prefix applied to generated binding names
    pub prefix: String,
}

impl Default for Codegen {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: crate::bindings::DEFAULT_PREFIX.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Codegen {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Enabled(bool),
            Options {
                #[serde(default = "enabled_default")]
                enabled: bool,
                #[serde(default = "prefix_default")]
                prefix: String,
            },
        }

        fn enabled_default() -> bool {
            Codegen::default().enabled
        }

        fn prefix_default() -> String {
            Codegen::default().prefix
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Enabled(enabled) => Self {
                enabled,
                ..Self::default()
            },
            Raw::Options { enabled, prefix } => Self { enabled, prefix },
        })
    }
}

/// Token storage used by the request dispatcher for retained tokens
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TokenStorage {
    pub mode: TokenStorageMode,
}

/// The storage backend for retained tokens.
///
/// Local storage is incompatible with server-rendered flows; the dispatch
/// collaborator enforces this.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenStorageMode {
    #[default]
    Cookie,
    LocalStorage,
}

mod defaults {
    use crate::auth::DEFAULT_AUTH_SCHEME;

    pub(super) const fn proxy_cookies() -> bool {
        true
    }

    pub(super) fn token_header() -> String {
        "authorization".to_string()
    }

    pub(super) fn scheme() -> String {
        DEFAULT_AUTH_SCHEME.to_string()
    }
}
