use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::clients::{ClientConfig, ClientSet};

use super::{TokenSource, TokenState, TokenVisibility};

/// A lifecycle hook supplying a session token for a client before the first
/// request is dispatched.
///
/// Registered by the host runtime and consulted once per client during store
/// initialization; a non-empty value takes precedence over environment and
/// configuration tokens.
pub trait TokenHook: Send + Sync {
    fn token_for(&self, client: &ClientConfig) -> Option<String>;
}

/// Options for an explicit runtime `set_token` call
#[derive(Debug, Default, Clone)]
pub struct SetTokenOptions {
    /// Override the authorization scheme for this token
    pub scheme: Option<String>,
    /// Hint to the storage collaborator to persist the token across sessions
    pub persist: bool,
}

/// Process-wide holder of one [`TokenState`] per client.
///
/// Reads hand out `Arc` snapshots; every mutation installs a fresh snapshot
/// under the write lock, so concurrent readers always observe a fully formed
/// state.
pub struct TokenStore {
    states: RwLock<HashMap<String, Arc<TokenState>>>,
    hooked: Mutex<HashSet<String>>,
}

impl TokenStore {
    /// Build the initial token state for every configured client.
    ///
    /// Precedence, highest first: hook value, `GQL_<CLIENTNAME>_TOKEN`
    /// environment variable (bare `GQL_TOKEN` for the default client), the
    /// client's configured token value, unset.
    pub fn init(clients: &ClientSet, hook: Option<&dyn TokenHook>) -> Self {
        let mut states = HashMap::with_capacity(clients.len());
        let mut hooked = HashSet::new();

        for client in clients.iter() {
            let state = if let Some(value) = hook_value(client, hook) {
                hooked.insert(client.name.clone());
                initial_state(client, value, TokenSource::Hook)
            } else if let Some(value) = client.credential_env("TOKEN") {
                initial_state(client, value, TokenSource::Environment)
            } else if let Some(value) = config_value(client) {
                initial_state(client, value, TokenSource::Config)
            } else {
                TokenState::unset()
            };
            debug!("Token for client {} initialized from {:?}", client.name, state.source());
            states.insert(client.name.clone(), Arc::new(state));
        }

        Self {
            states: RwLock::new(states),
            hooked: Mutex::new(hooked),
        }
    }

    /// Apply a hook-supplied token after init.
    ///
    /// The first call per client wins; later calls are ignored with a
    /// diagnostic. Empty values are ignored without consuming the slot.
    pub fn apply_hook(&self, client: &ClientConfig, value: &str) {
        if value.is_empty() {
            return;
        }
        {
            let mut hooked = self.hooked.lock();
            if !hooked.insert(client.name.clone()) {
                warn!(
                    "Ignoring repeated token hook for client {}: the first value is kept",
                    client.name
                );
                return;
            }
        }
        self.replace(
            &client.name,
            initial_state(client, value.to_string(), TokenSource::Hook),
        );
    }

    /// Explicitly set or clear a client's token.
    ///
    /// Always wins over prior state and is always visible to both the client
    /// and server contexts; a missing or empty value clears the token.
    pub fn set_token(&self, client_name: &str, value: Option<&str>, options: SetTokenOptions) {
        let value = value.filter(|value| !value.is_empty());
        let state = TokenState::new(
            value.map(SecretString::from),
            TokenSource::Runtime,
            TokenVisibility::ClientAndServer,
        )
        .with_scheme_override(options.scheme);
        self.replace(client_name, state);
    }

    /// A consistent snapshot of a client's token state
    pub fn state(&self, client_name: &str) -> Option<Arc<TokenState>> {
        self.states.read().get(client_name).cloned()
    }

    fn replace(&self, client_name: &str, state: TokenState) {
        let mut states = self.states.write();
        match states.get_mut(client_name) {
            Some(slot) => *slot = Arc::new(state),
            None => warn!("Ignoring token update for unknown client {client_name}"),
        }
    }
}

fn hook_value(client: &ClientConfig, hook: Option<&dyn TokenHook>) -> Option<String> {
    hook.and_then(|hook| hook.token_for(client))
        .filter(|value| !value.is_empty())
}

fn config_value(client: &ClientConfig) -> Option<String> {
    use secrecy::ExposeSecret as _;
    client
        .token
        .as_ref()
        .and_then(|token| token.value.as_ref())
        .map(|value| value.expose_secret().to_string())
        .filter(|value| !value.is_empty())
}

/// Config-, environment-, and hook-sourced tokens are server-only unless the
/// client retains tokens; only an explicit runtime `set_token` forces
/// client-and-server visibility.
fn initial_state(client: &ClientConfig, value: String, source: TokenSource) -> TokenState {
    let visibility = if client.retain_token {
        TokenVisibility::ClientAndServer
    } else {
        TokenVisibility::ServerOnly
    };
    TokenState::new(Some(SecretString::from(value)), source, visibility)
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;
    use url::Url;

    use crate::clients::TokenConfig;

    use super::*;

    struct FixedHook(&'static str);

    impl TokenHook for FixedHook {
        fn token_for(&self, _client: &ClientConfig) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn client(name: &str, config_token: Option<&str>, retain_token: bool) -> ClientConfig {
        ClientConfig {
            name: name.to_string(),
            host: Url::parse("https://example.com/graphql").unwrap(),
            token: config_token.map(|value| TokenConfig {
                value: Some(SecretString::from(value)),
                ..TokenConfig::default()
            }),
            proxy_cookies: true,
            retain_token,
        }
    }

    fn client_set(clients: Vec<ClientConfig>) -> ClientSet {
        ClientSet::new(clients).unwrap()
    }

    fn token_of(store: &TokenStore, name: &str) -> Option<String> {
        store
            .state(name)?
            .value()
            .map(|value| value.expose_secret().to_string())
    }

    #[test]
    fn it_prefers_the_hook_over_environment_and_config() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GQL_SPACEX_TOKEN", "B");
            let clients = client_set(vec![client("spacex", Some("A"), false)]);
            let hook = FixedHook("C");

            let store = TokenStore::init(&clients, Some(&hook));

            assert_eq!(token_of(&store, "spacex").as_deref(), Some("C"));
            assert_eq!(store.state("spacex").unwrap().source(), TokenSource::Hook);
            Ok(())
        });
    }

    #[test]
    fn it_prefers_the_environment_over_config_without_a_hook() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GQL_SPACEX_TOKEN", "B");
            let clients = client_set(vec![client("spacex", Some("A"), false)]);

            let store = TokenStore::init(&clients, None);

            assert_eq!(token_of(&store, "spacex").as_deref(), Some("B"));
            assert_eq!(
                store.state("spacex").unwrap().source(),
                TokenSource::Environment
            );
            Ok(())
        });
    }

    #[test]
    fn it_falls_back_to_the_config_token() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", Some("A"), false)]);

            let store = TokenStore::init(&clients, None);

            assert_eq!(token_of(&store, "spacex").as_deref(), Some("A"));
            assert_eq!(store.state("spacex").unwrap().source(), TokenSource::Config);
            Ok(())
        });
    }

    #[test]
    fn it_leaves_clients_without_any_token_unset() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", None, false)]);

            let store = TokenStore::init(&clients, None);

            let state = store.state("spacex").unwrap();
            assert!(!state.is_set());
            assert_eq!(state.source(), TokenSource::Unset);
            Ok(())
        });
    }

    #[test]
    fn it_keeps_config_tokens_server_only_by_default() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![
                client("spacex", Some("A"), false),
                client("github", Some("A"), true),
            ]);

            let store = TokenStore::init(&clients, None);

            assert_eq!(
                store.state("spacex").unwrap().visibility(),
                TokenVisibility::ServerOnly
            );
            assert_eq!(
                store.state("github").unwrap().visibility(),
                TokenVisibility::ClientAndServer
            );
            Ok(())
        });
    }

    #[test]
    fn it_always_exposes_runtime_tokens_to_both_contexts() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", None, false)]);
            let store = TokenStore::init(&clients, None);

            store.set_token("spacex", Some("post-login"), SetTokenOptions::default());

            let state = store.state("spacex").unwrap();
            assert_eq!(state.visibility(), TokenVisibility::ClientAndServer);
            assert_eq!(state.source(), TokenSource::Runtime);
            assert_eq!(token_of(&store, "spacex").as_deref(), Some("post-login"));
            Ok(())
        });
    }

    #[test]
    fn it_clears_the_token_when_set_to_nothing() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", Some("A"), false)]);
            let store = TokenStore::init(&clients, None);

            store.set_token("spacex", None, SetTokenOptions::default());

            let state = store.state("spacex").unwrap();
            assert!(!state.is_set());
            assert_eq!(state.source(), TokenSource::Runtime);
            Ok(())
        });
    }

    #[test]
    fn it_records_a_runtime_scheme_override() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", None, false)]);
            let store = TokenStore::init(&clients, None);

            store.set_token(
                "spacex",
                Some("t"),
                SetTokenOptions {
                    scheme: Some("Token".to_string()),
                    ..SetTokenOptions::default()
                },
            );

            assert_eq!(
                store.state("spacex").unwrap().scheme_override(),
                Some("Token")
            );
            Ok(())
        });
    }

    #[test]
    fn it_ignores_a_second_hook_for_the_same_client() {
        figment::Jail::expect_with(|_jail| {
            let spacex = client("spacex", None, false);
            let clients = client_set(vec![spacex.clone()]);
            let store = TokenStore::init(&clients, None);

            store.apply_hook(&spacex, "first");
            store.apply_hook(&spacex, "second");

            assert_eq!(token_of(&store, "spacex").as_deref(), Some("first"));
            Ok(())
        });
    }

    #[test]
    fn it_counts_the_init_hook_as_the_one_allowed_invocation() {
        figment::Jail::expect_with(|_jail| {
            let spacex = client("spacex", None, false);
            let clients = client_set(vec![spacex.clone()]);
            let hook = FixedHook("from-init");
            let store = TokenStore::init(&clients, Some(&hook));

            store.apply_hook(&spacex, "late");

            assert_eq!(token_of(&store, "spacex").as_deref(), Some("from-init"));
            Ok(())
        });
    }

    #[test]
    fn it_ignores_empty_hook_values_without_consuming_the_slot() {
        figment::Jail::expect_with(|_jail| {
            let spacex = client("spacex", None, false);
            let clients = client_set(vec![spacex.clone()]);
            let store = TokenStore::init(&clients, None);

            store.apply_hook(&spacex, "");
            store.apply_hook(&spacex, "real");

            assert_eq!(token_of(&store, "spacex").as_deref(), Some("real"));
            Ok(())
        });
    }

    #[test]
    fn it_ignores_updates_for_unknown_clients() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", None, false)]);
            let store = TokenStore::init(&clients, None);

            store.set_token("github", Some("t"), SetTokenOptions::default());

            assert!(store.state("github").is_none());
            Ok(())
        });
    }

    #[test]
    fn it_hands_out_consistent_snapshots_across_replacement() {
        figment::Jail::expect_with(|_jail| {
            let clients = client_set(vec![client("spacex", Some("A"), false)]);
            let store = TokenStore::init(&clients, None);

            let before = store.state("spacex").unwrap();
            store.set_token("spacex", Some("B"), SetTokenOptions::default());
            let after = store.state("spacex").unwrap();

            assert_eq!(before.value().map(|v| v.expose_secret()), Some("A"));
            assert_eq!(after.value().map(|v| v.expose_secret()), Some("B"));
            Ok(())
        });
    }
}
