//! Client configuration
//!
//! A client is a named backend GraphQL endpoint. Each operation document in a
//! project resolves to exactly one client, by filename or directory
//! convention, falling back to the designated default client.

mod client_config;
mod resolver;

pub use client_config::{ClientConfig, ClientSet, TokenConfig, DEFAULT_CLIENT_NAME};
pub(crate) use client_config::{credential_env, env_key};
pub use resolver::{resolve, DOCUMENT_EXTENSIONS};
