//! Token store
//!
//! Per-client authentication credential holder. Each client has exactly one
//! token slot, initialized once with a fixed precedence between a lifecycle
//! hook, environment variables, and static configuration, and replaced
//! atomically thereafter.

mod state;
mod store;

pub use state::{TokenSource, TokenState, TokenVisibility};
pub use store::{SetTokenOptions, TokenHook, TokenStore};
