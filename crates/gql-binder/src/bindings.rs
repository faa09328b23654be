//! Bindings
//!
//! This module assigns each cataloged operation a unique generated
//! identifier and pairs it with its resolved client. The resulting list is
//! the hand-off to the code-generation collaborator.

use std::collections::hash_map::{Entry, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::clients::{resolve, ClientSet};
use crate::errors::BindingError;
use crate::operations::{Catalog, Operation};

/// Default prefix applied to generated binding names
pub const DEFAULT_PREFIX: &str = "Gql";

/// A generated callable identifier mapping one operation to one client
#[derive(Debug, Clone, Serialize)]
pub struct Binding {
    pub name: String,
    pub client: String,
    pub operation: Operation,
}

/// Derive the binding name for an operation.
///
/// Names are the prefix concatenated with the operation name, case
/// preserved; no normalization is applied.
pub fn binding_name(prefix: &str, operation_name: &str) -> String {
    format!("{prefix}{operation_name}")
}

/// Resolve and name every operation in the catalog.
///
/// Binding names must be unique across the whole catalog; the first
/// duplicate fails with [`BindingError::Collision`] naming both source
/// paths, even when the colliding operations are textually identical.
/// Output order follows catalog order.
pub fn bind_all(
    catalog: Catalog,
    clients: &ClientSet,
    prefix: &str,
) -> Result<Vec<Binding>, BindingError> {
    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut bindings = Vec::with_capacity(catalog.len());

    for operation in catalog.into_operations() {
        let client = resolve(&operation, clients)?;
        let name = binding_name(prefix, &operation.name);

        match first_seen.entry(name.clone()) {
            Entry::Occupied(entry) => {
                return Err(BindingError::Collision {
                    name,
                    first_source_path: entry.get().clone(),
                    second_source_path: operation.source_path,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(operation.source_path.clone());
            }
        }

        debug!(
            "Bound {} ({} in {}) to client {}",
            name, operation.name, operation.source_path, client.name
        );
        bindings.push(Binding {
            name,
            client: client.name.clone(),
            operation,
        });
    }

    Ok(bindings)
}
