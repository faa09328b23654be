use std::path::{Component, Path};

use crate::errors::ResolveError;
use crate::operations::Operation;

use super::{ClientConfig, ClientSet};

/// File extensions recognized as GraphQL operation documents
pub const DOCUMENT_EXTENSIONS: [&str; 2] = ["gql", "graphql"];

/// Resolve an operation to exactly one configured client.
///
/// Precedence:
/// 1. A filename of the form `<base>.<client>.<ext>` where `<client>` is a
///    configured client name.
/// 2. The nearest ancestor directory component equal to a configured client
///    name.
/// 3. The default client.
///
/// Resolution depends only on the operation's source path and the static
/// client name set.
pub fn resolve<'a>(
    operation: &Operation,
    clients: &'a ClientSet,
) -> Result<&'a ClientConfig, ResolveError> {
    let path = Path::new(&operation.source_path);

    if let Some(client) = filename_client(path).and_then(|name| clients.get(name)) {
        return Ok(client);
    }

    if let Some(client) = directory_client(path, clients) {
        return Ok(client);
    }

    clients
        .default_client()
        .ok_or_else(|| ResolveError::UnresolvedClient {
            operation: operation.name.clone(),
            source_path: operation.source_path.clone(),
        })
}

/// Extract the `<client>` segment from a `<base>.<client>.<ext>` filename.
///
/// All three segments must be present: a bare `spacex.gql` is a plain file
/// name, not a client qualifier.
fn filename_client(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let mut segments = file_name.rsplit('.');
    let extension = segments.next()?;
    if !DOCUMENT_EXTENSIONS.contains(&extension) {
        return None;
    }
    let client = segments.next()?;
    segments.next()?;
    Some(client)
}

/// Find the nearest ancestor directory component naming a configured client
fn directory_client<'a>(path: &Path, clients: &'a ClientSet) -> Option<&'a ClientConfig> {
    path.parent()?
        .components()
        .rev()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .find_map(|segment| clients.get(segment))
}
