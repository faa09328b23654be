use apollo_compiler::{ast::Document, validation::WithErrors};
use http::header::InvalidHeaderName;

/// An error in operation catalog construction
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("Could not parse GraphQL document: {0}")]
    GraphQLDocument(Box<WithErrors<Document>>),

    #[error("Could not read document: {0}")]
    File(#[from] std::io::Error),
}

/// An error resolving an operation to a configured client
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(
        "Operation {operation} in {source_path} matches no configured client and no default client is configured"
    )]
    UnresolvedClient {
        operation: String,
        source_path: String,
    },
}

/// An error assigning binding names to operations
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Binding name {name} is defined by both {first_source_path} and {second_source_path}")]
    Collision {
        name: String,
        first_source_path: String,
        second_source_path: String,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// An error in client configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No clients are configured")]
    NoClients,

    #[error("Duplicate client name: {0}")]
    DuplicateClient(String),

    #[error("Client {client} has no host: set one in the config or the {env_var} environment variable")]
    MissingHost { client: String, env_var: String },

    #[error("Invalid host URL for client {client}: {source}")]
    Host {
        client: String,
        source: url::ParseError,
    },

    #[error("Invalid token header name for client {client}: {source}")]
    TokenHeaderName {
        client: String,
        source: InvalidHeaderName,
    },
}
