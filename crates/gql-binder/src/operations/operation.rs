use apollo_compiler::ast::OperationType;
use serde::Serialize;
use std::fmt;

/// A named GraphQL operation extracted from a document.
///
/// The full document text is carried alongside the operation name so that a
/// dispatch collaborator can send the document as-is with an `operationName`,
/// keeping any fragments the operation depends on.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub name: String,
    pub kind: OperationKind,
    pub source_path: String,
    pub source_text: String,
}

/// The kind of a GraphQL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl From<OperationType> for OperationKind {
    fn from(value: OperationType) -> Self {
        match value {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => OperationKind::Subscription,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}
