//! Operations
//!
//! This module parses GraphQL documents into the catalog of named operations
//! that client bindings are generated from.

mod catalog;
mod operation;
mod raw_document;

pub use catalog::Catalog;
pub use operation::{Operation, OperationKind};
pub use raw_document::RawDocument;
