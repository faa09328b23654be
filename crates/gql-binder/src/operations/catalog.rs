use apollo_compiler::ast::Definition;
use apollo_compiler::parser::Parser;
use tracing::warn;

use crate::errors::OperationError;

use super::{Operation, OperationKind, RawDocument};

/// The set of named operations extracted from a project's documents.
///
/// Anonymous operations never enter the catalog; they are skipped with a
/// diagnostic and counted so callers can report them.
#[derive(Debug, Default)]
pub struct Catalog {
    operations: Vec<Operation>,
    skipped_anonymous: usize,
}

impl Catalog {
    /// Parse all documents into named operations.
    ///
    /// A document that fails to parse aborts the whole collection; there are
    /// no partial catalogs.
    pub fn collect(
        documents: impl IntoIterator<Item = RawDocument>,
    ) -> Result<Self, OperationError> {
        let mut catalog = Self::default();
        for document in documents {
            catalog.collect_one(&document)?;
        }
        Ok(catalog)
    }

    fn collect_one(&mut self, document: &RawDocument) -> Result<(), OperationError> {
        let ast = Parser::new()
            .parse_ast(document.source_text.as_str(), document.source_path.as_str())
            .map_err(|e| OperationError::GraphQLDocument(Box::new(e)))?;

        for definition in ast.definitions {
            match definition {
                Definition::OperationDefinition(operation) => {
                    let kind = OperationKind::from(operation.operation_type);
                    match operation.name.as_ref() {
                        Some(name) => self.operations.push(Operation {
                            name: name.to_string(),
                            kind,
                            source_path: document.source_path.clone(),
                            source_text: document.source_text.clone(),
                        }),
                        None => {
                            warn!(
                                "Skipping anonymous {kind} operation in {}",
                                document.source_path
                            );
                            self.skipped_anonymous += 1;
                        }
                    }
                }
                Definition::FragmentDefinition(_) => {}
                _ => {
                    warn!(
                        "Ignoring type system definition in {}: only operations and fragments are expected",
                        document.source_path
                    );
                }
            }
        }
        Ok(())
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// The number of anonymous operations dropped during collection
    pub fn skipped_anonymous(&self) -> usize {
        self.skipped_anonymous
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
