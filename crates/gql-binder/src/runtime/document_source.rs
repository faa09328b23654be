use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::clients::DOCUMENT_EXTENSIONS;
use crate::errors::OperationError;
use crate::operations::RawDocument;

/// Discovers operation documents on the local filesystem.
///
/// Directories are walked recursively; only files with a recognized document
/// extension are collected. The result order is deterministic (sorted by
/// path) regardless of directory traversal order.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    paths: Vec<PathBuf>,
}

impl DocumentSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn load(&self) -> Result<Vec<RawDocument>, OperationError> {
        let mut files = Vec::new();
        for path in &self.paths {
            visit(path, &mut files)?;
        }
        files.sort();
        files.dedup();

        files
            .into_iter()
            .map(|path| {
                debug!("Loading document {}", path.display());
                let source_text = std::fs::read_to_string(&path)?;
                Ok(RawDocument::new(path.display().to_string(), source_text))
            })
            .collect()
    }
}

impl From<Vec<PathBuf>> for DocumentSource {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::new(paths)
    }
}

fn visit(path: &Path, files: &mut Vec<PathBuf>) -> Result<(), OperationError> {
    if path.is_dir() {
        for entry in std::fs::read_dir(path)? {
            visit(&entry?.path(), files)?;
        }
    } else if has_document_extension(path) {
        files.push(path.to_path_buf());
    } else {
        warn!(
            "Skipping {}: not a recognized document extension",
            path.display()
        );
    }
    Ok(())
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| DOCUMENT_EXTENSIONS.contains(&extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_collects_documents_in_sorted_order() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("queries/spacex")?;
            jail.create_file("queries/z_last.gql", "query Z { z }")?;
            jail.create_file("queries/spacex/demo.gql", "query D { d }")?;
            jail.create_file("queries/a_first.graphql", "query A { a }")?;
            jail.create_file("queries/readme.txt", "not a document")?;

            let documents = DocumentSource::new(vec![PathBuf::from("queries")])
                .load()
                .unwrap();

            let paths: Vec<_> = documents
                .iter()
                .map(|document| document.source_path().to_string())
                .collect();
            assert_eq!(
                paths,
                vec![
                    "queries/a_first.graphql",
                    "queries/spacex/demo.gql",
                    "queries/z_last.gql",
                ]
            );
            Ok(())
        });
    }

    #[test]
    fn it_deduplicates_overlapping_paths() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("queries")?;
            jail.create_file("queries/user.gql", "query U { u }")?;

            let documents = DocumentSource::new(vec![
                PathBuf::from("queries"),
                PathBuf::from("queries/user.gql"),
            ])
            .load()
            .unwrap();

            assert_eq!(documents.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn it_fails_on_a_missing_path() {
        let result = DocumentSource::new(vec![PathBuf::from("does/not/exist.gql")]).load();
        assert!(matches!(result, Err(OperationError::File(_))));
    }
}
