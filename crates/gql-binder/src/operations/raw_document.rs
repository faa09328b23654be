/// An unparsed GraphQL document paired with its project-relative source path.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub(crate) source_path: String,
    pub(crate) source_text: String,
}

impl RawDocument {
    pub fn new(source_path: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            source_text: source_text.into(),
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

impl From<(String, String)> for RawDocument {
    fn from((source_path, source_text): (String, String)) -> Self {
        Self {
            source_path,
            source_text,
        }
    }
}
