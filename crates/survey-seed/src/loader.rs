//! Fixture file loading.

use std::path::Path;

use thiserror::Error;

use crate::payload::SeedPayload;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Seed file not found: {path}")]
    SourceMissing { path: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Seed file is not a valid payload collection: {0}")]
    SourceMalformed(#[from] serde_json::Error),
}

/// Loads survey submission payloads from a JSON fixture.
pub struct SeedFileLoader;

impl SeedFileLoader {
    /// Loads the whole payload collection from a fixture file.
    ///
    /// Loading is all-or-nothing: a single malformed record fails the whole
    /// collection, and nothing is returned.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<SeedPayload>, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::SourceMissing {
                path: path.display().to_string(),
            });
        }
        let data = std::fs::read(path)?;
        Self::load_bytes(&data)
    }

    /// Parses a payload collection from JSON already in memory.
    pub fn load_bytes(data: &[u8]) -> Result<Vec<SeedPayload>, LoadError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_the_path() {
        let err = SeedFileLoader::load_file("/nonexistent/seed.json").unwrap_err();
        match err {
            LoadError::SourceMissing { path } => assert_eq!(path, "/nonexistent/seed.json"),
            other => panic!("expected SourceMissing, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SeedFileLoader::load_bytes(b"{not json").unwrap_err();
        assert!(matches!(err, LoadError::SourceMalformed(_)));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        // Valid JSON, but records missing the required sub-objects.
        let err = SeedFileLoader::load_bytes(br#"[{"user": {"email": "a@x.com"}}]"#).unwrap_err();
        assert!(matches!(err, LoadError::SourceMalformed(_)));
    }

    #[test]
    fn empty_collection_parses() {
        let payloads = SeedFileLoader::load_bytes(b"[]").unwrap();
        assert!(payloads.is_empty());
    }
}
