use crate::error::{PkgsyncError, Result};
use crate::manifest::Manifest;
use std::path::{Path, PathBuf};

/// Reads and writes the manifest file.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load(&self) -> Result<Manifest> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PkgsyncError::Manifest(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Manifest> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| PkgsyncError::Manifest(format!("Failed to parse JSON: {}", e)))?;

        Manifest::from_value(value).ok_or_else(|| {
            PkgsyncError::Manifest("Top-level value is not a JSON object".to_string())
        })
    }

    /// Overwrite the manifest with two-space indented JSON.
    pub async fn persist(&self, manifest: &Manifest) -> Result<()> {
        let content = serde_json::to_string_pretty(manifest.as_map())?;

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            PkgsyncError::Manifest(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DependencyGroup;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_and_persist_keep_key_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name":"demo","scripts":{"z":"1","a":"2"},"dependencies":{"b":"^1.0.0","a":"2.0.0"}}"#,
        )
        .unwrap();

        let store = ManifestStore::new(&path);
        let manifest = store.load().await.unwrap();
        assert_eq!(
            manifest.package_names(DependencyGroup::Normal),
            vec!["b".to_string(), "a".to_string()]
        );

        store.persist(&manifest).await.unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let name = written.find("\"name\"").unwrap();
        let scripts = written.find("\"scripts\"").unwrap();
        let deps = written.find("\"dependencies\"").unwrap();
        assert!(name < scripts && scripts < deps);
        assert!(written.find("\"z\"").unwrap() < written.find("\"a\": \"2\"").unwrap());
        assert!(written.starts_with("{\n  \"name\""));
    }

    #[tokio::test]
    async fn load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let store = ManifestStore::new(dir.path().join("package.json"));
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, PkgsyncError::Manifest(_)));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            ManifestStore::parse("{ not json"),
            Err(PkgsyncError::Manifest(_))
        ));
        assert!(matches!(
            ManifestStore::parse("\"string\""),
            Err(PkgsyncError::Manifest(_))
        ));
    }
}
