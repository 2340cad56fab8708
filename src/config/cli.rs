use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Filesystem-backed storage. Relative paths resolve under `base_path`;
/// absolute paths are used as-is. Parent directories of the output file are
/// created on demand.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_with_relative_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("proposal.md", b"# Draft").await.unwrap();
        let data = storage.read_file("proposal.md").await.unwrap();

        assert_eq!(data, b"# Draft");
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("proposals/2024/draft.md", b"content")
            .await
            .unwrap();

        assert!(temp_dir.path().join("proposals/2024/draft.md").exists());
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(".".to_string());
        let absolute = temp_dir.path().join("out.md");

        storage
            .write_file(absolute.to_str().unwrap(), b"abs")
            .await
            .unwrap();

        assert!(absolute.exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let storage = LocalStorage::new("/nonexistent-base".to_string());
        assert!(storage.read_file("missing.md").await.is_err());
    }
}
