use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path: PathBuf = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(parts.join("/"));
        }
    }
    Ok(())
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

    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let root = Path::new(&self.base_path).join(dir);
        let mut files = Vec::new();
        if root.is_dir() {
            collect_files(&root, &root, &mut files)?;
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_list_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("artifacts/contracts/Project.sol/Project.json", b"{}")
            .await
            .unwrap();
        storage
            .write_file("artifacts/build-info/abc.json", b"{}")
            .await
            .unwrap();

        let files = storage.list_files("artifacts").await.unwrap();
        assert_eq!(
            files,
            vec![
                "build-info/abc.json".to_string(),
                "contracts/Project.sol/Project.json".to_string(),
            ]
        );
        assert_eq!(
            storage
                .read_file("artifacts/build-info/abc.json")
                .await
                .unwrap(),
            b"{}".to_vec()
        );
    }

    #[tokio::test]
    async fn test_missing_directory_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        assert!(storage.list_files("artifacts").await.unwrap().is_empty());
    }
}
