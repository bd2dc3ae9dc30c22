//! File Storage - 文件系统产物存储实现
//!
//! 实现 ArtifactStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ArtifactStoragePort, StorageError};

/// 文件系统产物存储，一个流程一个输出目录
pub struct FileArtifactStorage {
    /// 输出目录
    base_dir: PathBuf,
}

impl FileArtifactStorage {
    /// 创建存储，不立即创建目录
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ArtifactStoragePort for FileArtifactStorage {
    fn output_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn prepare(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| StorageError::io(&self.base_dir, e))
    }

    async fn save(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.path_for(name);

        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        tracing::debug!("Saved artifact: path={}, size={} bytes", path.display(), data.len());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_prepare_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let storage = FileArtifactStorage::new(dir.path().join("output").join("example1"));

        assert!(!storage.output_dir().exists());
        storage.prepare().await.unwrap();
        assert!(storage.output_dir().is_dir());

        // 重复调用不报错
        storage.prepare().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_and_write_text() {
        let dir = tempdir().unwrap();
        let storage = FileArtifactStorage::new(dir.path());
        storage.prepare().await.unwrap();

        let path = storage.save("sfx_variation_1.wav", b"RIFF").await.unwrap();
        assert_eq!(path, dir.path().join("sfx_variation_1.wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF");

        let path = storage
            .write_text("concat_list.txt", "file '/a.wav'\n")
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "file '/a.wav'\n");
    }

    #[tokio::test]
    async fn test_save_without_prepare_fails() {
        let dir = tempdir().unwrap();
        let storage = FileArtifactStorage::new(dir.path().join("missing"));

        let err = storage.save("a.wav", b"x").await.unwrap_err();
        match err {
            StorageError::IoError { path, .. } => assert!(path.ends_with("missing/a.wav")),
        }
    }
}
