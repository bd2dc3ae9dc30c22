//! Artifact Storage Port - 出站端口
//!
//! 每个流程一个输出目录，文件只写一次

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {message}")]
    IoError { path: PathBuf, message: String },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
pub trait ArtifactStoragePort: Send + Sync {
    /// 输出目录
    fn output_dir(&self) -> &Path;

    /// 输出目录下的文件路径
    fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir().join(name)
    }

    /// 创建输出目录（含父目录）
    async fn prepare(&self) -> Result<(), StorageError>;

    /// 写入二进制产物
    async fn save(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError>;

    /// 写入文本文件（如拼接清单）
    async fn write_text(&self, name: &str, text: &str) -> Result<PathBuf, StorageError> {
        self.save(name, text.as_bytes()).await
    }
}
