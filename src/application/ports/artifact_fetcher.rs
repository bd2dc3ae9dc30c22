//! Artifact Fetcher Port - 结果文件下载抽象
//!
//! 结果 URL 是普通 GET，不需要 API key

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,
}

/// 单个 URL 的下载结果
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 200，完整响应体
    Fetched(Vec<u8>),
    /// 其他状态码
    Failed { status: u16 },
}

#[async_trait]
pub trait ArtifactFetcherPort: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError>;
}
