//! Media Tool Port - 外部媒体工具抽象
//!
//! 只暴露长视频流程需要的两个操作（拼接、合流）以及可用性检查和时长探测，
//! 编排逻辑可以用假实现测试，不启动真实进程

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 媒体工具错误
#[derive(Debug, Error)]
pub enum MediaToolError {
    #[error("Media tool not available: {0}")]
    NotAvailable(String),

    #[error("Failed to spawn media tool: {0}")]
    SpawnError(String),

    #[error("{operation} failed (exit code {code:?}):\n{stderr}")]
    Failed {
        operation: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: &'static str, secs: u64 },

    #[error("Invalid output: {0}")]
    InvalidOutput(String),
}

#[async_trait]
pub trait MediaToolPort: Send + Sync {
    /// 检查媒体工具是否可执行
    async fn check_available(&self) -> Result<(), MediaToolError>;

    /// 按清单顺序拼接音频，流拷贝不重新编码
    async fn concat_audio_list(&self, manifest: &Path, output: &Path) -> Result<(), MediaToolError>;

    /// 取 `video` 的画面流与 `audio` 的音频流合成，
    /// 画面拷贝、音频重新编码，输出时长取较短的一路
    async fn remux_video_audio(
        &self,
        video: &Path,
        audio: &Path,
        output: &Path,
    ) -> Result<(), MediaToolError>;

    /// 探测媒体时长（秒）
    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaToolError>;
}
