//! 应用层错误定义
//!
//! 统一的流程错误类型。生成请求被拒绝不在此列：
//! 处理器记录日志后返回空结果，不作为错误向上抛出

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ports::{ApiError, MediaToolError, StorageError};
use crate::domain::generation::GenerationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 未配置 API key
    #[error("API key is not configured (set FOLEY_API__KEY or MIRELO_API_KEY)")]
    MissingApiKey,

    /// 输入文件不存在
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 参数校验错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 创建上传目标或上传字节被服务端拒绝
    #[error("Failed to {stage}: HTTP {status}: {body}")]
    UploadRejected {
        stage: &'static str,
        status: u16,
        body: String,
    },

    /// 外部服务错误（连接、超时、响应格式）
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 媒体工具不可用
    #[error("Media tool unavailable: {0}")]
    MediaToolUnavailable(String),

    /// 媒体工具执行失败，保留原始诊断输出
    #[error("Media tool error: {0}")]
    MediaToolError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<ApiError> for ApplicationError {
    fn from(err: ApiError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<MediaToolError> for ApplicationError {
    fn from(err: MediaToolError) -> Self {
        match err {
            MediaToolError::NotAvailable(msg) => Self::MediaToolUnavailable(msg),
            other => Self::MediaToolError(other.to_string()),
        }
    }
}
