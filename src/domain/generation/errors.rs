//! Generation Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("创意系数必须在 1-10 之间: {0}")]
    InvalidCreativity(u8),

    #[error("生成数量必须大于 0")]
    InvalidSampleCount,

    #[error("无效的时长: {0}")]
    InvalidDuration(f64),

    #[error("模型版本不能为空")]
    EmptyModelVersion,

    #[error("提示词不能为空")]
    EmptyPrompt,

    #[error("无效的素材 ID: {0:?}")]
    InvalidAssetId(String),

    #[error("无效的内容类型: {0}")]
    InvalidContentType(String),
}
