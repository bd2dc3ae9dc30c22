//! SFX API Port - 音效生成服务抽象
//!
//! 定义远程 SFX 生成服务的抽象接口，具体实现在 infrastructure/adapters 层
//!
//! 各端点的成功状态码不同，调用方必须按端点判断：
//! - create-customer-asset: 200
//! - 上传字节（PUT upload_url）: 200 或 204
//! - video-to-sfx: 201（创建新的生成任务）
//! - long-video-to-sfx: 200（返回派生结果）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::{
    GenerationRequest, LongMediaRequest, MediaContentType, UploadedAsset,
};
use crate::domain::scene::SceneSegment;

/// SFX API 错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// API 端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CreateAsset,
    UploadBytes,
    Generation,
    LongMedia,
}

impl Endpoint {
    /// 相对 base URL 的路径（上传使用服务端返回的完整 URL）
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Endpoint::CreateAsset => Some("/create-customer-asset"),
            Endpoint::UploadBytes => None,
            Endpoint::Generation => Some("/video-to-sfx"),
            Endpoint::LongMedia => Some("/long-video-to-sfx"),
        }
    }

    /// 该端点约定的成功状态码
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Endpoint::CreateAsset => status == 200,
            Endpoint::UploadBytes => matches!(status, 200 | 204),
            Endpoint::Generation => status == 201,
            Endpoint::LongMedia => status == 200,
        }
    }
}

/// 单次生成（文本 / 短视频）结果
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// 201 Created
    Created { output_paths: Vec<String> },
    /// 其他状态码，由调用方记录后放弃
    Rejected { status: u16, body: String },
}

/// 长视频分场景生成结果
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOutcome {
    /// 200 OK
    Ready { segments: Vec<SceneSegment> },
    /// 其他状态码，由调用方记录后放弃
    Rejected { status: u16, body: String },
}

/// SFX API Port
///
/// 除上传字节外，所有调用都携带 API key
#[async_trait]
pub trait SfxApiPort: Send + Sync {
    /// 声明待上传文件的内容类型，获得素材 ID 和上传地址
    ///
    /// 非 200 返回 `ApiError::Rejected`
    async fn create_upload_target(
        &self,
        content_type: &MediaContentType,
    ) -> Result<UploadedAsset, ApiError>;

    /// 把完整文件内容直接传到上传地址
    ///
    /// 非 200/204 返回 `ApiError::Rejected`
    async fn upload_bytes(
        &self,
        upload_url: &str,
        bytes: Vec<u8>,
        content_type: &MediaContentType,
    ) -> Result<(), ApiError>;

    /// 提交单次生成请求
    async fn request_generation(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, ApiError>;

    /// 提交长视频分场景生成请求
    async fn request_long_media(
        &self,
        request: &LongMediaRequest,
    ) -> Result<SceneOutcome, ApiError>;
}
