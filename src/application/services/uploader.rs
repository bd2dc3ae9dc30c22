//! Asset Uploader - 本地媒体文件上传
//!
//! 两步协议：先创建上传目标拿到素材 ID，再把文件字节直接 PUT 到上传地址

use std::path::Path;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ApiError, SfxApiPort};
use crate::domain::generation::{MediaContentType, UploadedAsset};

pub struct AssetUploader {
    api: Arc<dyn SfxApiPort>,
}

impl AssetUploader {
    pub fn new(api: Arc<dyn SfxApiPort>) -> Self {
        Self { api }
    }

    /// 检查输入文件存在，必须在任何网络调用之前执行
    pub async fn ensure_input(path: &Path) -> Result<(), ApplicationError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            _ => Err(ApplicationError::InputNotFound(path.to_path_buf())),
        }
    }

    /// 上传文件，返回服务端素材句柄
    ///
    /// 任一步骤被拒绝都是致命错误
    pub async fn upload(
        &self,
        path: &Path,
        content_type: &MediaContentType,
    ) -> Result<UploadedAsset, ApplicationError> {
        Self::ensure_input(path).await?;

        tracing::info!(content_type = %content_type, "Creating upload target");
        let asset = self
            .api
            .create_upload_target(content_type)
            .await
            .map_err(|e| rejected("create asset", e))?;
        tracing::info!(asset_id = %asset.asset_id, "Upload target created");

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|_| ApplicationError::InputNotFound(path.to_path_buf()))?;

        tracing::info!(
            path = %path.display(),
            size = bytes.len(),
            "Uploading media"
        );
        self.api
            .upload_bytes(&asset.upload_url, bytes, content_type)
            .await
            .map_err(|e| rejected("upload media", e))?;
        tracing::info!(asset_id = %asset.asset_id, "Media uploaded");

        Ok(asset)
    }
}

fn rejected(stage: &'static str, err: ApiError) -> ApplicationError {
    match err {
        ApiError::Rejected { status, body } => ApplicationError::UploadRejected {
            stage,
            status,
            body,
        },
        other => other.into(),
    }
}
