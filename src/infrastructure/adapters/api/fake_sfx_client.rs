//! Fake SFX Client - 用于测试的音效生成客户端
//!
//! 不发起网络请求，按配置返回固定结果并记录每次调用

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::application::ports::{
    ApiError, Endpoint, GenerationOutcome, SceneOutcome, SfxApiPort,
};
use crate::domain::generation::{
    AssetId, GenerationRequest, LongMediaRequest, MediaContentType, UploadedAsset,
};
use crate::domain::scene::SceneSegment;

/// 记录下来的调用
#[derive(Debug, Clone, PartialEq)]
pub enum FakeSfxCall {
    CreateUploadTarget { content_type: String },
    UploadBytes { upload_url: String, size: usize },
    Generation(GenerationRequest),
    LongMedia(LongMediaRequest),
}

/// Fake SFX Client
///
/// 各端点默认返回各自的成功状态码，可单独改成其他状态模拟服务拒绝
pub struct FakeSfxClient {
    create_status: u16,
    upload_status: u16,
    generation_status: u16,
    long_media_status: u16,
    output_paths: Vec<String>,
    segments: Vec<SceneSegment>,
    calls: Mutex<Vec<FakeSfxCall>>,
}

impl Default for FakeSfxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSfxClient {
    pub fn new() -> Self {
        Self {
            create_status: 200,
            upload_status: 204,
            generation_status: 201,
            long_media_status: 200,
            output_paths: Vec::new(),
            segments: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 生成请求返回的结果 URL
    pub fn with_output_paths(mut self, output_paths: Vec<String>) -> Self {
        self.output_paths = output_paths;
        self
    }

    /// 长视频请求返回的场景
    pub fn with_segments(mut self, segments: Vec<SceneSegment>) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_create_status(mut self, status: u16) -> Self {
        self.create_status = status;
        self
    }

    pub fn with_upload_status(mut self, status: u16) -> Self {
        self.upload_status = status;
        self
    }

    pub fn with_generation_status(mut self, status: u16) -> Self {
        self.generation_status = status;
        self
    }

    pub fn with_long_media_status(mut self, status: u16) -> Self {
        self.long_media_status = status;
        self
    }

    /// 按顺序返回全部调用
    pub fn calls(&self) -> Vec<FakeSfxCall> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<FakeSfxCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: FakeSfxCall) {
        self.lock_calls().push(call);
    }
}

fn rejection(status: u16) -> String {
    format!("{{\"detail\":\"fake rejection with status {}\"}}", status)
}

#[async_trait]
impl SfxApiPort for FakeSfxClient {
    async fn create_upload_target(
        &self,
        content_type: &MediaContentType,
    ) -> Result<UploadedAsset, ApiError> {
        self.record(FakeSfxCall::CreateUploadTarget {
            content_type: content_type.as_str().to_string(),
        });

        if !Endpoint::CreateAsset.accepts(self.create_status) {
            return Err(ApiError::Rejected {
                status: self.create_status,
                body: rejection(self.create_status),
            });
        }

        let asset_id = AssetId::new(format!("fake-{}", uuid::Uuid::new_v4()))
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let upload_url = format!("https://uploads.fake/{}", asset_id);
        tracing::debug!(asset_id = %asset_id, "FakeSfxClient: created upload target");

        Ok(UploadedAsset {
            asset_id,
            upload_url,
        })
    }

    async fn upload_bytes(
        &self,
        upload_url: &str,
        bytes: Vec<u8>,
        _content_type: &MediaContentType,
    ) -> Result<(), ApiError> {
        self.record(FakeSfxCall::UploadBytes {
            upload_url: upload_url.to_string(),
            size: bytes.len(),
        });

        if !Endpoint::UploadBytes.accepts(self.upload_status) {
            return Err(ApiError::Rejected {
                status: self.upload_status,
                body: rejection(self.upload_status),
            });
        }
        Ok(())
    }

    async fn request_generation(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, ApiError> {
        self.record(FakeSfxCall::Generation(request.clone()));

        if !Endpoint::Generation.accepts(self.generation_status) {
            return Ok(GenerationOutcome::Rejected {
                status: self.generation_status,
                body: rejection(self.generation_status),
            });
        }
        Ok(GenerationOutcome::Created {
            output_paths: self.output_paths.clone(),
        })
    }

    async fn request_long_media(
        &self,
        request: &LongMediaRequest,
    ) -> Result<SceneOutcome, ApiError> {
        self.record(FakeSfxCall::LongMedia(request.clone()));

        if !Endpoint::LongMedia.accepts(self.long_media_status) {
            return Ok(SceneOutcome::Rejected {
                status: self.long_media_status,
                body: rejection(self.long_media_status),
            });
        }
        Ok(SceneOutcome::Ready {
            segments: self.segments.clone(),
        })
    }
}
