//! HTTP SFX Client - 调用远程音效生成 HTTP 服务
//!
//! 实现 SfxApiPort trait
//!
//! 外部 API:
//! POST {base}/create-customer-asset  {"contentType"}
//!      -> 200 {"customer_asset_id", "upload_url"}
//! PUT  {upload_url}                   raw bytes -> 200 / 204
//! POST {base}/video-to-sfx            GenerationBody -> 201 {"output_paths": [...]}
//! POST {base}/long-video-to-sfx       {"customer_asset_id", "num_samples"}
//!      -> 200 {"video_segments": [...]}

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

use crate::application::ports::{
    ApiError, Endpoint, GenerationOutcome, SceneOutcome, SfxApiPort,
};
use crate::domain::generation::{
    AssetId, GenerationRequest, LongMediaRequest, MediaContentType, UploadedAsset,
};
use crate::domain::scene::SceneSegment;

/// API key 请求头
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize)]
struct CreateAssetBody<'a> {
    #[serde(rename = "contentType")]
    content_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateAssetReply {
    customer_asset_id: String,
    upload_url: String,
}

/// 单次生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_asset_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_prompt: Option<&'a str>,
    #[serde(serialize_with = "serialize_seconds")]
    duration: f64,
    num_samples: u32,
    model_version: &'a str,
    creativity_coef: u8,
    return_audio_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<u32>,
}

impl<'a> From<&'a GenerationRequest> for GenerationBody<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            customer_asset_id: request.source_asset().map(AssetId::as_str),
            text_prompt: request.prompt(),
            duration: request.duration_seconds(),
            num_samples: request.sample_count(),
            model_version: request.model_version().as_str(),
            creativity_coef: request.creativity().value(),
            return_audio_only: request.audio_only(),
            steps: request.quality_steps(),
        }
    }
}

/// 整数秒按整数发送
fn serialize_seconds<S: Serializer>(seconds: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if seconds.fract() == 0.0 && *seconds >= 0.0 && *seconds <= u32::MAX as f64 {
        serializer.serialize_u64(*seconds as u64)
    } else {
        serializer.serialize_f64(*seconds)
    }
}

/// 长视频请求体，只有素材引用和样本数
#[derive(Debug, Serialize)]
struct LongMediaBody<'a> {
    customer_asset_id: &'a str,
    num_samples: u32,
}

#[derive(Debug, Deserialize)]
struct GenerationReply {
    #[serde(default)]
    output_paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LongMediaReply {
    #[serde(default)]
    video_segments: Vec<SegmentReply>,
}

#[derive(Debug, Deserialize)]
struct SegmentReply {
    start: f64,
    duration: f64,
    #[serde(default)]
    audio_urls: Vec<String>,
}

impl From<SegmentReply> for SceneSegment {
    fn from(reply: SegmentReply) -> Self {
        SceneSegment::new(reply.start, reply.duration, reply.audio_urls)
    }
}

/// HTTP SFX 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSfxClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// 请求超时时间（秒），生成是同步完成的，需要足够长
    pub timeout_secs: u64,
}

impl HttpSfxClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 600,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP SFX 客户端
pub struct HttpSfxClient {
    client: Client,
    config: HttpSfxClientConfig,
}

impl HttpSfxClient {
    /// 创建新的 HTTP SFX 客户端
    pub fn new(config: HttpSfxClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path().unwrap_or_default()
        )
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "Sending SFX API request");

        self.client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)
    }
}

fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::NetworkError(format!("Cannot connect to SFX service: {}", e))
    } else {
        ApiError::NetworkError(e.to_string())
    }
}

async fn read_body(response: Response) -> String {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(status, error = %e, "Failed to read rejection body");
            String::new()
        }
    }
}

#[async_trait]
impl SfxApiPort for HttpSfxClient {
    async fn create_upload_target(
        &self,
        content_type: &MediaContentType,
    ) -> Result<UploadedAsset, ApiError> {
        let body = CreateAssetBody {
            content_type: content_type.as_str(),
        };
        let response = self.post_json(Endpoint::CreateAsset, &body).await?;

        let status = response.status().as_u16();
        if !Endpoint::CreateAsset.accepts(status) {
            return Err(ApiError::Rejected {
                status,
                body: read_body(response).await,
            });
        }

        let reply: CreateAssetReply = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("create asset: {}", e)))?;
        let asset_id = AssetId::new(reply.customer_asset_id)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        Ok(UploadedAsset {
            asset_id,
            upload_url: reply.upload_url,
        })
    }

    async fn upload_bytes(
        &self,
        upload_url: &str,
        bytes: Vec<u8>,
        content_type: &MediaContentType,
    ) -> Result<(), ApiError> {
        // 上传地址是预签名 URL，不带 API key
        let response = self
            .client
            .put(upload_url)
            .header(reqwest::header::CONTENT_TYPE, content_type.as_str())
            .body(bytes)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status().as_u16();
        if !Endpoint::UploadBytes.accepts(status) {
            return Err(ApiError::Rejected {
                status,
                body: read_body(response).await,
            });
        }
        Ok(())
    }

    async fn request_generation(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, ApiError> {
        let body = GenerationBody::from(request);
        let response = self.post_json(Endpoint::Generation, &body).await?;

        let status = response.status().as_u16();
        if !Endpoint::Generation.accepts(status) {
            return Ok(GenerationOutcome::Rejected {
                status,
                body: read_body(response).await,
            });
        }

        let reply: GenerationReply = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("video-to-sfx: {}", e)))?;

        tracing::info!(outputs = reply.output_paths.len(), "Generation completed");
        Ok(GenerationOutcome::Created {
            output_paths: reply.output_paths,
        })
    }

    async fn request_long_media(
        &self,
        request: &LongMediaRequest,
    ) -> Result<SceneOutcome, ApiError> {
        let body = LongMediaBody {
            customer_asset_id: request.asset_id().as_str(),
            num_samples: request.sample_count(),
        };
        let response = self.post_json(Endpoint::LongMedia, &body).await?;

        let status = response.status().as_u16();
        if !Endpoint::LongMedia.accepts(status) {
            return Ok(SceneOutcome::Rejected {
                status,
                body: read_body(response).await,
            });
        }

        let reply: LongMediaReply = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("long-video-to-sfx: {}", e)))?;

        tracing::info!(scenes = reply.video_segments.len(), "Scene generation completed");
        Ok(SceneOutcome::Ready {
            segments: reply.video_segments.into_iter().map(SceneSegment::from).collect(),
        })
    }
}
