//! Generation Context - 生成请求
//!
//! 请求在发送前通过 builder 校验，发送后不可变

use super::{AssetId, CreativityCoefficient, GenerationError, ModelVersion};

/// 单次生成请求（文本 / 短视频）
///
/// 不变量:
/// - duration > 0
/// - sample_count >= 1
/// - 创意系数在 1-10 之间
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    prompt: Option<String>,
    duration_seconds: f64,
    sample_count: u32,
    model_version: ModelVersion,
    creativity: CreativityCoefficient,
    audio_only: bool,
    source_asset: Option<AssetId>,
    quality_steps: Option<u32>,
}

impl GenerationRequest {
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// 绑定已上传的素材
    pub fn with_source_asset(mut self, asset_id: AssetId) -> Self {
        self.source_asset = Some(asset_id);
        self
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn model_version(&self) -> &ModelVersion {
        &self.model_version
    }

    pub fn creativity(&self) -> CreativityCoefficient {
        self.creativity
    }

    pub fn audio_only(&self) -> bool {
        self.audio_only
    }

    pub fn source_asset(&self) -> Option<&AssetId> {
        self.source_asset.as_ref()
    }

    pub fn quality_steps(&self) -> Option<u32> {
        self.quality_steps
    }
}

/// GenerationRequest 构建器
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    prompt: Option<String>,
    duration_seconds: f64,
    sample_count: u32,
    model_version: Option<String>,
    creativity: u8,
    audio_only: bool,
    source_asset: Option<AssetId>,
    quality_steps: Option<u32>,
}

impl Default for GenerationRequestBuilder {
    fn default() -> Self {
        Self {
            prompt: None,
            duration_seconds: 5.0,
            sample_count: 1,
            model_version: None,
            creativity: CreativityCoefficient::default().value(),
            audio_only: false,
            source_asset: None,
            quality_steps: None,
        }
    }
}

impl GenerationRequestBuilder {
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn maybe_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn duration_seconds(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    pub fn sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    pub fn model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    pub fn creativity(mut self, value: u8) -> Self {
        self.creativity = value;
        self
    }

    pub fn audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn source_asset(mut self, asset_id: AssetId) -> Self {
        self.source_asset = Some(asset_id);
        self
    }

    pub fn quality_steps(mut self, steps: Option<u32>) -> Self {
        self.quality_steps = steps;
        self
    }

    pub fn build(self) -> Result<GenerationRequest, GenerationError> {
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(GenerationError::InvalidDuration(self.duration_seconds));
        }
        if self.sample_count == 0 {
            return Err(GenerationError::InvalidSampleCount);
        }
        if matches!(self.prompt.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err(GenerationError::EmptyPrompt);
        }

        let model_version = match self.model_version {
            Some(version) => ModelVersion::new(version)?,
            None => ModelVersion::default(),
        };

        Ok(GenerationRequest {
            prompt: self.prompt,
            duration_seconds: self.duration_seconds,
            sample_count: self.sample_count,
            model_version,
            creativity: CreativityCoefficient::new(self.creativity)?,
            audio_only: self.audio_only,
            source_asset: self.source_asset,
            quality_steps: self.quality_steps,
        })
    }
}

/// 长视频分场景生成请求
///
/// 只携带素材引用和每个场景的样本数，时长和提示词由服务端按场景决定
#[derive(Debug, Clone, PartialEq)]
pub struct LongMediaRequest {
    asset_id: AssetId,
    sample_count: u32,
}

impl LongMediaRequest {
    pub fn new(asset_id: AssetId, sample_count: u32) -> Result<Self, GenerationError> {
        if sample_count == 0 {
            return Err(GenerationError::InvalidSampleCount);
        }
        Ok(Self {
            asset_id,
            sample_count,
        })
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }
}

/// 已创建的上传目标
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAsset {
    pub asset_id: AssetId,
    pub upload_url: String,
}
