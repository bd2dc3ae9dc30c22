//! Generation Context - Value Objects

use std::path::Path;

use super::GenerationError;

/// 创意系数（1-10）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreativityCoefficient(u8);

impl CreativityCoefficient {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, GenerationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GenerationError::InvalidCreativity(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for CreativityCoefficient {
    fn default() -> Self {
        Self(5)
    }
}

impl std::fmt::Display for CreativityCoefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// 模型版本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelVersion(String);

impl ModelVersion {
    pub const LATEST: &'static str = "1.5";

    pub fn new(version: impl Into<String>) -> Result<Self, GenerationError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(GenerationError::EmptyModelVersion);
        }
        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelVersion {
    fn default() -> Self {
        Self(Self::LATEST.to_string())
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 服务端素材句柄（customer asset）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Result<Self, GenerationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(GenerationError::InvalidAssetId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 上传媒体的 MIME 类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaContentType(String);

impl MediaContentType {
    pub const MP4: &'static str = "video/mp4";

    pub fn new(mime: impl Into<String>) -> Result<Self, GenerationError> {
        let mime = mime.into();
        match mime.split_once('/') {
            Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() && !sub.contains('/') => {
                Ok(Self(mime))
            }
            _ => Err(GenerationError::InvalidContentType(mime)),
        }
    }

    /// 根据文件扩展名推断，未知扩展名回退到 video/mp4
    pub fn from_path(path: &Path) -> Self {
        let mime = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("mov") => "video/quicktime",
            Some("webm") => "video/webm",
            Some("mkv") => "video/x-matroska",
            _ => Self::MP4,
        };
        Self(mime.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MediaContentType {
    fn default() -> Self {
        Self(Self::MP4.to_string())
    }
}

impl std::fmt::Display for MediaContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
