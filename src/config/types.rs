//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ApplicationError;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 生成服务配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 媒体工具配置
    #[serde(default)]
    pub media: MediaConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,

    /// 文本生成音效参数
    #[serde(default)]
    pub text: TextWorkflowConfig,

    /// 短视频生成音效参数
    #[serde(default)]
    pub short: ShortWorkflowConfig,

    /// 长视频分场景生成音效参数
    #[serde(default)]
    pub long: LongWorkflowConfig,
}

/// 生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 服务基础 URL
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// API key，未设置时回退到 `MIRELO_API_KEY`
    #[serde(default)]
    pub key: Option<String>,

    /// 请求超时时间（秒），生成在服务端同步完成
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.mirelo.ai".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// 取出非空的 API key
    pub fn api_key(&self) -> Result<&str, ApplicationError> {
        self.key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ApplicationError::MissingApiKey)
    }
}

/// 媒体工具配置
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: PathBuf,

    /// 单次进程超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_model_version() -> String {
    "1.5".to_string()
}

fn default_one() -> u32 {
    1
}

/// 文本生成音效参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextWorkflowConfig {
    pub prompt: String,
    pub duration_secs: f64,
    pub num_samples: u32,
    pub model_version: String,
    pub creativity: u8,
    pub audio_only: bool,
    pub output_dir: PathBuf,
}

impl Default for TextWorkflowConfig {
    fn default() -> Self {
        Self {
            prompt: "thunder and lightning storm with heavy rain".to_string(),
            duration_secs: 5.0,
            num_samples: 2,
            model_version: default_model_version(),
            creativity: 7,
            audio_only: true,
            output_dir: PathBuf::from("output/example1"),
        }
    }
}

/// 短视频生成音效参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShortWorkflowConfig {
    pub input: PathBuf,
    /// 未设置时按扩展名推断
    pub content_type: Option<String>,
    pub prompt: Option<String>,
    pub duration_secs: f64,
    pub num_samples: u32,
    pub model_version: String,
    pub creativity: u8,
    pub audio_only: bool,
    pub steps: Option<u32>,
    pub output_dir: PathBuf,
}

impl Default for ShortWorkflowConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input_video_short.mp4"),
            content_type: None,
            prompt: Some("cinematic sound effects".to_string()),
            duration_secs: 10.0,
            num_samples: default_one(),
            model_version: default_model_version(),
            creativity: 5,
            audio_only: false,
            steps: Some(25),
            output_dir: PathBuf::from("output/example2"),
        }
    }
}

/// 长视频分场景生成音效参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LongWorkflowConfig {
    pub input: PathBuf,
    pub content_type: Option<String>,
    /// 每个场景的候选数
    pub num_samples: u32,
    pub output_dir: PathBuf,
}

impl Default for LongWorkflowConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input_video_long.mp4"),
            content_type: None,
            num_samples: default_one(),
            output_dir: PathBuf::from("output/example3"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.mirelo.ai");
        assert_eq!(config.api.timeout_secs, 600);
        assert_eq!(config.text.num_samples, 2);
        assert_eq!(config.text.creativity, 7);
        assert_eq!(config.short.steps, Some(25));
        assert_eq!(config.long.output_dir, PathBuf::from("output/example3"));
    }

    #[test]
    fn test_api_key_required() {
        let mut config = ApiConfig::default();
        assert!(matches!(config.api_key(), Err(ApplicationError::MissingApiKey)));

        config.key = Some("   ".to_string());
        assert!(matches!(config.api_key(), Err(ApplicationError::MissingApiKey)));

        config.key = Some("sk-123".to_string());
        assert_eq!(config.api_key().unwrap(), "sk-123");
    }
}
