//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（foley.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["foley", "foley.local"];

/// 旧脚本使用的 API key 环境变量
pub const LEGACY_API_KEY_ENV: &str = "MIRELO_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `FOLEY_`，层级分隔符 `__`）
/// 2. 配置文件（foley.toml 或 foley.local.toml）
/// 3. 默认值
///
/// `api.key` 仍为空时读取 `MIRELO_API_KEY`
///
/// # 环境变量示例
/// - `FOLEY_API__KEY=sk-...`
/// - `FOLEY_API__BASE_URL=https://api.mirelo.ai`
/// - `FOLEY_MEDIA__FFMPEG_PATH=/usr/local/bin/ffmpeg`
/// - `FOLEY_TEXT__NUM_SAMPLES=4`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("api.base_url", "https://api.mirelo.ai")?
        .set_default("api.timeout_secs", 600)?
        .set_default("media.ffmpeg_path", "ffmpeg")?
        .set_default("media.ffprobe_path", "ffprobe")?
        .set_default("media.timeout_secs", 600)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: FOLEY_API__KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("FOLEY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_legacy_api_key(&mut app_config, std::env::var(LEGACY_API_KEY_ENV).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// `api.key` 未设置时使用旧变量
fn apply_legacy_api_key(config: &mut AppConfig, legacy: Option<String>) {
    if config.api.key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        if let Some(key) = legacy.filter(|k| !k.trim().is_empty()) {
            config.api.key = Some(key);
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

fn check_creativity(section: &str, value: u8) -> Result<(), ConfigError> {
    if !(1..=10).contains(&value) {
        return Err(invalid(format!(
            "{}.creativity must be between 1 and 10, got {}",
            section, value
        )));
    }
    Ok(())
}

fn check_samples(section: &str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(format!("{}.num_samples must be at least 1", section)));
    }
    Ok(())
}

fn check_duration(section: &str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(format!(
            "{}.duration_secs must be positive, got {}",
            section, value
        )));
    }
    Ok(())
}

/// 验证配置有效性
///
/// API key 不在这里检查，流程启动时才要求
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(invalid("API base URL cannot be empty"));
    }
    if config.api.timeout_secs == 0 {
        return Err(invalid("API timeout cannot be 0"));
    }
    if config.media.timeout_secs == 0 {
        return Err(invalid("Media tool timeout cannot be 0"));
    }

    check_creativity("text", config.text.creativity)?;
    check_samples("text", config.text.num_samples)?;
    check_duration("text", config.text.duration_secs)?;

    check_creativity("short", config.short.creativity)?;
    check_samples("short", config.short.num_samples)?;
    check_duration("short", config.short.duration_secs)?;

    check_samples("long", config.long.num_samples)?;

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出 API key
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Foley Configuration ===");
    tracing::info!("API Base URL: {}", config.api.base_url);
    tracing::info!(
        "API Key: {}",
        if config.api.api_key().is_ok() { "set" } else { "missing" }
    );
    tracing::info!("API Timeout: {}s", config.api.timeout_secs);
    tracing::info!("FFmpeg: {}", config.media.ffmpeg_path.display());
    tracing::info!("FFprobe: {}", config.media.ffprobe_path.display());
    tracing::info!("Media Tool Timeout: {}s", config.media.timeout_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("===========================");
}
