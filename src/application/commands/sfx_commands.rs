//! SFX Commands - 三个生成流程的命令与响应

use std::path::PathBuf;

use crate::application::services::DownloadReport;

/// 文本生成音效命令
#[derive(Debug, Clone)]
pub struct TextToSfxCommand {
    pub prompt: String,
    pub duration_seconds: f64,
    pub sample_count: u32,
    pub model_version: String,
    pub creativity: u8,
    pub audio_only: bool,
}

/// 短视频生成音效命令
#[derive(Debug, Clone)]
pub struct ShortVideoSfxCommand {
    pub input: PathBuf,
    /// 未指定时按扩展名推断
    pub content_type: Option<String>,
    pub prompt: Option<String>,
    pub duration_seconds: f64,
    pub sample_count: u32,
    pub model_version: String,
    pub creativity: u8,
    /// false 时返回已合成音轨的视频
    pub audio_only: bool,
    pub quality_steps: Option<u32>,
}

/// 长视频分场景生成音效命令
#[derive(Debug, Clone)]
pub struct LongVideoSfxCommand {
    pub input: PathBuf,
    pub content_type: Option<String>,
    /// 每个场景的样本数
    pub sample_count: u32,
}

/// 文本 / 短视频流程响应
#[derive(Debug, Clone)]
pub struct SfxDownloadResponse {
    /// 生成请求是否被服务端接受
    pub accepted: bool,
    pub output_dir: PathBuf,
    pub report: DownloadReport,
}

/// 长视频流程响应
#[derive(Debug, Clone)]
pub struct LongVideoSfxResponse {
    pub accepted: bool,
    pub output_dir: PathBuf,
    pub scene_count: usize,
    /// 没有可用音频的场景序号（无候选或下载失败）
    pub skipped_scenes: Vec<usize>,
    /// 跳过场景覆盖的时长（秒）
    pub skipped_seconds: f64,
    pub scene_audio: DownloadReport,
    pub concatenated_audio: Option<PathBuf>,
    pub final_video: Option<PathBuf>,
    pub final_duration_seconds: Option<f64>,
}

impl LongVideoSfxResponse {
    pub(crate) fn empty(accepted: bool, output_dir: PathBuf) -> Self {
        Self {
            accepted,
            output_dir,
            scene_count: 0,
            skipped_scenes: Vec::new(),
            skipped_seconds: 0.0,
            scene_audio: DownloadReport::default(),
            concatenated_audio: None,
            final_video: None,
            final_duration_seconds: None,
        }
    }
}
