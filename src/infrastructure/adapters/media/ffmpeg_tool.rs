//! FFmpeg Media Tool - 调用本地 ffmpeg / ffprobe
//!
//! 实现 MediaToolPort trait
//!
//! 拼接: ffmpeg -f concat -safe 0 -i <manifest> -c copy -y <output>
//! 合流: ffmpeg -i <video> -i <audio> -map 0:v -map 1:a -c:v copy -c:a aac -shortest -y <output>
//! 时长: ffprobe -v error -show_entries format=duration -of default=noprint_wrappers=1:nokey=1 <path>

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::application::ports::{MediaToolError, MediaToolPort};

/// FFmpeg 配置
#[derive(Debug, Clone)]
pub struct FfmpegConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    /// 单次进程执行超时（秒）
    pub timeout_secs: u64,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            timeout_secs: 600,
        }
    }
}

pub struct FfmpegMediaTool {
    config: FfmpegConfig,
}

/// 拼接参数
pub fn concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        manifest.as_os_str().to_owned(),
        "-c".into(),
        "copy".into(),
        "-y".into(),
        output.as_os_str().to_owned(),
    ]
}

/// 合流参数
pub fn remux_args(video: &Path, audio: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-i".into(),
        video.as_os_str().to_owned(),
        "-i".into(),
        audio.as_os_str().to_owned(),
        "-map".into(),
        "0:v".into(),
        "-map".into(),
        "1:a".into(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        "-shortest".into(),
        "-y".into(),
        output.as_os_str().to_owned(),
    ]
}

fn probe_args(path: &Path) -> Vec<OsString> {
    vec![
        "-v".into(),
        "error".into(),
        "-show_entries".into(),
        "format=duration".into(),
        "-of".into(),
        "default=noprint_wrappers=1:nokey=1".into(),
        path.as_os_str().to_owned(),
    ]
}

fn parse_duration(stdout: &[u8]) -> Result<f64, MediaToolError> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| MediaToolError::InvalidOutput(format!("unexpected duration: {:?}", text)))
}

impl FfmpegMediaTool {
    pub fn new(config: FfmpegConfig) -> Self {
        Self { config }
    }

    /// 运行一次外部进程，成功返回 stdout
    async fn run(
        &self,
        program: &Path,
        operation: &'static str,
        args: Vec<OsString>,
    ) -> Result<Vec<u8>, MediaToolError> {
        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(program = %program.display(), args = ?args, "Running media tool");

        let secs = self.config.timeout_secs;
        let output = match tokio::time::timeout(Duration::from_secs(secs), command.output()).await
        {
            Err(_) => return Err(MediaToolError::Timeout { operation, secs }),
            Ok(Err(e)) => {
                return Err(MediaToolError::SpawnError(format!(
                    "{}: {}",
                    program.display(),
                    e
                )))
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(MediaToolError::Failed {
                operation,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl MediaToolPort for FfmpegMediaTool {
    async fn check_available(&self) -> Result<(), MediaToolError> {
        self.run(&self.config.ffmpeg_path, "ffmpeg -version", vec!["-version".into()])
            .await
            .map(|_| ())
            .map_err(|e| {
                MediaToolError::NotAvailable(format!(
                    "{} ({}), install ffmpeg and make sure it is on PATH",
                    self.config.ffmpeg_path.display(),
                    e
                ))
            })
    }

    async fn concat_audio_list(
        &self,
        manifest: &Path,
        output: &Path,
    ) -> Result<(), MediaToolError> {
        self.run(&self.config.ffmpeg_path, "concat", concat_args(manifest, output))
            .await
            .map(|_| ())
    }

    async fn remux_video_audio(
        &self,
        video: &Path,
        audio: &Path,
        output: &Path,
    ) -> Result<(), MediaToolError> {
        self.run(&self.config.ffmpeg_path, "remux", remux_args(video, audio, output))
            .await
            .map(|_| ())
    }

    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaToolError> {
        let stdout = self
            .run(&self.config.ffprobe_path, "probe", probe_args(path))
            .await?;
        parse_duration(&stdout)
    }
}
