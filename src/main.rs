//! Foley - 音效生成命令行工具
//!
//! 三个流程：
//! - text: 文本提示生成音效
//! - short: 短视频生成音效（音频或已合成的视频）
//! - long: 长视频分场景生成音效，拼接后替换原音轨

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use foley::application::{
    DownloadReport, LongVideoSfxCommand, LongVideoSfxHandler, ShortVideoSfxCommand,
    ShortVideoSfxHandler, TextToSfxCommand, TextToSfxHandler,
};
use foley::config::{
    load_config_from_path, print_config, AppConfig, LogConfig, LongWorkflowConfig,
    ShortWorkflowConfig, TextWorkflowConfig,
};
use foley::infrastructure::{
    FfmpegConfig, FfmpegMediaTool, FileArtifactStorage, HttpArtifactFetcher, HttpSfxClient,
    HttpSfxClientConfig,
};

/// Foley - generate sound effects from text or video
#[derive(Parser)]
#[command(name = "foley")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "FOLEY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sound effects from a text prompt
    Text(TextArgs),

    /// Generate sound effects for a short video (up to 10 seconds)
    Short(ShortArgs),

    /// Generate per-scene sound effects for a long video and remux them
    Long(LongArgs),
}

/// Flags shared by every workflow
#[derive(Args)]
struct CommonArgs {
    /// Output directory (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of samples to generate
    #[arg(short = 'n', long)]
    num_samples: Option<u32>,
}

#[derive(Args)]
struct TextArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Text prompt describing the sound
    #[arg(short, long)]
    prompt: Option<String>,

    /// Duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Creativity coefficient (1-10)
    #[arg(long)]
    creativity: Option<u8>,

    /// Model version
    #[arg(long)]
    model_version: Option<String>,
}

#[derive(Args)]
struct ShortArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Input video file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Optional text prompt guiding the generation
    #[arg(short, long)]
    prompt: Option<String>,

    /// Duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Creativity coefficient (1-10)
    #[arg(long)]
    creativity: Option<u8>,

    /// Model version
    #[arg(long)]
    model_version: Option<String>,

    /// Return audio files instead of videos with the audio merged in
    #[arg(long)]
    audio_only: bool,

    /// Quality steps
    #[arg(long)]
    steps: Option<u32>,

    /// MIME type announced for the upload (defaults to the extension)
    #[arg(long)]
    content_type: Option<String>,
}

#[derive(Args)]
struct LongArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Input video file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// MIME type announced for the upload (defaults to the extension)
    #[arg(long)]
    content_type: Option<String>,
}

impl CommonArgs {
    fn apply(&self, output_dir: &mut PathBuf, num_samples: &mut u32) {
        if let Some(dir) = &self.output_dir {
            *output_dir = dir.clone();
        }
        if let Some(n) = self.num_samples {
            *num_samples = n;
        }
    }
}

impl TextArgs {
    fn apply(self, config: &mut TextWorkflowConfig) {
        self.common
            .apply(&mut config.output_dir, &mut config.num_samples);
        if let Some(prompt) = self.prompt {
            config.prompt = prompt;
        }
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(creativity) = self.creativity {
            config.creativity = creativity;
        }
        if let Some(model) = self.model_version {
            config.model_version = model;
        }
    }
}

impl ShortArgs {
    fn apply(self, config: &mut ShortWorkflowConfig) {
        self.common
            .apply(&mut config.output_dir, &mut config.num_samples);
        if let Some(input) = self.input {
            config.input = input;
        }
        if self.prompt.is_some() {
            config.prompt = self.prompt;
        }
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(creativity) = self.creativity {
            config.creativity = creativity;
        }
        if let Some(model) = self.model_version {
            config.model_version = model;
        }
        if self.audio_only {
            config.audio_only = true;
        }
        if self.steps.is_some() {
            config.steps = self.steps;
        }
        if self.content_type.is_some() {
            config.content_type = self.content_type;
        }
    }
}

impl LongArgs {
    fn apply(self, config: &mut LongWorkflowConfig) {
        self.common
            .apply(&mut config.output_dir, &mut config.num_samples);
        if let Some(input) = self.input {
            config.input = input;
        }
        if self.content_type.is_some() {
            config.content_type = self.content_type;
        }
    }
}

/// 初始化日志：RUST_LOG 优先，否则使用配置级别，-v 逐级提高
fn init_logging(log: &LogConfig, verbosity: u8) {
    let level = match verbosity {
        0 => log.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},foley={level}")));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(verbosity >= 2)
            .init();
    }
}

fn log_report(report: &DownloadReport) {
    for artifact in &report.artifacts {
        tracing::info!(
            index = artifact.index,
            path = %artifact.local_path.display(),
            "Saved"
        );
    }
    for failure in &report.failures {
        tracing::warn!(
            index = failure.index,
            url = %failure.url,
            reason = %failure.reason,
            "Download failed"
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let mut config: AppConfig = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log, cli.verbose);

    tracing::info!("Foley - sound effects generation");
    print_config(&config);

    // 启动流程前必须有 API key
    let api_key = config.api.api_key()?.to_string();

    let api = Arc::new(HttpSfxClient::new(
        HttpSfxClientConfig::new(&config.api.base_url, api_key)
            .with_timeout(config.api.timeout_secs),
    )?);
    let fetcher = Arc::new(HttpArtifactFetcher::new(config.api.timeout_secs)?);

    match cli.command {
        Commands::Text(args) => {
            args.apply(&mut config.text);
            let text = config.text;
            let storage = Arc::new(FileArtifactStorage::new(&text.output_dir));
            let handler = TextToSfxHandler::new(api, fetcher, storage);

            let response = handler
                .handle(TextToSfxCommand {
                    prompt: text.prompt,
                    duration_seconds: text.duration_secs,
                    sample_count: text.num_samples,
                    model_version: text.model_version,
                    creativity: text.creativity,
                    audio_only: text.audio_only,
                })
                .await?;

            log_report(&response.report);
            tracing::info!(
                accepted = response.accepted,
                saved = response.report.artifacts.len(),
                output_dir = %response.output_dir.display(),
                "Text to SFX finished"
            );
        }
        Commands::Short(args) => {
            args.apply(&mut config.short);
            let short = config.short;
            let storage = Arc::new(FileArtifactStorage::new(&short.output_dir));
            let handler = ShortVideoSfxHandler::new(api, fetcher, storage);

            let response = handler
                .handle(ShortVideoSfxCommand {
                    input: short.input,
                    content_type: short.content_type,
                    prompt: short.prompt,
                    duration_seconds: short.duration_secs,
                    sample_count: short.num_samples,
                    model_version: short.model_version,
                    creativity: short.creativity,
                    audio_only: short.audio_only,
                    quality_steps: short.steps,
                })
                .await?;

            log_report(&response.report);
            tracing::info!(
                accepted = response.accepted,
                saved = response.report.artifacts.len(),
                output_dir = %response.output_dir.display(),
                "Short video SFX finished"
            );
        }
        Commands::Long(args) => {
            args.apply(&mut config.long);
            let long = config.long;
            let storage = Arc::new(FileArtifactStorage::new(&long.output_dir));
            let media = Arc::new(FfmpegMediaTool::new(FfmpegConfig {
                ffmpeg_path: config.media.ffmpeg_path.clone(),
                ffprobe_path: config.media.ffprobe_path.clone(),
                timeout_secs: config.media.timeout_secs,
            }));
            let handler = LongVideoSfxHandler::new(api, fetcher, media, storage);

            let response = handler
                .handle(LongVideoSfxCommand {
                    input: long.input,
                    content_type: long.content_type,
                    sample_count: long.num_samples,
                })
                .await?;

            log_report(&response.scene_audio);
            if let Some(video) = &response.final_video {
                tracing::info!(
                    path = %video.display(),
                    duration = ?response.final_duration_seconds,
                    "Final video with SFX"
                );
            }
            tracing::info!(
                accepted = response.accepted,
                scenes = response.scene_count,
                skipped = ?response.skipped_scenes,
                skipped_seconds = response.skipped_seconds,
                output_dir = %response.output_dir.display(),
                "Long video SFX finished"
            );
        }
    }

    Ok(())
}
