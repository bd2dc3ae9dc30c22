//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SfxApi、ArtifactFetcher、MediaTool、ArtifactStorage）
//! - commands: 三个生成流程的命令及处理器
//! - services: 上传、下载、场景拼接等共享组件
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod services;

// Re-exports
pub use commands::{
    handlers::{LongVideoSfxHandler, ShortVideoSfxHandler, TextToSfxHandler},
    LongVideoSfxCommand, LongVideoSfxResponse, ShortVideoSfxCommand, SfxDownloadResponse,
    TextToSfxCommand,
};

pub use error::ApplicationError;

pub use ports::{
    ApiError, ArtifactFetcherPort, ArtifactStoragePort, Endpoint, FetchError, FetchOutcome,
    GenerationOutcome, MediaToolError, MediaToolPort, SceneOutcome, SfxApiPort, StorageError,
};

pub use services::{
    ArtifactDownloader, AssetUploader, DownloadFailure, DownloadReport, SceneAudioAssembler,
    SceneAudioCollection,
};
