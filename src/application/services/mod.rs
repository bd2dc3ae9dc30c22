//! 应用层 - 流程共享组件
//!
//! 上传、下载、场景音频拼接，由各流程处理器组合使用

mod assembler;
mod downloader;
mod uploader;

pub use assembler::{
    SceneAudioAssembler, SceneAudioCollection, CONCATENATED_AUDIO, CONCAT_MANIFEST, FINAL_VIDEO,
};
pub use downloader::{ArtifactDownloader, DownloadFailure, DownloadReport};
pub use uploader::AssetUploader;
