//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Generation Context: 生成请求与上传素材
//! - Scene Context: 长视频场景与音轨拼接规则

pub mod generation;
pub mod scene;

// 共享的产物命名
mod artifact;

pub use artifact::{DownloadedArtifact, NamePattern};
