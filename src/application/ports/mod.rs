//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_fetcher;
mod artifact_storage;
mod media_tool;
mod sfx_api;

pub use artifact_fetcher::{ArtifactFetcherPort, FetchError, FetchOutcome};
pub use artifact_storage::{ArtifactStoragePort, StorageError};
pub use media_tool::{MediaToolError, MediaToolPort};
pub use sfx_api::{ApiError, Endpoint, GenerationOutcome, SceneOutcome, SfxApiPort};
