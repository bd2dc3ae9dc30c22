//! Foley - 音效生成客户端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Generation Context: 生成请求与参数校验
//! - Scene Context: 场景选择、拼接清单
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SfxApi, ArtifactFetcher, MediaTool, ArtifactStorage）
//! - Commands: 三个流程的命令处理器
//! - Services: 上传、下载、场景拼接
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 客户端、ffmpeg、文件存储，以及测试用假实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
