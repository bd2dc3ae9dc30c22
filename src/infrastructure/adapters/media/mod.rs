//! Media Adapter - ffmpeg 与测试用假实现

mod fake_media_tool;
mod ffmpeg_tool;

pub use fake_media_tool::FakeMediaTool;
pub use ffmpeg_tool::*;
