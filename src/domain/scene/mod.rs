//! Scene Context - 长视频场景上下文
//!
//! 职责:
//! - 每个场景的候选音频选择
//! - 拼接清单
//! - 合流时长规则

mod manifest;
mod segment;

pub use manifest::{shorter_wins, ConcatManifest};
pub use segment::{plan_scene_audio, SceneSegment, ScenePlan, SelectedScene, SkippedScene};
