//! 产物命名
//!
//! 下载产物按输入顺序的 1-based 序号命名，
//! 支持 `{index}` 与补零形式 `{index:03}` 两种占位符

use std::path::PathBuf;

use super::scene::SceneSegment;

/// 文件命名模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    pub const TEXT_VARIATION: &'static str = "sfx_variation_{index}.wav";
    pub const RESULT_VIDEO: &'static str = "result_video_{index}.mp4";
    pub const RESULT_AUDIO: &'static str = "result_audio_{index}.wav";
    pub const SCENE_AUDIO: &'static str = "scene_{index:03}.wav";

    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 生成第 `index` 个文件名
    ///
    /// 没有占位符时在扩展名前追加 `_{index}`，保证不同序号不会重名
    pub fn file_name(&self, index: usize) -> String {
        let Some(open) = self.0.find("{index") else {
            return append_index(&self.0, index);
        };
        let Some(close) = self.0[open..].find('}').map(|c| open + c) else {
            return append_index(&self.0, index);
        };

        let suffix = &self.0[open + "{index".len()..close];
        let rendered = match suffix.strip_prefix(':') {
            Some(width) => match width.parse::<usize>() {
                Ok(width) => format!("{:0width$}", index, width = width),
                Err(_) => index.to_string(),
            },
            None => index.to_string(),
        };

        format!("{}{}{}", &self.0[..open], rendered, &self.0[close + 1..])
    }
}

fn append_index(name: &str, index: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, index, ext),
        _ => format!("{}_{}", name, index),
    }
}

/// 已下载到本地的产物
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedArtifact {
    /// 输入顺序序号（从 1 开始）
    pub index: usize,
    pub local_path: PathBuf,
    pub source_url: String,
    /// 长视频流程中对应的场景
    pub source_segment: Option<SceneSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_index() {
        let pattern = NamePattern::new(NamePattern::TEXT_VARIATION);
        assert_eq!(pattern.file_name(1), "sfx_variation_1.wav");
        assert_eq!(pattern.file_name(12), "sfx_variation_12.wav");
    }

    #[test]
    fn test_zero_padded_index() {
        let pattern = NamePattern::new(NamePattern::SCENE_AUDIO);
        assert_eq!(pattern.file_name(7), "scene_007.wav");
        assert_eq!(pattern.file_name(1234), "scene_1234.wav");
    }

    #[test]
    fn test_pattern_without_placeholder() {
        assert_eq!(NamePattern::new("take.wav").file_name(2), "take_2.wav");
        assert_eq!(NamePattern::new("take").file_name(2), "take_2");
    }
}
