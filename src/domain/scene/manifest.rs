//! Scene Context - 拼接清单与时长规则
//!
//! 清单使用媒体工具 concat demuxer 的格式：每行 `file '<path>'`

use std::path::{Path, PathBuf};

/// 有序的音频拼接清单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 渲染为清单文本
    pub fn render(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str("file '");
            text.push_str(&escape_path(entry));
            text.push_str("'\n");
        }
        text
    }

    /// 解析清单文本，忽略空行和注释
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.strip_prefix("file "))
            .map(|quoted| PathBuf::from(unescape_path(quoted.trim())))
            .collect();
        Self { entries }
    }
}

// 单引号内不能转义，需先闭合再输出 \' 再重新打开
fn escape_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

fn unescape_path(quoted: &str) -> String {
    let inner = quoted
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(quoted);
    inner.replace(r"'\''", "'")
}

/// 合并两路流时输出时长取较短者
pub fn shorter_wins(video_seconds: f64, audio_seconds: f64) -> f64 {
    video_seconds.min(audio_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preserves_order() {
        let manifest = ConcatManifest::new(vec![
            PathBuf::from("/out/scene_001.wav"),
            PathBuf::from("/out/scene_002.wav"),
            PathBuf::from("/out/scene_003.wav"),
        ]);
        assert_eq!(
            manifest.render(),
            "file '/out/scene_001.wav'\nfile '/out/scene_002.wav'\nfile '/out/scene_003.wav'\n"
        );
    }

    #[test]
    fn test_quote_escaping() {
        let manifest = ConcatManifest::new(vec![PathBuf::from("/out/it's.wav")]);
        let text = manifest.render();
        assert_eq!(text, "file '/out/it'\\''s.wav'\n");
        assert_eq!(ConcatManifest::parse(&text), manifest);
    }

    #[test]
    fn test_parse_skips_comments() {
        let manifest = ConcatManifest::parse("# generated\n\nfile '/a.wav'\nfile '/b.wav'\n");
        assert_eq!(
            manifest.entries(),
            &[PathBuf::from("/a.wav"), PathBuf::from("/b.wav")]
        );
    }

    #[test]
    fn test_shorter_wins() {
        assert_eq!(shorter_wins(10.0, 8.0), 8.0);
        assert_eq!(shorter_wins(6.0, 8.0), 6.0);
    }
}
