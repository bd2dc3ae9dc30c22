//! Scene Context - 场景片段与候选音频选择

/// 服务端检测出的场景片段
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSegment {
    pub start_seconds: f64,
    pub duration_seconds: f64,
    /// 候选音频，按服务端返回顺序
    pub candidate_audio_urls: Vec<String>,
}

impl SceneSegment {
    pub fn new(
        start_seconds: f64,
        duration_seconds: f64,
        candidate_audio_urls: Vec<String>,
    ) -> Self {
        Self {
            start_seconds,
            duration_seconds,
            candidate_audio_urls,
        }
    }

    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }

    /// 首个候选音频（参考流程只消费第一个）
    pub fn primary_candidate(&self) -> Option<&str> {
        self.candidate_audio_urls.first().map(String::as_str)
    }
}

/// 选中了音频的场景
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedScene {
    /// 场景序号（从 1 开始，跳过的场景也占序号）
    pub scene_index: usize,
    pub segment: SceneSegment,
    pub audio_url: String,
}

/// 没有可用音频的场景（无候选或下载失败）
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedScene {
    pub scene_index: usize,
    pub segment: SceneSegment,
}

/// 每个场景的选择结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePlan {
    pub selected: Vec<SelectedScene>,
    pub skipped: Vec<SkippedScene>,
}

impl ScenePlan {
    /// 被跳过场景声明的总时长（秒），即拼接音轨相对视频时间线的缺口
    pub fn skipped_seconds(&self) -> f64 {
        self.skipped
            .iter()
            .fold(0.0, |acc, s| acc + s.segment.duration_seconds)
    }

    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|s| s.scene_index).collect()
    }
}

/// 为每个场景选择一个候选音频
///
/// 场景按开始时间升序编号（稳定排序，保持服务端给出的相对顺序）。
/// 候选列表为空的场景被跳过，不插入静音占位，拼接后的音轨会相应变短。
pub fn plan_scene_audio(segments: &[SceneSegment]) -> ScenePlan {
    let mut ordered: Vec<&SceneSegment> = segments.iter().collect();
    ordered.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));

    let mut plan = ScenePlan::default();
    for (offset, segment) in ordered.into_iter().enumerate() {
        let scene_index = offset + 1;
        match segment.primary_candidate() {
            Some(url) => plan.selected.push(SelectedScene {
                scene_index,
                segment: segment.clone(),
                audio_url: url.to_string(),
            }),
            None => plan.skipped.push(SkippedScene {
                scene_index,
                segment: segment.clone(),
            }),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, duration: f64, urls: &[&str]) -> SceneSegment {
        SceneSegment::new(start, duration, urls.iter().map(|u| u.to_string()).collect())
    }

    #[test]
    fn test_first_candidate_selected() {
        let plan = plan_scene_audio(&[segment(0.0, 2.5, &["a1", "a2"])]);
        assert_eq!(plan.selected.len(), 1);
        assert_eq!(plan.selected[0].audio_url, "a1");
        assert_eq!(plan.selected[0].scene_index, 1);
    }

    #[test]
    fn test_empty_candidates_skipped_without_placeholder() {
        let plan = plan_scene_audio(&[
            segment(0.0, 2.5, &["a"]),
            segment(2.5, 3.5, &[]),
            segment(6.0, 4.0, &["c"]),
        ]);

        assert_eq!(plan.selected.len(), 2);
        assert_eq!(plan.skipped_indices(), vec![2]);
        assert_eq!(plan.skipped_seconds(), 3.5);
        // 序号不压缩
        assert_eq!(plan.selected[1].scene_index, 3);
    }

    #[test]
    fn test_nothing_skipped_is_positive_zero() {
        let plan = plan_scene_audio(&[segment(0.0, 2.5, &["a"])]);
        assert_eq!(plan.skipped_seconds(), 0.0);
        assert!(plan.skipped_seconds().is_sign_positive());
    }

    #[test]
    fn test_scenes_ordered_by_start() {
        let plan = plan_scene_audio(&[
            segment(6.0, 1.0, &["c"]),
            segment(0.0, 2.5, &["a"]),
            segment(2.5, 3.5, &["b"]),
        ]);
        let urls: Vec<_> = plan.selected.iter().map(|s| s.audio_url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_all_skipped() {
        let plan = plan_scene_audio(&[segment(0.0, 1.0, &[]), segment(1.0, 1.0, &[])]);
        assert!(plan.selected.is_empty());
        assert_eq!(plan.skipped_seconds(), 2.0);
    }
}
