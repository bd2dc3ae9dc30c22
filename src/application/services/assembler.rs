//! Scene Audio Assembler - 场景音频拼接与合流
//!
//! A. 每个场景选首个候选音频并下载（空候选直接跳过）
//! B. 按开始时间顺序写拼接清单，流拷贝拼接为一条音轨
//! C. 原视频画面流 + 拼接音轨合流，输出时长取较短的一路
//!
//! 跳过的场景不补静音，拼接音轨会比视频时间线短，合流时按较短者截断

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactStoragePort, MediaToolPort};
use crate::application::services::downloader::{ArtifactDownloader, DownloadReport};
use crate::domain::scene::{
    plan_scene_audio, ConcatManifest, SceneSegment, ScenePlan, SkippedScene,
};
use crate::domain::{DownloadedArtifact, NamePattern};

/// 拼接清单文件名
pub const CONCAT_MANIFEST: &str = "concat_list.txt";
/// 拼接后的音轨文件名
pub const CONCATENATED_AUDIO: &str = "concatenated_audio.wav";
/// 最终视频文件名
pub const FINAL_VIDEO: &str = "final_video_with_sfx.mp4";

/// 步骤 A 的结果
#[derive(Debug, Clone, Default)]
pub struct SceneAudioCollection {
    pub plan: ScenePlan,
    pub report: DownloadReport,
}

pub struct SceneAudioAssembler {
    downloader: ArtifactDownloader,
    media: Arc<dyn MediaToolPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    scene_pattern: NamePattern,
}

impl SceneAudioAssembler {
    pub fn new(
        downloader: ArtifactDownloader,
        media: Arc<dyn MediaToolPort>,
        storage: Arc<dyn ArtifactStoragePort>,
    ) -> Self {
        Self {
            downloader,
            media,
            storage,
            scene_pattern: NamePattern::new(NamePattern::SCENE_AUDIO),
        }
    }

    /// 步骤 A：选择并下载每个场景的音频
    ///
    /// 下载失败的场景与无候选的场景一样计入跳过列表
    pub async fn collect(&self, segments: &[SceneSegment]) -> SceneAudioCollection {
        let mut plan = plan_scene_audio(segments);
        let mut report = DownloadReport::default();
        let mut failed = Vec::new();

        for scene in &plan.skipped {
            tracing::warn!(
                scene = scene.scene_index,
                start = scene.segment.start_seconds,
                duration = scene.segment.duration_seconds,
                "No audio generated for scene, skipping"
            );
        }

        for scene in &plan.selected {
            tracing::info!(
                scene = scene.scene_index,
                start = %format!("{:.2}", scene.segment.start_seconds),
                end = %format!("{:.2}", scene.segment.end_seconds()),
                "Downloading scene audio"
            );
            match self
                .downloader
                .download_one(
                    scene.scene_index,
                    &scene.audio_url,
                    &self.scene_pattern,
                    Some(&scene.segment),
                )
                .await
            {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(failure) => {
                    failed.push(SkippedScene {
                        scene_index: scene.scene_index,
                        segment: scene.segment.clone(),
                    });
                    report.failures.push(failure);
                }
            }
        }

        if !failed.is_empty() {
            plan.skipped.extend(failed);
            plan.skipped.sort_by_key(|s| s.scene_index);
        }

        if !plan.skipped.is_empty() {
            tracing::warn!(
                skipped_scenes = ?plan.skipped_indices(),
                missing_seconds = plan.skipped_seconds(),
                "Concatenated track will be shorter than the video timeline"
            );
        }

        SceneAudioCollection { plan, report }
    }

    /// 步骤 B：写拼接清单并拼接
    ///
    /// 没有可拼接的文件时返回 `None`，不调用媒体工具
    pub async fn concatenate(
        &self,
        artifacts: &[DownloadedArtifact],
    ) -> Result<Option<PathBuf>, ApplicationError> {
        if artifacts.is_empty() {
            tracing::warn!("No audio files to concatenate");
            return Ok(None);
        }

        let mut ordered: Vec<&DownloadedArtifact> = artifacts.iter().collect();
        ordered.sort_by(|a, b| start_of(a).total_cmp(&start_of(b)));

        let mut entries = Vec::with_capacity(ordered.len());
        for artifact in ordered {
            entries.push(absolute(&artifact.local_path).await);
        }
        let manifest = ConcatManifest::new(entries);

        let manifest_path = self
            .storage
            .write_text(CONCAT_MANIFEST, &manifest.render())
            .await?;
        let output = self.storage.path_for(CONCATENATED_AUDIO);

        tracing::info!(
            segments = manifest.len(),
            manifest = %manifest_path.display(),
            "Concatenating scene audio"
        );
        self.media.concat_audio_list(&manifest_path, &output).await?;
        tracing::info!(output = %output.display(), "Concatenated audio saved");

        Ok(Some(output))
    }

    /// 步骤 C：替换原视频音轨
    pub async fn remux(&self, video: &Path, audio: &Path) -> Result<PathBuf, ApplicationError> {
        let output = self.storage.path_for(FINAL_VIDEO);

        tracing::info!(
            video = %video.display(),
            audio = %audio.display(),
            "Merging audio with video"
        );
        self.media.remux_video_audio(video, audio, &output).await?;
        tracing::info!(output = %output.display(), "Final video saved");

        Ok(output)
    }
}

fn start_of(artifact: &DownloadedArtifact) -> f64 {
    artifact
        .source_segment
        .as_ref()
        .map(|s| s.start_seconds)
        .unwrap_or(0.0)
}

async fn absolute(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeArtifactFetcher, FakeMediaTool, FileArtifactStorage};
    use tempfile::tempdir;

    struct Fixture {
        assembler: SceneAudioAssembler,
        media: Arc<FakeMediaTool>,
        _dir: tempfile::TempDir,
        root: PathBuf,
    }

    async fn fixture(fetcher: FakeArtifactFetcher, media: FakeMediaTool) -> Fixture {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let storage = Arc::new(FileArtifactStorage::new(&root));
        storage.prepare().await.unwrap();
        let media = Arc::new(media);
        let downloader = ArtifactDownloader::new(Arc::new(fetcher), storage.clone());
        Fixture {
            assembler: SceneAudioAssembler::new(downloader, media.clone(), storage),
            media,
            _dir: dir,
            root,
        }
    }

    fn segment(start: f64, duration: f64, urls: &[&str]) -> SceneSegment {
        SceneSegment::new(start, duration, urls.iter().map(|u| u.to_string()).collect())
    }

    #[tokio::test]
    async fn test_manifest_lists_scenes_in_start_order() {
        let fetcher = FakeArtifactFetcher::new()
            .with_artifact("https://cdn/a.wav", b"a".to_vec())
            .with_artifact("https://cdn/b.wav", b"b".to_vec())
            .with_artifact("https://cdn/c.wav", b"c".to_vec());
        let fx = fixture(fetcher, FakeMediaTool::new()).await;

        let segments = vec![
            segment(0.0, 2.5, &["https://cdn/a.wav"]),
            segment(2.5, 3.5, &["https://cdn/b.wav"]),
            segment(6.0, 4.0, &["https://cdn/c.wav"]),
        ];
        let collection = fx.assembler.collect(&segments).await;
        assert_eq!(collection.report.artifacts.len(), 3);

        let output = fx
            .assembler
            .concatenate(&collection.report.artifacts)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(output, fx.root.join(CONCATENATED_AUDIO));

        let text = std::fs::read_to_string(fx.root.join(CONCAT_MANIFEST)).unwrap();
        let names: Vec<String> = ConcatManifest::parse(&text)
            .entries()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["scene_001.wav", "scene_002.wav", "scene_003.wav"]);

        // 清单使用绝对路径
        assert!(ConcatManifest::parse(&text).entries().iter().all(|p| p.is_absolute()));
        assert_eq!(fx.media.concat_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidate_scene_is_skipped() {
        let fetcher = FakeArtifactFetcher::new()
            .with_artifact("https://cdn/a.wav", b"a".to_vec())
            .with_artifact("https://cdn/c.wav", b"c".to_vec());
        let fx = fixture(fetcher, FakeMediaTool::new()).await;

        let segments = vec![
            segment(0.0, 2.5, &["https://cdn/a.wav"]),
            segment(2.5, 3.5, &[]),
            segment(6.0, 4.0, &["https://cdn/c.wav"]),
        ];
        let collection = fx.assembler.collect(&segments).await;

        assert_eq!(collection.plan.skipped_indices(), vec![2]);
        assert!(collection.report.failures.is_empty());
        let indices: Vec<_> = collection.report.artifacts.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 3]);
        // 没有占位文件
        assert!(!fx.root.join("scene_002.wav").exists());

        fx.assembler
            .concatenate(&collection.report.artifacts)
            .await
            .unwrap();
        let entries = fx.media.concat_calls().remove(0);
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_download_counts_as_skipped() {
        let fetcher = FakeArtifactFetcher::new()
            .with_artifact("https://cdn/a.wav", b"a".to_vec())
            .with_status("https://cdn/b.wav", 404)
            .with_artifact("https://cdn/d.wav", b"d".to_vec());
        let fx = fixture(fetcher, FakeMediaTool::new()).await;

        let segments = vec![
            segment(0.0, 2.0, &["https://cdn/a.wav"]),
            segment(2.0, 1.5, &["https://cdn/b.wav"]),
            segment(3.5, 1.0, &[]),
            segment(4.5, 3.0, &["https://cdn/d.wav"]),
        ];
        let collection = fx.assembler.collect(&segments).await;

        // 无候选与下载失败合并，按场景序号排列
        assert_eq!(collection.plan.skipped_indices(), vec![2, 3]);
        assert_eq!(collection.plan.skipped_seconds(), 2.5);
        assert_eq!(collection.report.failures.len(), 1);
        let indices: Vec<_> = collection.report.artifacts.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_nothing_to_concatenate() {
        let fx = fixture(FakeArtifactFetcher::new(), FakeMediaTool::new()).await;
        let result = fx.assembler.concatenate(&[]).await.unwrap();
        assert!(result.is_none());
        assert!(fx.media.concat_calls().is_empty());
        assert!(!fx.root.join(CONCAT_MANIFEST).exists());
    }

    #[tokio::test]
    async fn test_concat_failure_surfaces_stderr() {
        let fetcher = FakeArtifactFetcher::new().with_artifact("https://cdn/a.wav", b"a".to_vec());
        let fx = fixture(
            fetcher,
            FakeMediaTool::new().with_concat_failure("Invalid data found when processing input"),
        )
        .await;

        let collection = fx
            .assembler
            .collect(&[segment(0.0, 1.0, &["https://cdn/a.wav"])])
            .await;
        let err = fx
            .assembler
            .concatenate(&collection.report.artifacts)
            .await
            .unwrap_err();

        match err {
            ApplicationError::MediaToolError(msg) => {
                assert!(msg.contains("Invalid data found when processing input"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remux_uses_shorter_stream() {
        let fx = fixture(
            FakeArtifactFetcher::new(),
            FakeMediaTool::new()
                .with_duration("/videos/input.mp4", 10.0)
                .with_duration("/audio/track.wav", 8.0),
        )
        .await;

        let output = fx
            .assembler
            .remux(Path::new("/videos/input.mp4"), Path::new("/audio/track.wav"))
            .await
            .unwrap();

        assert_eq!(output, fx.root.join(FINAL_VIDEO));
        assert_eq!(fx.media.probe_duration(&output).await.unwrap(), 8.0);
    }
}
