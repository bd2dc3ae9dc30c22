//! Short Video SFX Handler - 短视频（≤10 秒）生成音效
//!
//! 上传 → 生成 → 下载音频或已合成的视频

use std::sync::Arc;

use crate::application::commands::sfx_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactFetcherPort, ArtifactStoragePort, GenerationOutcome, SfxApiPort,
};
use crate::application::services::{ArtifactDownloader, AssetUploader, DownloadReport};
use crate::domain::generation::{GenerationRequest, MediaContentType};
use crate::domain::NamePattern;

/// ShortVideoSfx Handler
pub struct ShortVideoSfxHandler {
    api: Arc<dyn SfxApiPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    uploader: AssetUploader,
    downloader: ArtifactDownloader,
}

impl ShortVideoSfxHandler {
    pub fn new(
        api: Arc<dyn SfxApiPort>,
        fetcher: Arc<dyn ArtifactFetcherPort>,
        storage: Arc<dyn ArtifactStoragePort>,
    ) -> Self {
        Self {
            uploader: AssetUploader::new(api.clone()),
            downloader: ArtifactDownloader::new(fetcher, storage.clone()),
            api,
            storage,
        }
    }

    pub async fn handle(
        &self,
        cmd: ShortVideoSfxCommand,
    ) -> Result<SfxDownloadResponse, ApplicationError> {
        // 本地前置条件
        AssetUploader::ensure_input(&cmd.input).await?;
        let content_type = match cmd.content_type {
            Some(mime) => MediaContentType::new(mime)?,
            None => MediaContentType::from_path(&cmd.input),
        };
        let request = GenerationRequest::builder()
            .maybe_prompt(cmd.prompt)
            .duration_seconds(cmd.duration_seconds)
            .sample_count(cmd.sample_count)
            .model_version(cmd.model_version)
            .creativity(cmd.creativity)
            .audio_only(cmd.audio_only)
            .quality_steps(cmd.quality_steps)
            .build()?;

        self.storage.prepare().await?;
        let output_dir = self.storage.output_dir().to_path_buf();

        let asset = self.uploader.upload(&cmd.input, &content_type).await?;
        let request = request.with_source_asset(asset.asset_id);

        tracing::info!(
            duration = request.duration_seconds(),
            samples = request.sample_count(),
            creativity = %request.creativity(),
            audio_only = request.audio_only(),
            prompt = request.prompt().unwrap_or_default(),
            steps = ?request.quality_steps(),
            "Generating SFX for short video"
        );

        let output_paths = match self.api.request_generation(&request).await? {
            GenerationOutcome::Created { output_paths } => output_paths,
            GenerationOutcome::Rejected { status, body } => {
                tracing::error!(status, body = %body, "Generation request rejected");
                return Ok(SfxDownloadResponse {
                    accepted: false,
                    output_dir,
                    report: DownloadReport::default(),
                });
            }
        };

        tracing::info!(count = output_paths.len(), "Generated output files");

        let pattern = if request.audio_only() {
            NamePattern::new(NamePattern::RESULT_AUDIO)
        } else {
            NamePattern::new(NamePattern::RESULT_VIDEO)
        };
        let report = self.downloader.download_all(&output_paths, &pattern).await;

        Ok(SfxDownloadResponse {
            accepted: true,
            output_dir,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{
        FakeArtifactFetcher, FakeSfxCall, FakeSfxClient, FileArtifactStorage,
    };
    use std::path::Path;
    use tempfile::tempdir;

    fn command(input: &Path) -> ShortVideoSfxCommand {
        ShortVideoSfxCommand {
            input: input.to_path_buf(),
            content_type: None,
            prompt: Some("cinematic sound effects".to_string()),
            duration_seconds: 10.0,
            sample_count: 1,
            model_version: "1.5".to_string(),
            creativity: 5,
            audio_only: false,
            quality_steps: Some(25),
        }
    }

    #[tokio::test]
    async fn test_upload_generate_download_video() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input_video_short.mp4");
        tokio::fs::write(&input, b"short video").await.unwrap();
        let out = dir.path().join("example2");

        let api = Arc::new(
            FakeSfxClient::new().with_output_paths(vec!["https://cdn/result.mp4".to_string()]),
        );
        let fetcher = Arc::new(
            FakeArtifactFetcher::new().with_artifact("https://cdn/result.mp4", b"muxed".to_vec()),
        );
        let handler = ShortVideoSfxHandler::new(
            api.clone(),
            fetcher,
            Arc::new(FileArtifactStorage::new(&out)),
        );

        let response = handler.handle(command(&input)).await.unwrap();

        assert!(response.accepted);
        assert_eq!(std::fs::read(out.join("result_video_1.mp4")).unwrap(), b"muxed");

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        let asset_id = match &calls[1] {
            FakeSfxCall::UploadBytes { upload_url, size } => {
                assert_eq!(*size, 11);
                upload_url.rsplit('/').next().unwrap().to_string()
            }
            other => panic!("unexpected call: {:?}", other),
        };
        match &calls[2] {
            FakeSfxCall::Generation(request) => {
                assert_eq!(request.source_asset().unwrap().as_str(), asset_id);
                assert_eq!(request.quality_steps(), Some(25));
                assert!(!request.audio_only());
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_audio_only_results_use_audio_names() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mov");
        tokio::fs::write(&input, b"mov").await.unwrap();
        let out = dir.path().join("example2");

        let api = Arc::new(
            FakeSfxClient::new().with_output_paths(vec!["https://cdn/a.wav".to_string()]),
        );
        let fetcher = Arc::new(
            FakeArtifactFetcher::new().with_artifact("https://cdn/a.wav", b"wav".to_vec()),
        );
        let handler = ShortVideoSfxHandler::new(
            api.clone(),
            fetcher,
            Arc::new(FileArtifactStorage::new(&out)),
        );

        let mut cmd = command(&input);
        cmd.audio_only = true;
        handler.handle(cmd).await.unwrap();

        assert!(out.join("result_audio_1.wav").exists());
        assert_eq!(
            api.calls()[0],
            FakeSfxCall::CreateUploadTarget {
                content_type: "video/quicktime".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_input_is_fatal_before_network() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("example2");
        let api = Arc::new(FakeSfxClient::new());
        let handler = ShortVideoSfxHandler::new(
            api.clone(),
            Arc::new(FakeArtifactFetcher::new()),
            Arc::new(FileArtifactStorage::new(&out)),
        );

        let result = handler.handle(command(&dir.path().join("nope.mp4"))).await;

        assert!(matches!(result, Err(ApplicationError::InputNotFound(_))));
        assert!(api.calls().is_empty());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_rejected_generation_yields_no_artifacts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        tokio::fs::write(&input, b"video").await.unwrap();

        let api = Arc::new(
            FakeSfxClient::new()
                .with_output_paths(vec!["https://cdn/result.mp4".to_string()])
                .with_generation_status(200),
        );
        let fetcher = Arc::new(FakeArtifactFetcher::new());
        let handler = ShortVideoSfxHandler::new(
            api,
            fetcher.clone(),
            Arc::new(FileArtifactStorage::new(dir.path().join("out"))),
        );

        let response = handler.handle(command(&input)).await.unwrap();

        // 200 不是该端点的成功状态
        assert!(!response.accepted);
        assert!(response.report.artifacts.is_empty());
        assert!(fetcher.requested().is_empty());
    }
}
