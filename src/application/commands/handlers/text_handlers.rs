//! Text-to-SFX Handler - 纯文本描述生成音效

use std::sync::Arc;

use crate::application::commands::sfx_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactFetcherPort, ArtifactStoragePort, GenerationOutcome, SfxApiPort,
};
use crate::application::services::{ArtifactDownloader, DownloadReport};
use crate::domain::generation::GenerationRequest;
use crate::domain::NamePattern;

/// TextToSfx Handler
pub struct TextToSfxHandler {
    api: Arc<dyn SfxApiPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    downloader: ArtifactDownloader,
}

impl TextToSfxHandler {
    pub fn new(
        api: Arc<dyn SfxApiPort>,
        fetcher: Arc<dyn ArtifactFetcherPort>,
        storage: Arc<dyn ArtifactStoragePort>,
    ) -> Self {
        Self {
            api,
            downloader: ArtifactDownloader::new(fetcher, storage.clone()),
            storage,
        }
    }

    pub async fn handle(
        &self,
        cmd: TextToSfxCommand,
    ) -> Result<SfxDownloadResponse, ApplicationError> {
        let request = GenerationRequest::builder()
            .prompt(cmd.prompt)
            .duration_seconds(cmd.duration_seconds)
            .sample_count(cmd.sample_count)
            .model_version(cmd.model_version)
            .creativity(cmd.creativity)
            .audio_only(cmd.audio_only)
            .build()?;

        self.storage.prepare().await?;
        let output_dir = self.storage.output_dir().to_path_buf();

        tracing::info!(
            prompt = request.prompt().unwrap_or_default(),
            duration = request.duration_seconds(),
            samples = request.sample_count(),
            creativity = %request.creativity(),
            "Generating SFX from text description"
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

        tracing::info!(count = output_paths.len(), "Generated audio variations");

        let report = self
            .downloader
            .download_all(&output_paths, &NamePattern::new(NamePattern::TEXT_VARIATION))
            .await;

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
    use tempfile::tempdir;

    fn storm_command() -> TextToSfxCommand {
        TextToSfxCommand {
            prompt: "thunder and lightning storm with heavy rain".to_string(),
            duration_seconds: 5.0,
            sample_count: 2,
            model_version: "1.5".to_string(),
            creativity: 7,
            audio_only: true,
        }
    }

    #[tokio::test]
    async fn test_text_scenario_downloads_each_variation() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("example1");

        let api = Arc::new(FakeSfxClient::new().with_output_paths(vec![
            "https://cdn/storm_1.wav".to_string(),
            "https://cdn/storm_2.wav".to_string(),
        ]));
        let fetcher = Arc::new(
            FakeArtifactFetcher::new()
                .with_artifact("https://cdn/storm_1.wav", b"RIFF-one".to_vec())
                .with_artifact("https://cdn/storm_2.wav", b"RIFF-two".to_vec()),
        );
        let storage = Arc::new(FileArtifactStorage::new(&out));
        let handler = TextToSfxHandler::new(api.clone(), fetcher, storage);

        let response = handler.handle(storm_command()).await.unwrap();

        assert!(response.accepted);
        assert_eq!(response.report.artifacts.len(), 2);
        assert_eq!(
            std::fs::read(out.join("sfx_variation_1.wav")).unwrap(),
            b"RIFF-one"
        );
        assert_eq!(
            std::fs::read(out.join("sfx_variation_2.wav")).unwrap(),
            b"RIFF-two"
        );

        match &api.calls()[0] {
            FakeSfxCall::Generation(request) => {
                assert_eq!(request.prompt(), Some("thunder and lightning storm with heavy rain"));
                assert_eq!(request.sample_count(), 2);
                assert!(request.audio_only());
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_generation_is_not_fatal() {
        let dir = tempdir().unwrap();
        let api = Arc::new(
            FakeSfxClient::new()
                .with_output_paths(vec!["https://cdn/1.wav".to_string()])
                .with_generation_status(400),
        );
        let fetcher = Arc::new(FakeArtifactFetcher::new());
        let storage = Arc::new(FileArtifactStorage::new(dir.path()));
        let handler = TextToSfxHandler::new(api, fetcher.clone(), storage);

        let response = handler.handle(storm_command()).await.unwrap();

        assert!(!response.accepted);
        assert!(response.report.artifacts.is_empty());
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_output_dir_created_before_request() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("example1");
        let api = Arc::new(FakeSfxClient::new().with_generation_status(503));
        let handler = TextToSfxHandler::new(
            api,
            Arc::new(FakeArtifactFetcher::new()),
            Arc::new(FileArtifactStorage::new(&out)),
        );

        handler.handle(storm_command()).await.unwrap();
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_invalid_parameters_fail_before_io() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("example1");
        let api = Arc::new(FakeSfxClient::new());
        let handler = TextToSfxHandler::new(
            api.clone(),
            Arc::new(FakeArtifactFetcher::new()),
            Arc::new(FileArtifactStorage::new(&out)),
        );

        let mut cmd = storm_command();
        cmd.creativity = 0;
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(api.calls().is_empty());
        assert!(!out.exists());
    }
}
