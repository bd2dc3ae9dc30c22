//! Long Video SFX Handler - 长视频分场景生成音效
//!
//! 上传 → 分场景生成 → 每场景下载一个音频 → 拼接 → 替换原视频音轨

use std::sync::Arc;

use crate::application::commands::sfx_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactFetcherPort, ArtifactStoragePort, MediaToolPort, SceneOutcome, SfxApiPort,
};
use crate::application::services::{ArtifactDownloader, AssetUploader, SceneAudioAssembler};
use crate::domain::generation::{GenerationError, LongMediaRequest, MediaContentType};

/// LongVideoSfx Handler
pub struct LongVideoSfxHandler {
    api: Arc<dyn SfxApiPort>,
    media: Arc<dyn MediaToolPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    uploader: AssetUploader,
    assembler: SceneAudioAssembler,
}

impl LongVideoSfxHandler {
    pub fn new(
        api: Arc<dyn SfxApiPort>,
        fetcher: Arc<dyn ArtifactFetcherPort>,
        media: Arc<dyn MediaToolPort>,
        storage: Arc<dyn ArtifactStoragePort>,
    ) -> Self {
        let downloader = ArtifactDownloader::new(fetcher, storage.clone());
        Self {
            uploader: AssetUploader::new(api.clone()),
            assembler: SceneAudioAssembler::new(downloader, media.clone(), storage.clone()),
            api,
            media,
            storage,
        }
    }

    pub async fn handle(
        &self,
        cmd: LongVideoSfxCommand,
    ) -> Result<LongVideoSfxResponse, ApplicationError> {
        // 本地前置条件
        AssetUploader::ensure_input(&cmd.input).await?;
        if cmd.sample_count == 0 {
            return Err(GenerationError::InvalidSampleCount.into());
        }
        let content_type = match cmd.content_type {
            Some(mime) => MediaContentType::new(mime)?,
            None => MediaContentType::from_path(&cmd.input),
        };
        self.media.check_available().await?;

        self.storage.prepare().await?;
        let output_dir = self.storage.output_dir().to_path_buf();

        let asset = self.uploader.upload(&cmd.input, &content_type).await?;
        let request = LongMediaRequest::new(asset.asset_id, cmd.sample_count)?;

        tracing::info!(
            samples_per_scene = request.sample_count(),
            "Generating SFX with scene detection, this may take a few minutes"
        );

        let segments = match self.api.request_long_media(&request).await? {
            SceneOutcome::Ready { segments } => segments,
            SceneOutcome::Rejected { status, body } => {
                tracing::error!(status, body = %body, "Scene generation request rejected");
                return Ok(LongVideoSfxResponse::empty(false, output_dir));
            }
        };

        tracing::info!(scenes = segments.len(), "Generated SFX for scenes");

        let mut response = LongVideoSfxResponse::empty(true, output_dir);
        response.scene_count = segments.len();
        if segments.is_empty() {
            tracing::warn!("Service returned no scenes");
            return Ok(response);
        }

        let collection = self.assembler.collect(&segments).await;
        response.skipped_scenes = collection.plan.skipped_indices();
        response.skipped_seconds = collection.plan.skipped_seconds();
        response.scene_audio = collection.report;

        if response.scene_audio.is_empty() {
            tracing::warn!("No audio files downloaded");
            return Ok(response);
        }

        let Some(audio) = self
            .assembler
            .concatenate(&response.scene_audio.artifacts)
            .await?
        else {
            return Ok(response);
        };
        response.concatenated_audio = Some(audio.clone());

        let final_video = self.assembler.remux(&cmd.input, &audio).await?;

        match self.media.probe_duration(&final_video).await {
            Ok(seconds) => {
                tracing::info!(duration = seconds, "Final video duration");
                response.final_duration_seconds = Some(seconds);
            }
            Err(e) => tracing::warn!(error = %e, "Could not probe final video duration"),
        }
        response.final_video = Some(final_video);

        Ok(response)
    }
}
