//! Artifact Downloader - 结果文件下载
//!
//! 按输入顺序逐个下载；单个失败只记录，不影响其余条目，
//! 第 N 个 URL 始终对应第 N 个文件名

use std::sync::Arc;

use crate::application::ports::{ArtifactFetcherPort, ArtifactStoragePort, FetchOutcome};
use crate::domain::scene::SceneSegment;
use crate::domain::{DownloadedArtifact, NamePattern};

/// 单个条目的下载失败
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadFailure {
    pub index: usize,
    pub url: String,
    pub reason: String,
}

/// 批量下载报告
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadReport {
    pub artifacts: Vec<DownloadedArtifact>,
    pub failures: Vec<DownloadFailure>,
}

impl DownloadReport {
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[derive(Clone)]
pub struct ArtifactDownloader {
    fetcher: Arc<dyn ArtifactFetcherPort>,
    storage: Arc<dyn ArtifactStoragePort>,
}

impl ArtifactDownloader {
    pub fn new(
        fetcher: Arc<dyn ArtifactFetcherPort>,
        storage: Arc<dyn ArtifactStoragePort>,
    ) -> Self {
        Self { fetcher, storage }
    }

    /// 下载全部 URL
    pub async fn download_all(&self, urls: &[String], pattern: &NamePattern) -> DownloadReport {
        let mut report = DownloadReport::default();

        for (offset, url) in urls.iter().enumerate() {
            let index = offset + 1;
            match self.download_one(index, url, pattern, None).await {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(failure) => report.failures.push(failure),
            }
        }

        tracing::info!(
            requested = urls.len(),
            downloaded = report.artifacts.len(),
            failed = report.failures.len(),
            "Downloads finished"
        );
        report
    }

    /// 下载单个 URL 到 `pattern` 的第 `index` 个文件名
    pub async fn download_one(
        &self,
        index: usize,
        url: &str,
        pattern: &NamePattern,
        segment: Option<&SceneSegment>,
    ) -> Result<DownloadedArtifact, DownloadFailure> {
        tracing::info!(index, url = %url, "Downloading artifact");

        let failure = |reason: String| {
            tracing::warn!(index, url = %url, reason = %reason, "Failed to download artifact");
            DownloadFailure {
                index,
                url: url.to_string(),
                reason,
            }
        };

        let bytes = match self.fetcher.fetch(url).await {
            Ok(FetchOutcome::Fetched(bytes)) => bytes,
            Ok(FetchOutcome::Failed { status }) => return Err(failure(format!("HTTP {}", status))),
            Err(e) => return Err(failure(e.to_string())),
        };

        let name = pattern.file_name(index);
        let local_path = self
            .storage
            .save(&name, &bytes)
            .await
            .map_err(|e| failure(e.to_string()))?;

        tracing::info!(
            index,
            path = %local_path.display(),
            size = bytes.len(),
            "Artifact saved"
        );

        Ok(DownloadedArtifact {
            index,
            local_path,
            source_url: url.to_string(),
            source_segment: segment.cloned(),
        })
    }
}
