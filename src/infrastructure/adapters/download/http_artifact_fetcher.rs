//! HTTP Artifact Fetcher - 按 URL 下载生成结果
//!
//! 实现 ArtifactFetcherPort trait

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::application::ports::{ArtifactFetcherPort, FetchError, FetchOutcome};

pub struct HttpArtifactFetcher {
    client: Client,
}

impl HttpArtifactFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ArtifactFetcherPort for HttpArtifactFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        tracing::debug!(url = %url, "Fetching artifact");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(FetchOutcome::Failed {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::NetworkError(format!("Failed to read body: {}", e))
            }
        })?;

        Ok(FetchOutcome::Fetched(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::test_support::spawn_server;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::Router;

    #[tokio::test]
    async fn test_fetch_ok_and_missing() {
        let router = Router::new()
            .route("/sfx_1.wav", get(|| async { b"RIFF....WAVE".to_vec() }))
            .route("/gone.wav", get(|| async { AxumStatus::NOT_FOUND }))
            .route("/empty.wav", get(|| async { AxumStatus::NO_CONTENT }));
        let base = spawn_server(router).await;
        let fetcher = HttpArtifactFetcher::new(10).unwrap();

        let outcome = fetcher.fetch(&format!("{}/sfx_1.wav", base)).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Fetched(b"RIFF....WAVE".to_vec()));

        let outcome = fetcher.fetch(&format!("{}/gone.wav", base)).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Failed { status: 404 });

        // 只有 200 算下载成功
        let outcome = fetcher.fetch(&format!("{}/empty.wav", base)).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Failed { status: 204 });
    }
}
