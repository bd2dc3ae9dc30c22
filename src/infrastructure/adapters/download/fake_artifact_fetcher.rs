//! Fake Artifact Fetcher - 内存中的固定 URL 表
//!
//! 未登记的 URL 一律返回 404，也可以为某个 URL 登记传输错误

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{ArtifactFetcherPort, FetchError, FetchOutcome};

#[derive(Default)]
pub struct FakeArtifactFetcher {
    responses: HashMap<String, Result<FetchOutcome, FetchError>>,
    requested: Mutex<Vec<String>>,
}

impl FakeArtifactFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(mut self, url: impl Into<String>, data: Vec<u8>) -> Self {
        self.responses
            .insert(url.into(), Ok(FetchOutcome::Fetched(data)));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), Ok(FetchOutcome::Failed { status }));
        self
    }

    pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.responses.insert(url.into(), Err(error));
        self
    }

    /// 按顺序返回请求过的 URL
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ArtifactFetcherPort for FakeArtifactFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());

        self.responses
            .get(url)
            .cloned()
            .unwrap_or(Ok(FetchOutcome::Failed { status: 404 }))
    }
}
