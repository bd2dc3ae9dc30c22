//! Download Adapter - 结果文件下载

mod fake_artifact_fetcher;
mod http_artifact_fetcher;

pub use fake_artifact_fetcher::FakeArtifactFetcher;
pub use http_artifact_fetcher::HttpArtifactFetcher;
