//! Fake Media Tool - 不启动进程的媒体工具
//!
//! 时长按登记表计算：拼接结果为各段之和，合流结果取较短的一路

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::application::ports::{MediaToolError, MediaToolPort};
use crate::domain::scene::{shorter_wins, ConcatManifest};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct FakeMediaTool {
    available: bool,
    concat_failure: Option<String>,
    remux_failure: Option<String>,
    durations: Mutex<HashMap<PathBuf, f64>>,
    concat_calls: Mutex<Vec<Vec<PathBuf>>>,
    remux_calls: Mutex<Vec<(PathBuf, PathBuf, PathBuf)>>,
}

impl Default for FakeMediaTool {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeMediaTool {
    pub fn new() -> Self {
        Self {
            available: true,
            concat_failure: None,
            remux_failure: None,
            durations: Mutex::new(HashMap::new()),
            concat_calls: Mutex::new(Vec::new()),
            remux_calls: Mutex::new(Vec::new()),
        }
    }

    /// 登记某个文件的时长
    pub fn with_duration(self, path: impl AsRef<Path>, seconds: f64) -> Self {
        lock(&self.durations).insert(path.as_ref().to_path_buf(), seconds);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// 拼接以给定 stderr 失败
    pub fn with_concat_failure(mut self, stderr: &str) -> Self {
        self.concat_failure = Some(stderr.to_string());
        self
    }

    /// 合流以给定 stderr 失败
    pub fn with_remux_failure(mut self, stderr: &str) -> Self {
        self.remux_failure = Some(stderr.to_string());
        self
    }

    /// 每次拼接读到的清单条目
    pub fn concat_calls(&self) -> Vec<Vec<PathBuf>> {
        lock(&self.concat_calls).clone()
    }

    /// 每次合流的 (video, audio, output)
    pub fn remux_calls(&self) -> Vec<(PathBuf, PathBuf, PathBuf)> {
        lock(&self.remux_calls).clone()
    }

    /// 先按原路径查，再按规范化路径查
    fn duration_of(&self, path: &Path) -> Option<f64> {
        let durations = lock(&self.durations);
        if let Some(seconds) = durations.get(path) {
            return Some(*seconds);
        }
        let canonical = std::fs::canonicalize(path).ok()?;
        durations
            .iter()
            .find(|(known, _)| {
                std::fs::canonicalize(known).ok().as_deref() == Some(canonical.as_path())
            })
            .map(|(_, seconds)| *seconds)
    }

    fn set_duration(&self, path: &Path, seconds: f64) {
        lock(&self.durations).insert(path.to_path_buf(), seconds);
    }
}

#[async_trait]
impl MediaToolPort for FakeMediaTool {
    async fn check_available(&self) -> Result<(), MediaToolError> {
        if self.available {
            Ok(())
        } else {
            Err(MediaToolError::NotAvailable("fake ffmpeg disabled".to_string()))
        }
    }

    async fn concat_audio_list(
        &self,
        manifest: &Path,
        output: &Path,
    ) -> Result<(), MediaToolError> {
        let text = tokio::fs::read_to_string(manifest)
            .await
            .map_err(|e| MediaToolError::InvalidOutput(format!("{}: {}", manifest.display(), e)))?;
        let entries = ConcatManifest::parse(&text).entries().to_vec();
        lock(&self.concat_calls).push(entries.clone());

        if let Some(stderr) = &self.concat_failure {
            return Err(MediaToolError::Failed {
                operation: "concat",
                code: Some(1),
                stderr: stderr.clone(),
            });
        }

        let mut joined = Vec::new();
        let mut total = Some(0.0);
        for entry in &entries {
            if let Ok(data) = tokio::fs::read(entry).await {
                joined.extend_from_slice(&data);
            }
            total = match (total, self.duration_of(entry)) {
                (Some(sum), Some(seconds)) => Some(sum + seconds),
                _ => None,
            };
        }

        tokio::fs::write(output, &joined)
            .await
            .map_err(|e| MediaToolError::InvalidOutput(format!("{}: {}", output.display(), e)))?;
        if let Some(seconds) = total {
            self.set_duration(output, seconds);
        }
        Ok(())
    }

    async fn remux_video_audio(
        &self,
        video: &Path,
        audio: &Path,
        output: &Path,
    ) -> Result<(), MediaToolError> {
        lock(&self.remux_calls).push((
            video.to_path_buf(),
            audio.to_path_buf(),
            output.to_path_buf(),
        ));

        if let Some(stderr) = &self.remux_failure {
            return Err(MediaToolError::Failed {
                operation: "remux",
                code: Some(1),
                stderr: stderr.clone(),
            });
        }

        tokio::fs::write(output, b"")
            .await
            .map_err(|e| MediaToolError::InvalidOutput(format!("{}: {}", output.display(), e)))?;
        if let (Some(v), Some(a)) = (self.duration_of(video), self.duration_of(audio)) {
            self.set_duration(output, shorter_wins(v, a));
        }
        Ok(())
    }

    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaToolError> {
        self.duration_of(path).ok_or_else(|| {
            MediaToolError::InvalidOutput(format!("no duration for {}", path.display()))
        })
    }
}
