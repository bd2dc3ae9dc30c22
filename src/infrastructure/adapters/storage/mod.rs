//! Storage Adapter - 本地输出目录

mod file_storage;

pub use file_storage::FileArtifactStorage;
