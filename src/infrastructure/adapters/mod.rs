//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod api;
pub mod download;
pub mod media;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::*;
pub use download::*;
pub use media::*;
pub use storage::*;
