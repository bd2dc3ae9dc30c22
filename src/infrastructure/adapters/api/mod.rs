//! SFX API Adapter - 音效生成服务客户端实现

mod fake_sfx_client;
mod http_sfx_client;

pub use fake_sfx_client::{FakeSfxCall, FakeSfxClient};
pub use http_sfx_client::*;
