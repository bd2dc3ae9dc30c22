//! Command Handlers 实现
//!
//! 每个流程一个处理器

mod long_video_handlers;
mod short_video_handlers;
mod text_handlers;

pub use long_video_handlers::*;
pub use short_video_handlers::*;
pub use text_handlers::*;
