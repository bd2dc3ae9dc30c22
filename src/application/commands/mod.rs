//! 应用层 - 命令
//!
//! 每个命令对应一个顺序执行的生成流程

mod sfx_commands;

pub mod handlers;

pub use sfx_commands::*;
