//! 命令行前端：参数解析与交互式目录输入

pub mod args;
pub mod prompt;

pub use args::{Cli, Commands};
