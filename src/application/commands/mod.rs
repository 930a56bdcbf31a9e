//! 应用层 - 命令
//!
//! 分块、单文件翻译、目录翻译

mod translate_commands;

pub mod handlers;

pub use translate_commands::*;
