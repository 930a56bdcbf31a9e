//! 应用层错误定义
//!
//! 统一的命令错误类型

use std::path::PathBuf;
use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {}", .path.display())]
    NotFound {
        resource_type: &'static str,
        path: PathBuf,
    },

    /// 输入无法解码或不合法
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// IO 错误
    #[error("IO error: {0}")]
    IoError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            resource_type,
            path: path.into(),
        }
    }

    /// 创建输入错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<crate::application::ports::StoreError> for ApplicationError {
    fn from(err: crate::application::ports::StoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<crate::domain::SegmentError> for ApplicationError {
    fn from(err: crate::domain::SegmentError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
