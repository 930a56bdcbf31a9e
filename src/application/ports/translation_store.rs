//! Translation Store Port - 出站端口
//!
//! 定义译文文档持久化的抽象接口

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::document::TranslatedDocument;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Translation Store Port
#[async_trait]
pub trait TranslationStorePort: Send + Sync {
    /// 保存译文文档，返回写入位置
    async fn save(&self, document: &TranslatedDocument) -> Result<PathBuf, StoreError>;
}
