//! JSON File Store - 文件系统译文存储实现
//!
//! 实现 TranslationStorePort trait，每个文档写出一个 `{output_name}.json`

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{StoreError, TranslationStorePort};
use crate::domain::document::{DocumentStats, TranslatedDocument};

/// 写出的记录
#[derive(Debug, Serialize)]
struct StoredDocument<'a> {
    document: &'a TranslatedDocument,
    stats: DocumentStats,
}

/// 文件系统译文存储
pub struct JsonFileStore {
    /// 输出目录
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取输出目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 获取文档的输出路径
    pub fn output_path(&self, document: &TranslatedDocument) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", document.output_name().as_str()))
    }
}

#[async_trait]
impl TranslationStorePort for JsonFileStore {
    async fn save(&self, document: &TranslatedDocument) -> Result<PathBuf, StoreError> {
        let record = StoredDocument {
            document,
            stats: document.stats(),
        };
        let data = serde_json::to_vec_pretty(&record)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        let path = self.output_path(document);
        fs::write(&path, &data)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        tracing::debug!(
            document_id = %document.id(),
            path = %path.display(),
            size = data.len(),
            "Saved translated document"
        );

        Ok(path)
    }
}
