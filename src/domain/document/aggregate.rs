//! Document Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentId, OutputName, SourcePath, TranslatedChunk};

/// 译文文档聚合根
///
/// 不变量:
/// - 块顺序与原文一致，index 从 0 连续递增
/// - 已记录的块不可修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedDocument {
    id: DocumentId,
    source: SourcePath,
    output_name: OutputName,
    chunks: Vec<TranslatedChunk>,
    created_at: DateTime<Utc>,
}

/// 文档统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentStats {
    pub chunk_count: usize,
    pub translated_count: usize,
    pub failed_count: usize,
    pub original_chars: usize,
    pub translated_chars: usize,
    /// 原文平均块长（保留两位小数）
    pub avg_original_chars: f64,
    /// 译文平均块长，只统计翻译成功的块
    pub avg_translated_chars: f64,
}

impl TranslatedDocument {
    pub fn new(source: SourcePath, output_name: OutputName) -> Self {
        Self {
            id: DocumentId::new(),
            source,
            output_name,
            chunks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// 按顺序追加一个块
    pub fn record(&mut self, original: String, translation: Option<String>) {
        let index = self.chunks.len();
        self.chunks
            .push(TranslatedChunk::new(index, original, translation));
    }

    // Getters
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn output_name(&self) -> &OutputName {
        &self.output_name
    }

    pub fn chunks(&self) -> &[TranslatedChunk] {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// 计算统计信息
    pub fn stats(&self) -> DocumentStats {
        let chunk_count = self.chunks.len();
        let translated_count = self.chunks.iter().filter(|c| c.is_translated()).count();
        let original_chars: usize = self.chunks.iter().map(|c| c.original_chars()).sum();
        let translated_chars: usize = self.chunks.iter().map(|c| c.translated_chars()).sum();

        DocumentStats {
            chunk_count,
            translated_count,
            failed_count: chunk_count - translated_count,
            original_chars,
            translated_chars,
            avg_original_chars: average(original_chars, chunk_count),
            avg_translated_chars: average(translated_chars, translated_count),
        }
    }
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total as f64 / count as f64 * 100.0).round() / 100.0
}
