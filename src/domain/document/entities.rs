//! Document Context - Entities

use serde::{Deserialize, Serialize};

/// 原文块与译文的配对
///
/// 不变量:
/// - index 在文档内唯一且有序
/// - translation 为 None 表示该块翻译失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedChunk {
    index: usize,
    original: String,
    translation: Option<String>,
}

impl TranslatedChunk {
    pub fn new(index: usize, original: String, translation: Option<String>) -> Self {
        Self {
            index,
            original,
            translation,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn is_translated(&self) -> bool {
        self.translation.is_some()
    }

    pub fn original_chars(&self) -> usize {
        self.original.chars().count()
    }

    pub fn translated_chars(&self) -> usize {
        self.translation
            .as_deref()
            .map(|t| t.chars().count())
            .unwrap_or(0)
    }
}
