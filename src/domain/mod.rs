//! Domain Layer - 领域层
//!
//! - text_segmenter: 文言文分块算法（切分 + 自底向上合并）
//! - Document Context: 原文块与译文的配对

pub mod document;

mod text_segmenter;

pub use text_segmenter::{
    is_paragraph, merge_chunks, segment_document, segment_text, segment_text_default,
    split_paragraph, ChunkConfig, SegmentError, SegmentStats, SegmentedDocument,
    DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE, DEFAULT_PARAGRAPH_SIZE, DEFAULT_TERMINATORS,
};
