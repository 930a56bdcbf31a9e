//! Punctuation Segmenter - 基于句末标点的分块器
//!
//! 实现 TextSegmenterPort，委托给领域层分块算法

use crate::application::ports::{
    ChunkConfig, SegmentError, SegmentOutcome, SegmentedText, TextSegmenterPort,
};
use crate::domain::segment_document;

/// 句末标点分块器（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl PunctuationSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl TextSegmenterPort for PunctuationSegmenter {
    fn segment(&self, text: &str, config: &ChunkConfig) -> Result<SegmentOutcome, SegmentError> {
        let document = segment_document(text, config)?;
        let segments = document
            .chunks
            .into_iter()
            .enumerate()
            .map(|(index, content)| SegmentedText { index, content })
            .collect();

        Ok(SegmentOutcome {
            segments,
            stats: document.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: usize, size: usize) -> ChunkConfig {
        ChunkConfig {
            min_chunk_size: min,
            paragraph_size: size,
            max_chunk_size: size,
            terminators: vec!['。'],
        }
    }

    #[test]
    fn test_segments_are_indexed_in_order() {
        let segmenter = PunctuationSegmenter::new();

        let outcome = segmenter
            .segment("一二。三四。五六。七八。", &config(3, 6))
            .unwrap();
        assert_eq!(
            outcome.segments,
            vec![
                SegmentedText {
                    index: 0,
                    content: "一二。三四。".to_string()
                },
                SegmentedText {
                    index: 1,
                    content: "五六。七八。".to_string()
                },
            ]
        );
        assert_eq!(outcome.segments[0].char_count(), 6);
        assert_eq!(outcome.stats.paragraphs, 1);
        assert_eq!(outcome.stats.oversized, 0);
    }

    #[test]
    fn test_unsplittable_span_reported_in_stats() {
        let segmenter = PunctuationSegmenter::new();

        // 两处句末标点都离边缘太近，无法切分
        let outcome = segmenter.segment("一。二三四五六七。八", &config(3, 6)).unwrap();
        assert_eq!(outcome.segments.len(), 1);
        assert_eq!(outcome.stats.oversized, 1);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let segmenter = PunctuationSegmenter::new();
        let result = segmenter.segment("一二。三四。", &config(0, 6));
        assert!(matches!(result, Err(SegmentError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_text() {
        let segmenter = PunctuationSegmenter::new();
        let outcome = segmenter.segment("", &ChunkConfig::default()).unwrap();
        assert!(outcome.segments.is_empty());
        assert_eq!(outcome.stats.lines, 0);
    }
}
