//! Text Segmenter Port - 文本分块抽象
//!
//! 定义文本分块的抽象接口，具体实现在 infrastructure/adapters 层

pub use crate::domain::{ChunkConfig, SegmentError, SegmentStats};

/// 分块后的文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedText {
    pub index: usize,
    pub content: String,
}

impl SegmentedText {
    /// 字符数
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// 分块结果：按原文顺序的片段及分块统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentOutcome {
    pub segments: Vec<SegmentedText>,
    /// 含无法切分而保留的超长块数（`stats.oversized`）
    pub stats: SegmentStats,
}

/// Text Segmenter Port
///
/// 文本分块器接口；配置按调用传入，实现不得持有可变状态
pub trait TextSegmenterPort: Send + Sync {
    /// 将文本分块，按原文顺序返回；配置不合法时返回错误
    fn segment(&self, text: &str, config: &ChunkConfig) -> Result<SegmentOutcome, SegmentError>;
}
