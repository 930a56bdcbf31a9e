//! 文本分块器
//!
//! 将有标点的文言文切分为长度受限的翻译单元（chunk）：
//! 1. 按行分割，判断每行是否为"段落"
//! 2. 超长段落在中点附近的句末标点处切分（显式工作栈，不递归）
//! 3. 自底向上合并相邻短块，合并后不超过最大长度
//!
//! 所有长度均按字符（Unicode 标量）计算，而不是字节。

use std::collections::VecDeque;

use thiserror::Error;

/// 默认最小块长度：任何切分都不会产生短于此值的一侧
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 128;

/// 默认段落长度：超过此长度的段落会被切分
pub const DEFAULT_PARAGRAPH_SIZE: usize = 384;

/// 默认最大块长度：相邻块合并后不超过此值
pub const DEFAULT_MAX_CHUNK_SIZE: usize = DEFAULT_PARAGRAPH_SIZE;

/// 默认句末标点
pub const DEFAULT_TERMINATORS: &[char] = &['。', '!', '?'];

/// 合并相邻块时使用的分隔符
const MERGE_SEPARATOR: char = '\n';

/// 分块错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Invalid chunk configuration: {0}")]
    InvalidConfig(String),
}

/// 分块配置（不可变，按调用传入）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// 最小块长度，同时也是段落的最小长度
    pub min_chunk_size: usize,
    /// 段落长度上限（控制切分）
    pub paragraph_size: usize,
    /// 块长度上限（控制合并）
    pub max_chunk_size: usize,
    /// 句末标点集合
    pub terminators: Vec<char>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            paragraph_size: DEFAULT_PARAGRAPH_SIZE,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            terminators: DEFAULT_TERMINATORS.to_vec(),
        }
    }
}

impl ChunkConfig {
    /// 检查配置是否自洽
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.min_chunk_size == 0 {
            return Err(SegmentError::InvalidConfig(
                "min_chunk_size must be at least 1".to_string(),
            ));
        }
        if self.paragraph_size < self.min_chunk_size {
            return Err(SegmentError::InvalidConfig(format!(
                "paragraph_size ({}) must not be smaller than min_chunk_size ({})",
                self.paragraph_size, self.min_chunk_size
            )));
        }
        if self.max_chunk_size == 0 {
            return Err(SegmentError::InvalidConfig(
                "max_chunk_size must be at least 1".to_string(),
            ));
        }
        if self.terminators.is_empty() {
            return Err(SegmentError::InvalidConfig(
                "at least one sentence terminator is required".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }
}

/// 分块统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// 输入行数
    pub lines: usize,
    /// 判定为段落的行数
    pub paragraphs: usize,
    /// 第一遍结束后的块数
    pub initial_chunks: usize,
    /// 找不到合法切分点而保留原样的超长块数
    pub oversized: usize,
}

/// 分块结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedDocument {
    pub chunks: Vec<String>,
    pub stats: SegmentStats,
}

/// 判断一行是否为段落
///
/// 条件：长度不小于 `min_chunk_size`，且句末标点出现次数（逐字符累计）不少于 2。
pub fn is_paragraph(line: &str, config: &ChunkConfig) -> bool {
    if line.chars().count() < config.min_chunk_size {
        return false;
    }
    let terminator_count = line.chars().filter(|&ch| config.is_terminator(ch)).count();
    terminator_count >= 2
}

/// 在中点附近寻找切分位置，返回字符下标（切在该下标之前）
///
/// 先从中点向左扫描，找不到再向右；两侧长度都必须不小于 `min_chunk_size`。
fn find_split_point(chars: &[char], config: &ChunkConfig) -> Option<usize> {
    let total = chars.len();
    let mid = total / 2;
    let accepts = |i: usize| {
        config.is_terminator(chars[i])
            && i + 1 >= config.min_chunk_size
            && total - (i + 1) >= config.min_chunk_size
    };

    (0..=mid)
        .rev()
        .find(|&i| accepts(i))
        .or_else(|| (mid..total).find(|&i| accepts(i)))
        .map(|i| i + 1)
}

/// 切分段落，结果依次追加到 `out`，返回无法切分的超长块数
fn split_paragraph_into<'a>(
    paragraph: &'a str,
    config: &ChunkConfig,
    out: &mut Vec<&'a str>,
) -> usize {
    let mut oversized = 0;
    let mut pending: Vec<&'a str> = vec![paragraph];

    while let Some(span) = pending.pop() {
        if span.chars().count() <= config.paragraph_size {
            out.push(span);
            continue;
        }

        let indexed: Vec<(usize, char)> = span.char_indices().collect();
        let chars: Vec<char> = indexed.iter().map(|&(_, ch)| ch).collect();
        match find_split_point(&chars, config) {
            Some(at) => {
                let byte_at = indexed[at].0;
                // 右半先入栈，保证左半先出栈
                pending.push(&span[byte_at..]);
                pending.push(&span[..byte_at]);
            }
            None => {
                tracing::warn!(
                    chars = chars.len(),
                    paragraph_size = config.paragraph_size,
                    min_chunk_size = config.min_chunk_size,
                    "No valid split point, keeping oversized chunk"
                );
                oversized += 1;
                out.push(span);
            }
        }
    }

    oversized
}

/// 切分单个段落
///
/// 长度不超过 `paragraph_size` 时原样返回；否则在句末标点处反复二分，
/// 直到每块都不超过上限或无法再切。切分不增删任何字符。
pub fn split_paragraph(
    paragraph: &str,
    config: &ChunkConfig,
) -> Result<Vec<String>, SegmentError> {
    config.validate()?;
    let mut pieces = Vec::new();
    split_paragraph_into(paragraph, config, &mut pieces);
    Ok(pieces.into_iter().map(str::to_string).collect())
}

/// 自底向上合并相邻块
///
/// 从文末向前处理：当前块与结果首块的长度之和不超过 `max_chunk_size` 时，
/// 以换行连接两者，否则当前块成为新的首块。
pub fn merge_chunks<I, S>(chunks: I, max_chunk_size: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    I::IntoIter: DoubleEndedIterator,
    S: AsRef<str>,
{
    // (内容, 字符数)
    let mut merged: VecDeque<(String, usize)> = VecDeque::new();

    for chunk in chunks.into_iter().rev() {
        let chunk = chunk.as_ref();
        let len = chunk.chars().count();

        let fits = merged
            .front()
            .map_or(false, |&(_, front_len)| len + front_len <= max_chunk_size);

        if !fits {
            merged.push_front((chunk.to_string(), len));
        } else if let Some((front, front_len)) = merged.front_mut() {
            let mut joined = String::with_capacity(chunk.len() + 1 + front.len());
            joined.push_str(chunk);
            joined.push(MERGE_SEPARATOR);
            joined.push_str(front);
            *front = joined;
            *front_len += len + 1;
        }
    }

    merged.into_iter().map(|(text, _)| text).collect()
}

/// 对整篇文本分块并返回统计信息
///
/// 配置不合法（如 `min_chunk_size` 为 0）时返回 [`SegmentError::InvalidConfig`]。
pub fn segment_document(
    text: &str,
    config: &ChunkConfig,
) -> Result<SegmentedDocument, SegmentError> {
    config.validate()?;
    Ok(segment_validated(text, config))
}

/// 配置已校验过的分块实现
fn segment_validated(text: &str, config: &ChunkConfig) -> SegmentedDocument {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.iter().all(|line| line.trim().is_empty()) {
        return SegmentedDocument::default();
    }

    let mut stats = SegmentStats {
        lines: lines.len(),
        ..Default::default()
    };

    // 第一遍：切分超长段落
    let mut initial: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        if is_paragraph(line, config) {
            stats.paragraphs += 1;
            stats.oversized += split_paragraph_into(line, config, &mut initial);
        } else {
            initial.push(line);
        }
    }
    stats.initial_chunks = initial.len();

    // 第二遍：自底向上合并
    let chunks = merge_chunks(initial, config.max_chunk_size);

    tracing::debug!(
        lines = stats.lines,
        paragraphs = stats.paragraphs,
        initial_chunks = stats.initial_chunks,
        chunks = chunks.len(),
        oversized = stats.oversized,
        "Document segmented"
    );

    SegmentedDocument { chunks, stats }
}

/// 对整篇文本分块
pub fn segment_text(text: &str, config: &ChunkConfig) -> Result<Vec<String>, SegmentError> {
    segment_document(text, config).map(|doc| doc.chunks)
}

/// 使用默认配置分块（便捷方法）
pub fn segment_text_default(text: &str) -> Vec<String> {
    segment_validated(text, &ChunkConfig::default()).chunks
}
