//! Translate Commands - 分块与翻译命令

use std::path::PathBuf;

/// 对单个文件分块（不翻译）
#[derive(Debug, Clone)]
pub struct SegmentFile {
    pub path: PathBuf,
}

/// 翻译单个文件
#[derive(Debug, Clone)]
pub struct TranslateFile {
    pub path: PathBuf,
    /// 输出名，None 时使用 `{stem}_translated`
    pub output_name: Option<String>,
}

/// 翻译目录下所有 `.txt` 文件
#[derive(Debug, Clone)]
pub struct TranslateDirectory {
    pub dir: PathBuf,
}
