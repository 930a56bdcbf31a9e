//! Document Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 输出名后缀
const OUTPUT_SUFFIX: &str = "_translated";

/// 文档唯一标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 输出文件名（不含扩展名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputName(String);

impl OutputName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("输出名不能为空");
        }
        if name.contains(['/', '\\']) {
            return Err("输出名不能包含路径分隔符");
        }
        if name.chars().count() > 200 {
            return Err("输出名长度不能超过200字符");
        }
        Ok(Self(name))
    }

    /// 由源文件名推导默认输出名：`{stem}_translated`
    pub fn for_source(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("document");
        Self(format!("{}{}", stem, OUTPUT_SUFFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutputName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 源文本路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePath(PathBuf);

impl From<&Path> for SourcePath {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl From<&str> for SourcePath {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}
