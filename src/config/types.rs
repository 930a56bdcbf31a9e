//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{
    ChunkConfig, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE, DEFAULT_PARAGRAPH_SIZE,
    DEFAULT_TERMINATORS,
};
use crate::infrastructure::adapters::DEFAULT_INSTRUCTION;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 分块配置
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// 翻译服务配置
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 分块配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// 最小块长度（字符）
    #[serde(default = "default_min_chunk_size")]
    pub min_chunk_size: usize,

    /// 段落长度上限（字符），超过则切分
    #[serde(default = "default_paragraph_size")]
    pub paragraph_size: usize,

    /// 块长度上限（字符），合并不超过此值
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// 句末标点，每个字符都是一个标点
    #[serde(default = "default_terminators")]
    pub terminators: String,
}

fn default_min_chunk_size() -> usize {
    DEFAULT_MIN_CHUNK_SIZE
}

fn default_paragraph_size() -> usize {
    DEFAULT_PARAGRAPH_SIZE
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

fn default_terminators() -> String {
    DEFAULT_TERMINATORS.iter().collect()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: default_min_chunk_size(),
            paragraph_size: default_paragraph_size(),
            max_chunk_size: default_max_chunk_size(),
            terminators: default_terminators(),
        }
    }
}

impl ChunkingConfig {
    /// 转换为领域层分块配置（标点去重，保持顺序）
    pub fn to_chunk_config(&self) -> ChunkConfig {
        let mut terminators: Vec<char> = Vec::new();
        for ch in self.terminators.chars() {
            if !terminators.contains(&ch) {
                terminators.push(ch);
            }
        }

        ChunkConfig {
            min_chunk_size: self.min_chunk_size,
            paragraph_size: self.paragraph_size,
            max_chunk_size: self.max_chunk_size,
            terminators,
        }
    }
}

/// 翻译服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    /// 翻译服务基础 URL
    #[serde(default = "default_translator_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_translator_timeout")]
    pub timeout_secs: u64,

    /// 同时进行的翻译请求数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 翻译指令
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

fn default_translator_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_translator_timeout() -> u64 {
    120
}

fn default_max_concurrent() -> usize {
    1 // 逐块顺序提交
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            url: default_translator_url(),
            timeout_secs: default_translator_timeout(),
            max_concurrent: default_max_concurrent(),
            instruction: default_instruction(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 译文输出目录
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("translations_output")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
