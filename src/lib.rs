//! guwen - 文言文分块翻译系统
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - text_segmenter: 按句末标点切分超长段落，自底向上合并短块
//! - Document Context: 原文块与译文的配对及统计
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextSegmenter, Translator, TranslationStore）
//! - Commands: 分块、单文件翻译、目录翻译
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 标点分块器、HTTP/Fake 翻译后端、JSON 文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use domain::{segment_text, ChunkConfig};
