//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextSegmenter、Translator、TranslationStore）
//! - commands: 分块与翻译命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{
        FailedFile, SegmentFileHandler, SegmentFileResponse, TranslateDirectoryHandler,
        TranslateDirectoryResponse, TranslateFileHandler, TranslateFileResponse,
    },
    SegmentFile, TranslateDirectory, TranslateFile,
};

pub use error::ApplicationError;

pub use ports::{
    // Text segmenter
    ChunkConfig,
    SegmentOutcome,
    SegmentStats,
    SegmentedText,
    TextSegmenterPort,
    // Translation store
    StoreError,
    TranslationStorePort,
    // Translator
    TranslateError,
    TranslateRequest,
    TranslateResponse,
    TranslatorPort,
};
