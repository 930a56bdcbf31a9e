//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod text_segmenter;
mod translation_store;
mod translator;

pub use text_segmenter::{
    ChunkConfig, SegmentError, SegmentOutcome, SegmentStats, SegmentedText, TextSegmenterPort,
};
pub use translation_store::{StoreError, TranslationStorePort};
pub use translator::{TranslateError, TranslateRequest, TranslateResponse, TranslatorPort};
