//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod segmenter;
pub mod storage;
pub mod translator;

pub use segmenter::PunctuationSegmenter;
pub use storage::*;
pub use translator::*;
