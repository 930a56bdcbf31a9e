//! Document Context - 译文文档限界上下文
//!
//! 职责:
//! - 原文块与译文的配对
//! - 译文文档聚合与统计

mod aggregate;
mod entities;
mod value_objects;

pub use aggregate::{DocumentStats, TranslatedDocument};
pub use entities::TranslatedChunk;
pub use value_objects::{DocumentId, OutputName, SourcePath};
