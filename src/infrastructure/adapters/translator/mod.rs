//! Translator Adapter - 翻译后端实现

mod fake_translator;
mod http_translator;

pub use fake_translator::{FakeTranslator, FakeTranslatorConfig};
pub use http_translator::*;
