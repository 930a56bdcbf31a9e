//! Storage Adapter - 译文持久化实现

mod json_store;

pub use json_store::JsonFileStore;
