//! Translator Port - 翻译后端抽象
//!
//! 定义翻译后端的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 翻译错误
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 翻译请求
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// 块在文档中的序号（用于日志和追踪）
    pub index: usize,
    /// 待翻译的原文
    pub text: String,
}

/// 翻译响应
#[derive(Debug, Clone)]
pub struct TranslateResponse {
    /// 译文
    pub text: String,
}

/// Translator Port
///
/// 外部翻译服务的抽象接口；每个块独立提交
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    /// 翻译单个块
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, TranslateError>;

    /// 检查翻译服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
