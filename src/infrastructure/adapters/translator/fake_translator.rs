//! Fake Translator - 用于测试和试运行的翻译后端
//!
//! 不调用任何外部服务，返回带前缀的原文

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{
    TranslateError, TranslateRequest, TranslateResponse, TranslatorPort,
};

/// Fake Translator 配置
#[derive(Debug, Clone)]
pub struct FakeTranslatorConfig {
    /// 译文前缀，输出为 `[{prefix}] {text}`
    pub prefix: String,
    /// 模拟延迟（毫秒）
    pub delay_ms: u64,
}

impl Default for FakeTranslatorConfig {
    fn default() -> Self {
        Self {
            prefix: "fake".to_string(),
            delay_ms: 0,
        }
    }
}

/// Fake Translator
pub struct FakeTranslator {
    config: FakeTranslatorConfig,
}

impl FakeTranslator {
    pub fn new(config: FakeTranslatorConfig) -> Self {
        tracing::info!(
            prefix = %config.prefix,
            delay_ms = config.delay_ms,
            "FakeTranslator initialized"
        );
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTranslatorConfig::default())
    }
}

#[async_trait]
impl TranslatorPort for FakeTranslator {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, TranslateError> {
        tracing::debug!(
            index = request.index,
            text_chars = request.text.chars().count(),
            "FakeTranslator: echoing text"
        );

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        Ok(TranslateResponse {
            text: format!("[{}] {}", self.config.prefix, request.text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_translation() {
        let translator = FakeTranslator::with_defaults();
        let response = translator
            .translate(TranslateRequest {
                index: 3,
                text: "天地玄黄。".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.text, "[fake] 天地玄黄。");
        assert!(translator.health_check().await);
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let translator = FakeTranslator::new(FakeTranslatorConfig {
            prefix: "dry-run".to_string(),
            delay_ms: 1,
        });
        let response = translator
            .translate(TranslateRequest {
                index: 0,
                text: "宇宙洪荒。".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.text, "[dry-run] 宇宙洪荒。");
    }
}
