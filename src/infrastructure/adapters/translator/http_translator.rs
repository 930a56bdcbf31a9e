//! HTTP Translator - 调用外部翻译 HTTP 服务
//!
//! 实现 TranslatorPort trait，通过 HTTP 调用外部翻译服务
//!
//! 外部翻译 API:
//! POST http://localhost:8000/api/translate
//! Request: {"text": "...", "instruction": "..."}  (JSON)
//! Response: {"translation": "..."}  (JSON)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    TranslateError, TranslateRequest, TranslateResponse, TranslatorPort,
};

/// 默认翻译指令
pub const DEFAULT_INSTRUCTION: &str =
    "Translate the following Classical Chinese text to English with a focus on accuracy:";

/// 翻译请求体 (JSON)
#[derive(Debug, Serialize)]
struct TranslateHttpRequest<'a> {
    /// 待翻译的原文
    text: &'a str,
    /// 翻译指令
    instruction: &'a str,
}

/// 翻译响应体 (JSON)
#[derive(Debug, Deserialize)]
struct TranslateHttpResponse {
    translation: String,
}

/// HTTP 翻译客户端配置
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// 翻译服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 翻译指令
    pub instruction: String,
}

impl Default for HttpTranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            instruction: DEFAULT_INSTRUCTION.to_string(),
        }
    }
}

impl HttpTranslatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }
}

/// HTTP 翻译客户端
pub struct HttpTranslator {
    client: Client,
    config: HttpTranslatorConfig,
}

impl HttpTranslator {
    /// 创建新的 HTTP 翻译客户端
    pub fn new(config: HttpTranslatorConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslateError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取翻译 URL
    fn translate_url(&self) -> String {
        format!("{}/api/translate", self.config.base_url.trim_end_matches('/'))
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslatorPort for HttpTranslator {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, TranslateError> {
        let http_request = TranslateHttpRequest {
            text: &request.text,
            instruction: &self.config.instruction,
        };

        tracing::debug!(
            url = %self.translate_url(),
            index = request.index,
            text_chars = request.text.chars().count(),
            "Sending translate request"
        );

        let response = self
            .client
            .post(self.translate_url())
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else if e.is_connect() {
                    TranslateError::NetworkError(format!(
                        "Cannot connect to translation service: {}",
                        e
                    ))
                } else {
                    TranslateError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslateError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TranslateHttpResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranslateError::Timeout
            } else {
                TranslateError::InvalidResponse(format!("Failed to decode translation: {}", e))
            }
        })?;

        tracing::debug!(
            index = request.index,
            translated_chars = body.translation.chars().count(),
            "Translation completed"
        );

        Ok(TranslateResponse {
            text: body.translation,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
