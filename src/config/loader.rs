//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（guwen.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["guwen", "guwen.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `GUWEN_`，层级分隔符 `__`）
/// 2. 配置文件（guwen.toml 或 guwen.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `GUWEN_CHUNKING__PARAGRAPH_SIZE=512`
/// - `GUWEN_TRANSLATOR__URL=http://translator:8000`
/// - `GUWEN_OUTPUT__DIR=/data/translations`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("chunking.min_chunk_size", defaults.chunking.min_chunk_size as u64)?
        .set_default("chunking.paragraph_size", defaults.chunking.paragraph_size as u64)?
        .set_default("chunking.max_chunk_size", defaults.chunking.max_chunk_size as u64)?
        .set_default("chunking.terminators", defaults.chunking.terminators.clone())?
        .set_default("translator.url", defaults.translator.url.clone())?
        .set_default("translator.timeout_secs", defaults.translator.timeout_secs)?
        .set_default("translator.max_concurrent", defaults.translator.max_concurrent as u64)?
        .set_default("translator.instruction", defaults.translator.instruction.clone())?
        .set_default("output.dir", defaults.output.dir.to_string_lossy().to_string())?
        .set_default("log.level", defaults.log.level.clone())?
        .set_default("log.json", defaults.log.json)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: GUWEN_TRANSLATOR__URL=http://translator:8000
    builder = builder.add_source(
        Environment::with_prefix("GUWEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .chunking
        .to_chunk_config()
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.translator.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Translator URL cannot be empty".to_string(),
        ));
    }

    if config.translator.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Translator timeout cannot be 0".to_string(),
        ));
    }

    if config.translator.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "Translator max_concurrent cannot be 0".to_string(),
        ));
    }

    if config.output.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!(
        "Chunking: min={} paragraph={} max={} terminators={}",
        config.chunking.min_chunk_size,
        config.chunking.paragraph_size,
        config.chunking.max_chunk_size,
        config.chunking.terminators
    );
    tracing::info!("Translator URL: {}", config.translator.url);
    tracing::info!("Translator Timeout: {}s", config.translator.timeout_secs);
    tracing::info!("Translator Concurrency: {}", config.translator.max_concurrent);
    tracing::info!("Output Directory: {:?}", config.output.dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_inverted_sizes() {
        let mut config = AppConfig::default();
        config.chunking.paragraph_size = 64;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_terminators() {
        let mut config = AppConfig::default();
        config.chunking.terminators = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_translator_url() {
        let mut config = AppConfig::default();
        config.translator.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_concurrency() {
        let mut config = AppConfig::default();
        config.translator.max_concurrent = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guwen.toml");
        std::fs::write(
            &path,
            r#"
[chunking]
paragraph_size = 512
max_chunk_size = 500
terminators = "。！？"

[translator]
url = "http://translator:9000"
max_concurrent = 4

[output]
dir = "out"
"#,
        )
        .unwrap();

        let config = load_config_from_path(Some(path.as_path())).unwrap();
        assert_eq!(config.chunking.min_chunk_size, 128);
        assert_eq!(config.chunking.paragraph_size, 512);
        assert_eq!(config.chunking.max_chunk_size, 500);
        assert_eq!(
            config.chunking.to_chunk_config().terminators,
            vec!['。', '！', '？']
        );
        assert_eq!(config.translator.url, "http://translator:9000");
        assert_eq!(config.translator.max_concurrent, 4);
        assert_eq!(config.translator.timeout_secs, 120);
        assert_eq!(config.output.dir, std::path::PathBuf::from("out"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guwen.toml");
        std::fs::write(&path, "[chunking]\nmin_chunk_size = 500\n").unwrap();

        let result = load_config_from_path(Some(path.as_path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_missing_required_file() {
        let dir = tempdir().unwrap();
        let result = load_config_from_path(Some(dir.path().join("missing.toml").as_path()));
        assert!(result.is_err());
    }
}
