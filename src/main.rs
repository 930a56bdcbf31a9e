//! guwen - 文言文分块翻译 CLI
//!
//! - `guwen chunk <FILE>`: 打印分块结果
//! - `guwen translate <PATH>`: 翻译单个文件或目录下的所有 `.txt` 文件

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use guwen::application::{
    SegmentFile, SegmentFileHandler, TranslateDirectory, TranslateDirectoryHandler,
    TranslateFile, TranslateFileHandler, TranslateFileResponse, TranslatorPort,
};
use guwen::config::{load_config_from_path, print_config, AppConfig};
use guwen::infrastructure::{
    FakeTranslator, FakeTranslatorConfig, HttpTranslator, HttpTranslatorConfig, JsonFileStore,
    PunctuationSegmenter,
};

#[derive(Debug, Parser)]
#[command(name = "guwen", version, about = "Chunk and translate punctuated Classical Chinese text")]
struct Cli {
    /// 配置文件路径（默认搜索 guwen.toml / guwen.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the chunks a file would be split into
    Chunk {
        /// UTF-8 text file
        file: PathBuf,
    },
    /// Translate a file, or every .txt file in a directory
    Translate {
        /// File or directory to translate
        path: PathBuf,

        /// Output directory (overrides output.dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output name for a single file (default: {stem}_translated)
        #[arg(long)]
        name: Option<String>,

        /// Use the offline fake translator instead of the HTTP service
        #[arg(long)]
        dry_run: bool,
    },
}

/// 初始化日志，输出到 stderr，保持 stdout 干净
fn init_logging(config: &AppConfig) {
    let log_filter = format!("{},guwen={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_file_result(result: &TranslateFileResponse) {
    match &result.output_path {
        Some(output) => println!(
            "{} -> {} ({} chunks, {} failed, {} → {} chars)",
            result.source.display(),
            output.display(),
            result.stats.chunk_count,
            result.stats.failed_count,
            result.stats.original_chars,
            result.stats.translated_chars,
        ),
        None => println!("{} -> (empty, skipped)", result.source.display()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config);
    print_config(&config);

    let chunk_config = config.chunking.to_chunk_config();
    let segmenter = Arc::new(PunctuationSegmenter::new());

    match cli.command {
        Command::Chunk { file } => {
            let handler = SegmentFileHandler::new(segmenter, chunk_config);
            let response = handler.handle(SegmentFile { path: file }).await?;

            for segment in &response.segments {
                println!("-----CHUNK----- ({} chars)", segment.char_count());
                println!("{}", segment.content);
            }

            if response.stats.oversized > 0 {
                tracing::warn!(
                    oversized = response.stats.oversized,
                    paragraph_size = config.chunking.paragraph_size,
                    "Some paragraphs had no valid split point and were kept whole"
                );
            }
        }
        Command::Translate {
            path,
            output,
            name,
            dry_run,
        } => {
            let translator: Arc<dyn TranslatorPort> = if dry_run {
                Arc::new(FakeTranslator::new(FakeTranslatorConfig {
                    prefix: "dry-run".to_string(),
                    delay_ms: 0,
                }))
            } else {
                let translator_config = HttpTranslatorConfig::new(&config.translator.url)
                    .with_timeout(config.translator.timeout_secs)
                    .with_instruction(&config.translator.instruction);
                Arc::new(HttpTranslator::new(translator_config)?)
            };

            if !translator.health_check().await {
                tracing::warn!(url = %config.translator.url, "Translation service is not healthy");
            }

            let output_dir = output.unwrap_or_else(|| config.output.dir.clone());
            let store = JsonFileStore::new(&output_dir)
                .await
                .with_context(|| format!("Cannot prepare output directory {}", output_dir.display()))?;

            let file_handler = Arc::new(TranslateFileHandler::new(
                segmenter,
                translator,
                Arc::new(store),
                chunk_config,
                config.translator.max_concurrent,
            ));

            if path.is_dir() {
                if name.is_some() {
                    tracing::warn!("--name is ignored when translating a directory");
                }
                let handler = TranslateDirectoryHandler::new(file_handler);
                let response = handler.handle(TranslateDirectory { dir: path }).await?;

                for result in &response.translated {
                    print_file_result(result);
                }
                for failed in &response.failed {
                    println!("{} -> FAILED: {}", failed.path.display(), failed.error);
                }
            } else {
                let response = file_handler
                    .handle(TranslateFile {
                        path,
                        output_name: name,
                    })
                    .await?;
                print_file_result(&response);
            }
        }
    }

    Ok(())
}
