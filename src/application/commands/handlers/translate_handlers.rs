//! Translate Command Handlers

use futures_util::{stream, StreamExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::{SegmentFile, TranslateDirectory, TranslateFile};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChunkConfig, SegmentStats, SegmentedText, TextSegmenterPort, TranslateError,
    TranslateRequest, TranslateResponse, TranslationStorePort, TranslatorPort,
};
use crate::domain::document::{DocumentId, DocumentStats, OutputName, SourcePath, TranslatedDocument};

/// 读取源文件并按 UTF-8 解码
async fn read_source(path: &Path) -> Result<String, ApplicationError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ApplicationError::not_found("Source file", path)
        } else {
            ApplicationError::from(e)
        }
    })?;

    String::from_utf8(bytes).map_err(|e| {
        ApplicationError::invalid_input(format!(
            "{} is not valid UTF-8: {}",
            path.display(),
            e.utf8_error()
        ))
    })
}

// ============================================================================
// SegmentFile
// ============================================================================

/// 分块响应
#[derive(Debug, Clone)]
pub struct SegmentFileResponse {
    pub segments: Vec<SegmentedText>,
    /// 分块统计，`stats.oversized` 为无法切分而保留的超长块数
    pub stats: SegmentStats,
}

/// SegmentFile Handler - 只分块，不调用翻译服务
pub struct SegmentFileHandler {
    segmenter: Arc<dyn TextSegmenterPort>,
    chunk_config: ChunkConfig,
}

impl SegmentFileHandler {
    pub fn new(segmenter: Arc<dyn TextSegmenterPort>, chunk_config: ChunkConfig) -> Self {
        Self {
            segmenter,
            chunk_config,
        }
    }

    pub async fn handle(&self, command: SegmentFile) -> Result<SegmentFileResponse, ApplicationError> {
        let text = read_source(&command.path).await?;
        let outcome = self.segmenter.segment(&text, &self.chunk_config)?;

        tracing::info!(
            path = %command.path.display(),
            chunks = outcome.segments.len(),
            oversized = outcome.stats.oversized,
            "File segmented"
        );

        Ok(SegmentFileResponse {
            segments: outcome.segments,
            stats: outcome.stats,
        })
    }
}

// ============================================================================
// TranslateFile
// ============================================================================

/// 翻译文件响应
#[derive(Debug, Clone)]
pub struct TranslateFileResponse {
    pub source: PathBuf,
    /// 文档为空时为 None
    pub document_id: Option<DocumentId>,
    /// 文档为空时未写出
    pub output_path: Option<PathBuf>,
    pub stats: DocumentStats,
}

/// TranslateFile Handler - 分块、逐块翻译、保存
pub struct TranslateFileHandler {
    segmenter: Arc<dyn TextSegmenterPort>,
    translator: Arc<dyn TranslatorPort>,
    store: Arc<dyn TranslationStorePort>,
    chunk_config: ChunkConfig,
    max_concurrent: usize,
}

impl TranslateFileHandler {
    pub fn new(
        segmenter: Arc<dyn TextSegmenterPort>,
        translator: Arc<dyn TranslatorPort>,
        store: Arc<dyn TranslationStorePort>,
        chunk_config: ChunkConfig,
        max_concurrent: usize,
    ) -> Self {
        Self {
            segmenter,
            translator,
            store,
            chunk_config,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub async fn handle(&self, command: TranslateFile) -> Result<TranslateFileResponse, ApplicationError> {
        let output_name = match command.output_name {
            Some(name) => OutputName::new(name).map_err(ApplicationError::validation)?,
            None => OutputName::for_source(&command.path),
        };

        let text = read_source(&command.path).await?;
        let outcome = self.segmenter.segment(&text, &self.chunk_config)?;
        let segments = outcome.segments;

        if segments.is_empty() {
            tracing::warn!(
                path = %command.path.display(),
                "Document is empty, nothing to translate"
            );
            return Ok(TranslateFileResponse {
                source: command.path,
                document_id: None,
                output_path: None,
                stats: DocumentStats::default(),
            });
        }

        let total = segments.len();
        tracing::info!(
            path = %command.path.display(),
            chunks = total,
            oversized = outcome.stats.oversized,
            max_concurrent = self.max_concurrent,
            "Translating document"
        );

        // buffered 保证结果按提交顺序返回
        let results: Vec<(SegmentedText, Result<TranslateResponse, TranslateError>)> =
            stream::iter(segments.into_iter().map(|segment| {
                let translator = self.translator.clone();
                async move {
                    let result = translate_segment(translator.as_ref(), &segment).await;
                    (segment, result)
                }
            }))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut document =
            TranslatedDocument::new(SourcePath::from(command.path.as_path()), output_name);
        for (segment, result) in results {
            let translation = match result {
                Ok(response) => {
                    tracing::debug!(index = segment.index, total = total, "Chunk translated");
                    Some(response.text)
                }
                Err(e) => {
                    tracing::warn!(
                        index = segment.index,
                        chars = segment.char_count(),
                        error = %e,
                        "Chunk translation failed"
                    );
                    None
                }
            };
            document.record(segment.content, translation);
        }

        let output_path = self.store.save(&document).await?;
        let stats = document.stats();

        tracing::info!(
            document_id = %document.id(),
            output = %output_path.display(),
            chunks = stats.chunk_count,
            failed = stats.failed_count,
            original_chars = stats.original_chars,
            translated_chars = stats.translated_chars,
            "Document translated"
        );

        Ok(TranslateFileResponse {
            source: command.path,
            document_id: Some(document.id().clone()),
            output_path: Some(output_path),
            stats,
        })
    }
}

/// 翻译单个块；空白块不提交给翻译服务
async fn translate_segment(
    translator: &dyn TranslatorPort,
    segment: &SegmentedText,
) -> Result<TranslateResponse, TranslateError> {
    if segment.content.trim().is_empty() {
        return Ok(TranslateResponse {
            text: String::new(),
        });
    }

    translator
        .translate(TranslateRequest {
            index: segment.index,
            text: segment.content.clone(),
        })
        .await
}

// ============================================================================
// TranslateDirectory
// ============================================================================

/// 翻译失败的文件
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// 翻译目录响应
#[derive(Debug, Clone, Default)]
pub struct TranslateDirectoryResponse {
    pub translated: Vec<TranslateFileResponse>,
    pub failed: Vec<FailedFile>,
}

/// TranslateDirectory Handler - 逐个翻译目录中的 `.txt` 文件
pub struct TranslateDirectoryHandler {
    file_handler: Arc<TranslateFileHandler>,
}

impl TranslateDirectoryHandler {
    pub fn new(file_handler: Arc<TranslateFileHandler>) -> Self {
        Self { file_handler }
    }

    pub async fn handle(
        &self,
        command: TranslateDirectory,
    ) -> Result<TranslateDirectoryResponse, ApplicationError> {
        let files = list_text_files(&command.dir).await?;

        tracing::info!(
            dir = %command.dir.display(),
            files = files.len(),
            "Translating directory"
        );

        let mut response = TranslateDirectoryResponse::default();
        for (position, path) in files.into_iter().enumerate() {
            tracing::info!(file = %path.display(), position = position + 1, "Translating file");

            match self
                .file_handler
                .handle(TranslateFile {
                    path: path.clone(),
                    output_name: None,
                })
                .await
            {
                Ok(file_response) => response.translated.push(file_response),
                Err(e) => {
                    // 单个文件失败不影响其余文件
                    tracing::error!(file = %path.display(), error = %e, "File translation failed");
                    response.failed.push(FailedFile {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            translated = response.translated.len(),
            failed = response.failed.len(),
            "Directory translation finished"
        );

        Ok(response)
    }
}

/// 列出目录下的 `.txt` 普通文件（扩展名不区分大小写），按文件名排序
async fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ApplicationError::not_found("Directory", dir)
        } else {
            ApplicationError::from(e)
        }
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if is_txt && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::tempdir;

    use crate::infrastructure::adapters::{
        FakeTranslator, FakeTranslatorConfig, JsonFileStore, PunctuationSegmenter,
    };

    /// 对包含指定字符的块返回错误
    struct FlakyTranslator {
        fail_on: char,
    }

    #[async_trait]
    impl TranslatorPort for FlakyTranslator {
        async fn translate(
            &self,
            request: TranslateRequest,
        ) -> Result<TranslateResponse, TranslateError> {
            if request.text.contains(self.fail_on) {
                return Err(TranslateError::ServiceError("HTTP 500: boom".to_string()));
            }
            Ok(TranslateResponse {
                text: request.text.to_uppercase(),
            })
        }
    }

    fn sentence(len: usize) -> String {
        let mut s = "子".repeat(len - 1);
        s.push('。');
        s
    }

    async fn file_handler(
        output_dir: &Path,
        translator: Arc<dyn TranslatorPort>,
    ) -> TranslateFileHandler {
        let store = JsonFileStore::new(output_dir).await.unwrap();
        TranslateFileHandler::new(
            Arc::new(PunctuationSegmenter::new()),
            translator,
            Arc::new(store),
            ChunkConfig::default(),
            3,
        )
    }

    fn fake_translator() -> Arc<dyn TranslatorPort> {
        Arc::new(FakeTranslator::new(FakeTranslatorConfig::default()))
    }

    #[tokio::test]
    async fn test_segment_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("卷一.txt");
        let body: String = (0..14).map(|_| sentence(50)).collect();
        tokio::fs::write(&path, &body).await.unwrap();

        let handler = SegmentFileHandler::new(
            Arc::new(PunctuationSegmenter::new()),
            ChunkConfig::default(),
        );
        let response = handler.handle(SegmentFile { path }).await.unwrap();

        assert_eq!(response.segments.len(), 2);
        assert_eq!(response.stats.paragraphs, 1);
        assert_eq!(response.stats.oversized, 0);
        assert_eq!(response.segments[0].index, 0);
        assert_eq!(response.segments[1].index, 1);
    }

    #[tokio::test]
    async fn test_segment_file_reports_unsplittable_span() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("卷二.txt");
        // 只有首尾两处句末标点，找不到合法切分点
        let line = format!("。{}。", "子".repeat(498));
        tokio::fs::write(&path, &line).await.unwrap();

        let handler = SegmentFileHandler::new(
            Arc::new(PunctuationSegmenter::new()),
            ChunkConfig::default(),
        );
        let response = handler.handle(SegmentFile { path }).await.unwrap();

        assert_eq!(response.segments.len(), 1);
        assert_eq!(response.segments[0].content, line);
        assert_eq!(response.stats.oversized, 1);
    }

    #[tokio::test]
    async fn test_segment_file_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        tokio::fs::write(&path, "子子子子子子。。").await.unwrap();

        let config = ChunkConfig {
            min_chunk_size: 0,
            paragraph_size: 5,
            max_chunk_size: 5,
            terminators: vec!['。'],
        };
        let handler = SegmentFileHandler::new(Arc::new(PunctuationSegmenter::new()), config);
        let result = handler.handle(SegmentFile { path }).await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_translate_file_keeps_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("中恶门.txt");
        let body: String = (0..30).map(|_| sentence(45)).collect();
        let text = format!("中恶门\n{}", body);
        tokio::fs::write(&path, &text).await.unwrap();

        let out = dir.path().join("out");
        let handler = file_handler(&out, fake_translator()).await;
        let response = handler
            .handle(TranslateFile {
                path: path.clone(),
                output_name: None,
            })
            .await
            .unwrap();

        let output_path = response.output_path.unwrap();
        assert_eq!(output_path, out.join("中恶门_translated.json"));
        assert!(output_path.exists());
        assert_eq!(response.stats.failed_count, 0);
        assert!(response.stats.chunk_count > 1);

        let saved: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&output_path).await.unwrap()).unwrap();
        let chunks = saved["document"]["chunks"].as_array().unwrap();
        assert_eq!(chunks.len(), response.stats.chunk_count);

        let mut rebuilt = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk["index"], i);
            let original = chunk["original"].as_str().unwrap();
            assert_eq!(
                chunk["translation"].as_str().unwrap(),
                format!("[fake] {}", original)
            );
            rebuilt.push_str(original);
        }
        assert_eq!(rebuilt.replace('\n', ""), text.replace('\n', ""));
    }

    #[tokio::test]
    async fn test_translate_file_records_failed_chunks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        // 两个大块不会合并：第一块含"甲"会失败
        let first = format!("甲{}", sentence(349));
        let text = format!("{}\n{}", first, sentence(350));
        tokio::fs::write(&path, &text).await.unwrap();

        let handler = file_handler(dir.path(), Arc::new(FlakyTranslator { fail_on: '甲' })).await;
        let response = handler
            .handle(TranslateFile {
                path,
                output_name: Some("custom".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.output_path.unwrap(), dir.path().join("custom.json"));
        assert_eq!(response.stats.chunk_count, 2);
        assert_eq!(response.stats.failed_count, 1);
        assert_eq!(response.stats.translated_count, 1);
    }

    #[tokio::test]
    async fn test_translate_empty_file_skips_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        tokio::fs::write(&path, "\n\n").await.unwrap();

        let out = dir.path().join("out");
        let handler = file_handler(&out, fake_translator()).await;
        let response = handler
            .handle(TranslateFile {
                path,
                output_name: None,
            })
            .await
            .unwrap();

        assert!(response.output_path.is_none());
        assert!(response.document_id.is_none());
        assert_eq!(response.stats, DocumentStats::default());
        assert!(!out.join("empty_translated.json").exists());
    }

    #[tokio::test]
    async fn test_translate_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        tokio::fs::write(&path, [0xff, 0xfe, 0xfd]).await.unwrap();

        let handler = file_handler(dir.path(), fake_translator()).await;
        let result = handler
            .handle(TranslateFile {
                path,
                output_name: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_translate_missing_file() {
        let dir = tempdir().unwrap();
        let handler = file_handler(dir.path(), fake_translator()).await;
        let result = handler
            .handle(TranslateFile {
                path: dir.path().join("missing.txt"),
                output_name: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_translate_rejects_bad_output_name() {
        let dir = tempdir().unwrap();
        let handler = file_handler(dir.path(), fake_translator()).await;
        let result = handler
            .handle(TranslateFile {
                path: dir.path().join("a.txt"),
                output_name: Some("../escape".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_translate_directory_continues_after_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        tokio::fs::create_dir_all(&input).await.unwrap();
        tokio::fs::write(input.join("b.txt"), "天地玄黄。").await.unwrap();
        tokio::fs::write(input.join("a.TXT"), "宇宙洪荒。").await.unwrap();
        tokio::fs::write(input.join("c.txt"), [0xff, 0xfe]).await.unwrap();
        tokio::fs::write(input.join("notes.md"), "忽略").await.unwrap();
        tokio::fs::create_dir_all(input.join("sub.txt")).await.unwrap();

        let out = dir.path().join("out");
        let handler = TranslateDirectoryHandler::new(Arc::new(
            file_handler(&out, fake_translator()).await,
        ));
        let response = handler
            .handle(TranslateDirectory { dir: input.clone() })
            .await
            .unwrap();

        assert_eq!(response.translated.len(), 2);
        assert_eq!(response.translated[0].source, input.join("a.TXT"));
        assert_eq!(response.translated[1].source, input.join("b.txt"));
        assert_eq!(response.failed.len(), 1);
        assert_eq!(response.failed[0].path, input.join("c.txt"));
        assert!(out.join("a_translated.json").exists());
        assert!(out.join("b_translated.json").exists());
    }

    #[tokio::test]
    async fn test_translate_missing_directory() {
        let dir = tempdir().unwrap();
        let handler = TranslateDirectoryHandler::new(Arc::new(
            file_handler(dir.path(), fake_translator()).await,
        ));
        let result = handler
            .handle(TranslateDirectory {
                dir: dir.path().join("nope"),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
