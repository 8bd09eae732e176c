//! 批量合并：递归扫描翻译目录，按文件名与 base 目录配对

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::model::data_core::{import_file, ImportError, ImportReport};
use crate::model::special_rules::SpecialRules;
use crate::utils::fs::ensure_dir;

/// 只处理以此结尾的文件（区分大小写）
pub const JSON_SUFFIX: &str = ".json";

/// 批量合并参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub base_dir: PathBuf,
    pub translated_dir: PathBuf,
    pub output_dir: PathBuf,
    /// 单个文件失败后继续处理剩余文件
    pub keep_going: bool,
}

/// 单个失败文件
#[derive(Debug)]
pub struct BatchFailure {
    pub translated: PathBuf,
    pub error: ImportError,
}

/// 批量合并结果
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub imported: Vec<ImportReport>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 递归收集翻译目录下的 JSON 文件，同一目录内按文件名排序。
/// 指向文件的符号链接照常收集，指向目录的符号链接不进入
pub fn discover_translated(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| !entry.path().is_dir())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(JSON_SUFFIX))
        .map(|entry| entry.into_path())
        .collect()
}

/// 执行批量合并。
///
/// 输出目录是扁平的：子目录结构不会保留，同名文件后写覆盖先写。
/// 只存在于 base 目录的文件不会被复制。
pub fn run(config: &BatchConfig, rules: &SpecialRules) -> Result<BatchSummary, ImportError> {
    ensure_dir(&config.output_dir)?;

    let files = discover_translated(&config.translated_dir);
    tracing::info!("在 {} 下找到 {} 个翻译文件", config.translated_dir.display(), files.len());

    let mut summary = BatchSummary::default();
    for translated in files {
        let Some(name) = translated.file_name() else {
            continue;
        };
        let base = config.base_dir.join(name);
        let output = config.output_dir.join(name);

        match import_file(&base, &translated, &output, rules) {
            Ok(report) => summary.imported.push(report),
            Err(error) if config.keep_going => {
                tracing::warn!("跳过 {}: {}", translated.display(), error);
                summary.failed.push(BatchFailure { translated, error });
            }
            Err(error) => return Err(error),
        }
    }

    tracing::info!(
        "批量合并结束: 成功 {} 个，失败 {} 个",
        summary.imported.len(),
        summary.failed.len()
    );
    Ok(summary)
}
