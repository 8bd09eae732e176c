//! 单文件导入：校验 base 结构、逐条回填译文并写出结果

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::model::key_builder::{build_base_key, parse_primary_keys, PrimaryKeyPath};
use crate::model::merger::{merge_translations, MergeStats, TranslationMap};
use crate::model::special_rules::SpecialRules;
use crate::utils::fs::{read_json_file, render_json, write_text_file};

/// 输入文件的角色，用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Base,
    Translated,
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Translated => f.write_str("翻译"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("找不到 {role} 文件: {}", .path.display())]
    MissingFile { role: FileRole, path: PathBuf },
    #[error("{}: {reason}，可能不是预期结构", .path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败 {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("特殊规则无效: {0}")]
    Rules(String),
    #[error("{failed} 个文件合并失败")]
    Batch { failed: usize },
}

/// 通过结构校验的 base 文档。data 仍留在原 Value 中以便原样写回
#[derive(Debug)]
pub struct BaseDocument {
    root: Value,
    primary_keys: Vec<PrimaryKeyPath>,
}

impl BaseDocument {
    /// 校验 `rules.primaryKeys` 与 `data`
    pub fn from_value(root: Value, path: &Path) -> Result<Self, ImportError> {
        let malformed = |reason: &str| ImportError::Malformed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let specs = root
            .get("rules")
            .and_then(|rules| rules.get("primaryKeys"))
            .ok_or_else(|| malformed("缺少 rules.primaryKeys"))?
            .as_array()
            .ok_or_else(|| malformed("rules.primaryKeys 不是数组"))?
            .iter()
            .map(|spec| spec.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| malformed("rules.primaryKeys 含有非字符串项"))?;

        if !root.get("data").is_some_and(Value::is_array) {
            return Err(malformed("缺少 data 数组"));
        }

        if specs.is_empty() {
            tracing::warn!("{}: primaryKeys 为空，所有记录的 baseKey 都将相同", path.display());
        }

        Ok(Self {
            primary_keys: parse_primary_keys(&specs),
            root,
        })
    }

    pub fn primary_keys(&self) -> &[PrimaryKeyPath] {
        &self.primary_keys
    }

    pub fn record_count(&self) -> usize {
        self.root["data"].as_array().map_or(0, Vec::len)
    }

    /// 逐条记录回填译文
    pub fn merge(&mut self, translations: &TranslationMap, rules: &SpecialRules, filename: &str) -> MergeStats {
        let file_rules = rules.for_file(filename);
        let mut stats = MergeStats::default();
        if let Some(Value::Array(records)) = self.root.get_mut("data") {
            for record in records.iter_mut() {
                let base_key = build_base_key(record, &self.primary_keys);
                stats.absorb(merge_translations(record, &base_key, translations, file_rules));
            }
        }
        stats
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

/// 把翻译文件的顶层对象转为映射表。非字符串值不在约定范围内，跳过并告警
pub fn translation_map_from_value(value: Value, path: &Path) -> Result<TranslationMap, ImportError> {
    let Value::Object(entries) = value else {
        return Err(ImportError::Malformed {
            path: path.to_path_buf(),
            reason: "翻译文件顶层不是对象".into(),
        });
    };

    let total = entries.len();
    let map: TranslationMap = entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect();

    let skipped = total - map.len();
    if skipped > 0 {
        tracing::warn!("{}: 跳过 {} 个非字符串译文", path.display(), skipped);
    }
    Ok(map)
}

/// 单个文件的导入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub output: PathBuf,
    pub records: usize,
    pub stats: MergeStats,
}

fn require_file(path: &Path, role: FileRole) -> Result<(), ImportError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ImportError::MissingFile {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// 合并一组 base / 翻译 / 输出文件。
///
/// 特殊规则按输出文件名选择。任何校验失败都发生在写出之前，不会留下半成品。
pub fn import_file(
    base_path: &Path,
    translated_path: &Path,
    output_path: &Path,
    rules: &SpecialRules,
) -> Result<ImportReport, ImportError> {
    require_file(base_path, FileRole::Base)?;
    require_file(translated_path, FileRole::Translated)?;

    let root = read_json_file(base_path)?;
    let translations = translation_map_from_value(read_json_file(translated_path)?, translated_path)?;
    let mut document = BaseDocument::from_value(root, base_path)?;

    let filename = output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stats = document.merge(&translations, rules, &filename);
    tracing::debug!(
        "{}: 字符串 {} 处，数组 {} 处",
        filename,
        stats.strings,
        stats.arrays
    );

    let text = render_json(document.as_value(), output_path)?;
    write_text_file(output_path, &text)?;

    tracing::info!("合并完成: {}", output_path.display());
    Ok(ImportReport {
        output: output_path.to_path_buf(),
        records: document.record_count(),
        stats,
    })
}
