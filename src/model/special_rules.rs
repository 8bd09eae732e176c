//! 特殊规则表：按 (文件名, 字段名) 登记的数组字段处理覆盖
//!
//! 规则文件格式与上游脚本的表一致：
//!
//! ```json
//! { "Tutorial.json": { "texts": { "is_empty": true } } }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::model::data_core::ImportError;

/// 规则行为（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    /// 解码结果为单个空串时，清空为 `[]`
    CollapseSingletonEmpty,
}

/// 规则文件里单个字段的声明。与上游一致只看键是否存在，值不参与判断
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct RuleSpec {
    flags: serde_json::Map<String, serde_json::Value>,
}

impl RuleSpec {
    fn kinds(&self) -> BTreeSet<RuleKind> {
        let mut kinds = BTreeSet::new();
        if self.flags.contains_key("is_empty") {
            kinds.insert(RuleKind::CollapseSingletonEmpty);
        }
        kinds
    }
}

/// 全部文件的特殊规则
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialRules {
    files: HashMap<String, HashMap<String, BTreeSet<RuleKind>>>,
}

/// 单个文件的规则视图，传给合并过程使用
#[derive(Debug, Clone, Copy)]
pub struct FileRules<'a> {
    fields: Option<&'a HashMap<String, BTreeSet<RuleKind>>>,
}

impl SpecialRules {
    /// 空表：不做任何特殊处理
    pub fn empty() -> Self {
        Self::default()
    }

    /// 内置规则表
    pub fn builtin() -> Self {
        let mut rules = Self::empty();
        rules.insert("ProduceStory.json", "produceEventHintProduceConditionDescriptions", RuleKind::CollapseSingletonEmpty);
        rules.insert("Tutorial.json", "texts", RuleKind::CollapseSingletonEmpty);
        // 文件名里的双点沿用上游表
        rules.insert("ConditionSet..json", "description", RuleKind::CollapseSingletonEmpty);
        rules.insert("IdolCardSkin.json", "name", RuleKind::CollapseSingletonEmpty);
        rules
    }

    /// 登记一条规则
    pub fn insert(&mut self, file: &str, field: &str, kind: RuleKind) {
        self.files
            .entry(file.to_string())
            .or_default()
            .entry(field.to_string())
            .or_default()
            .insert(kind);
    }

    /// 从 JSON 字符串解析规则表
    pub fn from_json_str(text: &str) -> Result<Self, ImportError> {
        let raw: HashMap<String, HashMap<String, RuleSpec>> =
            serde_json::from_str(text).map_err(|e| ImportError::Rules(e.to_string()))?;

        let mut rules = Self::empty();
        for (file, fields) in raw {
            for (field, spec) in fields {
                for kind in spec.kinds() {
                    rules.insert(&file, &field, kind);
                }
            }
        }
        Ok(rules)
    }

    /// 从规则文件加载
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ImportError::Rules(format!("{}: {}", path.display(), e)))?;
        let rules = Self::from_json_str(&text)?;
        tracing::info!("已加载特殊规则: {} ({} 个文件)", path.display(), rules.files.len());
        Ok(rules)
    }

    /// 取某个文件的规则视图
    pub fn for_file(&self, filename: &str) -> FileRules<'_> {
        FileRules {
            fields: self.files.get(filename),
        }
    }
}

impl<'a> FileRules<'a> {
    /// 不带任何规则的视图
    pub fn none() -> Self {
        Self { fields: None }
    }

    pub fn has(&self, field: &str, kind: RuleKind) -> bool {
        self.fields
            .and_then(|fields| fields.get(field))
            .is_some_and(|kinds| kinds.contains(&kind))
    }
}
