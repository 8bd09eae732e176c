//! 回填翻译：深度优先遍历记录，按 `baseKey|结构路径` 查找译文并原地替换

use std::collections::HashMap;

use serde_json::Value;

use crate::model::key_builder::KEY_SEPARATOR;
use crate::model::marker::{decode_marker_array, is_singleton_empty};
use crate::model::special_rules::{FileRules, RuleKind};

/// fullKey -> 译文
pub type TranslationMap = HashMap<String, String>;

/// 单条或多条记录的替换统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// 替换的字符串字段
    pub strings: usize,
    /// 替换的数组字段
    pub arrays: usize,
}

impl MergeStats {
    pub fn total(&self) -> usize {
        self.strings + self.arrays
    }

    pub fn absorb(&mut self, other: MergeStats) {
        self.strings += other.strings;
        self.arrays += other.arrays;
    }
}

/// 拼接结构路径：对象键用 `.`，数组下标用 `[i]`
fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn index_path(prefix: &str, idx: usize) -> String {
    format!("{}[{}]", prefix, idx)
}

/// 按特殊规则修正解码后的数组。
///
/// `decode_marker_array` 不会产出 `[""]`，这里的折叠只对其他来源的解码结果生效
pub fn apply_array_rules(field: &str, items: Vec<String>, rules: FileRules<'_>) -> Vec<String> {
    if is_singleton_empty(&items) && rules.has(field, RuleKind::CollapseSingletonEmpty) {
        Vec::new()
    } else {
        items
    }
}

struct Merger<'a> {
    base_key: &'a str,
    translations: &'a TranslationMap,
    rules: FileRules<'a>,
    stats: MergeStats,
}

impl<'a> Merger<'a> {
    fn lookup(&self, path: &str) -> Option<&'a String> {
        let full_key = format!("{}{}{}", self.base_key, KEY_SEPARATOR, path);
        self.translations.get(&full_key)
    }

    fn walk(&mut self, value: &mut Value, prefix: &str) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    let path = child_path(prefix, key);
                    self.visit_field(key, child, &path);
                }
            }
            Value::Array(items) => {
                for (idx, item) in items.iter_mut().enumerate() {
                    // 数组中的标量不单独查找，只有整个数组能按 fullKey 替换
                    if item.is_object() || item.is_array() {
                        self.walk(item, &index_path(prefix, idx));
                    }
                }
            }
            _ => {}
        }
    }

    fn visit_field(&mut self, field: &str, value: &mut Value, path: &str) {
        match value {
            Value::String(s) => {
                if let Some(translated) = self.lookup(path) {
                    *s = translated.clone();
                    self.stats.strings += 1;
                }
            }
            Value::Array(_) => {
                let decoded = self.lookup(path).and_then(|raw| {
                    let items = decode_marker_array(raw);
                    if items.is_none() {
                        tracing::debug!("译文缺少 [LA_F] 前缀，按未命中处理: {}", path);
                    }
                    items
                });
                match decoded {
                    Some(items) => {
                        let items = apply_array_rules(field, items, self.rules);
                        *value = Value::Array(items.into_iter().map(Value::String).collect());
                        self.stats.arrays += 1;
                    }
                    None => self.walk(value, path),
                }
            }
            Value::Object(_) => self.walk(value, path),
            _ => {}
        }
    }
}

/// 将译文回填到一条记录中（原地修改）。未命中的字段保持原值
pub fn merge_translations(
    record: &mut Value,
    base_key: &str,
    translations: &TranslationMap,
    rules: FileRules<'_>,
) -> MergeStats {
    let mut merger = Merger {
        base_key,
        translations,
        rules,
        stats: MergeStats::default(),
    };
    merger.walk(record, "");
    merger.stats
}
