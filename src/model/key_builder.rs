//! 主键拼接：由 rules.primaryKeys 声明的字段路径生成记录的 baseKey

use serde_json::Value;

/// baseKey 各段之间、以及 baseKey 与结构路径之间的分隔符
pub const KEY_SEPARATOR: &str = "|";

/// 解析后的主键字段路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKeyPath {
    /// 直接字段名，如 `id`
    Field(String),
    /// `top.sub`：取 top 字段（对象，或首元素为对象的数组）下的 sub
    Nested { top: String, sub: String },
}

impl PrimaryKeyPath {
    /// 只按第一个 '.' 切分，`a.b.c` 得到 top=`a`、sub=`b.c`
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('.') {
            Some((top, sub)) => Self::Nested {
                top: top.to_string(),
                sub: sub.to_string(),
            },
            None => Self::Field(spec.to_string()),
        }
    }

    /// 在记录中取出该路径对应的值；取不到时返回 None
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            Self::Field(name) => record.get(name),
            Self::Nested { top, sub } => match record.get(top)? {
                Value::Array(items) => match items.first()? {
                    Value::Object(first) => first.get(sub),
                    _ => None,
                },
                Value::Object(map) => map.get(sub),
                _ => None,
            },
        }
    }
}

/// 批量解析 primaryKeys 列表，保持声明顺序
pub fn parse_primary_keys<S: AsRef<str>>(specs: &[S]) -> Vec<PrimaryKeyPath> {
    specs.iter().map(|s| PrimaryKeyPath::parse(s.as_ref())).collect()
}

/// 把主键值渲染为 key 片段，规则与上游导出工具（Python `str()`）一致：
/// 字符串原样，数字按 JSON 形式，布尔为 True/False，null 为 None，
/// 数组与对象按 Python repr，如 `['a', 1]`、`{'k': None}`。
///
/// 超出 i64/u64 范围的整数在解析时已变为浮点数，这类主键无法与上游一致
pub fn key_fragment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => {
            let mut out = String::new();
            write_repr(other, &mut out);
            out
        }
    }
}

/// Python repr 的字符串字面量：默认单引号，含单引号且不含双引号时改用双引号
fn write_str_repr(s: &str, out: &mut String) {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
}

fn write_repr(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => write_str_repr(s, out),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Null => out.push_str("None"),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_str_repr(k, out);
                out.push_str(": ");
                write_repr(v, out);
            }
            out.push('}');
        }
    }
}

/// 生成记录的 baseKey。缺失的值记为空串但仍占一个位置
pub fn build_base_key(record: &Value, primary_keys: &[PrimaryKeyPath]) -> String {
    primary_keys
        .iter()
        .map(|pk| pk.resolve(record).map(key_fragment).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_splits_on_first_dot_only() {
        assert_eq!(PrimaryKeyPath::parse("id"), PrimaryKeyPath::Field("id".into()));
        assert_eq!(
            PrimaryKeyPath::parse("a.b.c"),
            PrimaryKeyPath::Nested { top: "a".into(), sub: "b.c".into() }
        );
    }

    #[test]
    fn test_simple_key() {
        let record = json!({"id": "A1", "text": "hello"});
        let keys = parse_primary_keys(&["id"]);
        assert_eq!(build_base_key(&record, &keys), "A1");
    }

    #[test]
    fn test_composite_key_through_sequence() {
        let record = json!({
            "character": [{"id": "hski"}, {"id": "ignored"}],
            "episode": 3
        });
        let keys = parse_primary_keys(&["character.id", "episode"]);
        assert_eq!(build_base_key(&record, &keys), "hski|3");
    }

    #[test]
    fn test_nested_key_through_mapping() {
        let record = json!({"meta": {"code": "x-01"}, "n": 1});
        let keys = parse_primary_keys(&["meta.code", "n"]);
        assert_eq!(build_base_key(&record, &keys), "x-01|1");
    }

    #[test]
    fn test_absent_values_keep_their_slot() {
        let record = json!({"id": "A", "list": [], "scalar": 5, "objs": ["str"]});
        let keys = parse_primary_keys(&["missing", "id", "list.x", "scalar.x", "objs.x"]);
        assert_eq!(build_base_key(&record, &keys), "|A|||");
    }

    #[test]
    fn test_fragment_rendering() {
        let record = json!({"b": true, "f": false, "n": null, "num": 1.5});
        let keys = parse_primary_keys(&["b", "f", "n", "num"]);
        assert_eq!(build_base_key(&record, &keys), "True|False|None|1.5");
    }

    #[test]
    fn test_container_values_use_python_repr() {
        let record: Value = serde_json::from_str(
            r#"{"tags": ["a", 1, null, true], "meta": {"k": 1, "s": "it's"}, "empty": [], "esc": ["a\\b\n"]}"#,
        )
        .unwrap();
        let keys = parse_primary_keys(&["tags", "meta", "empty", "esc"]);
        assert_eq!(
            build_base_key(&record, &keys),
            r#"['a', 1, None, True]|{'k': 1, 's': "it's"}|[]|['a\\b\n']"#
        );
    }

    #[test]
    fn test_empty_key_list_yields_empty_key() {
        let record = json!({"id": "A1"});
        assert_eq!(build_base_key(&record, &[]), "");
    }

    #[test]
    fn test_deterministic_and_only_depends_on_key_fields() {
        let keys = parse_primary_keys(&["id", "kind"]);
        let a = json!({"id": "Z", "kind": 2, "text": "one"});
        let b = json!({"kind": 2, "other": [1, 2], "id": "Z"});
        assert_eq!(build_base_key(&a, &keys), build_base_key(&a, &keys));
        assert_eq!(build_base_key(&a, &keys), build_base_key(&b, &keys));
    }
}
