//! 数组编码：翻译工具把数组字段序列化为带保留标记的单个字符串

/// 数组编码前缀
pub const LA_F: &str = "[LA_F]";
/// 数组元素分隔符
pub const LA_N_F: &str = "[LA_N_F]";

/// 解码 `[LA_F]a[LA_N_F]b` 形式的字符串。
///
/// 缺少前缀时返回 `None`；前缀后为空时返回空数组。
/// 注意 `[LA_F]` 本身无法区分 `[]` 与 `[""]`，这里按空数组处理，
/// 单元素空串的情况交给特殊规则判断。
pub fn decode_marker_array(raw: &str) -> Option<Vec<String>> {
    let remaining = raw.strip_prefix(LA_F)?;
    if remaining.is_empty() {
        return Some(Vec::new());
    }
    Some(remaining.split(LA_N_F).map(str::to_string).collect())
}

/// 判断解码结果是否为单个空串
pub fn is_singleton_empty(items: &[String]) -> bool {
    matches!(items, [only] if only.is_empty())
}
