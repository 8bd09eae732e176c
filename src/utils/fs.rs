//! IO helper: safe file read/write for JSON

use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;
use crate::model::data_core::ImportError;

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, ImportError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    serde_json::from_reader(rdr).map_err(|source| ImportError::Parse {
        path: p.to_path_buf(),
        source,
    })
}

/// 格式化为两空格缩进的JSON文本，非ASCII字符原样保留
pub fn render_json(value: &Value, p: &Path) -> Result<String, ImportError> {
    serde_json::to_string_pretty(value).map_err(|source| ImportError::Parse {
        path: p.to_path_buf(),
        source,
    })
}

/// 写出文本文件
pub fn write_text_file(p: &Path, text: &str) -> Result<(), ImportError> {
    std::fs::write(p, text)?;
    Ok(())
}

/// 确保目录存在（不存在则递归创建）
pub fn ensure_dir(p: &Path) -> Result<(), ImportError> {
    if !p.is_dir() {
        std::fs::create_dir_all(p)?;
        tracing::info!("已创建输出目录: {}", p.display());
    }
    Ok(())
}
