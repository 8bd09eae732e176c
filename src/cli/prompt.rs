//! 交互输入：启动时询问 base 目录与翻译目录，留空使用默认值

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

// === 常量定义（消除魔法值） ===
pub const DEFAULT_BASE_DIR: &str = "gakumasu-diff/json";
pub const DEFAULT_TRANSLATED_DIR: &str = "pretranslate_todo/translated_out";
pub const DEFAULT_OUTPUT_DIR: &str = "merged";
pub const PROMPT_BASE_DIR: &str = "源json文件夹: ";
pub const PROMPT_TRANSLATED_DIR: &str = "预翻译完成文件夹: ";

/// 打印提示并读取一行，空行或 EOF 时返回默认值
pub fn prompt_dir<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &str,
) -> io::Result<PathBuf> {
    output.write_all(label.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok(PathBuf::from(if answer.is_empty() { default } else { answer }))
}

/// 已给出的目录直接使用；否则交互询问或取默认值
pub fn resolve_dir(given: Option<PathBuf>, interactive: bool, label: &str, default: &str) -> io::Result<PathBuf> {
    match given {
        Some(dir) => Ok(dir),
        None if interactive => prompt_dir(&mut io::stdin().lock(), &mut io::stdout(), label, default),
        None => Ok(PathBuf::from(default)),
    }
}
