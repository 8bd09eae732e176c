use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::prompt::DEFAULT_OUTPUT_DIR;

#[derive(Parser, Debug)]
#[command(name = "la-merge")]
#[command(about = "将翻译后的 fullKey 映射合并回本地化 JSON 数据", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub batch: BatchArgs,

    /// 特殊规则文件（替换内置规则表）
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 批量模式参数（默认命令）
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// 源json文件夹（缺省时交互输入）
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// 预翻译完成文件夹（缺省时交互输入）
    #[arg(short, long)]
    pub translated_dir: Option<PathBuf>,

    /// 输出文件夹
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// 某个文件失败后继续处理其余文件
    #[arg(short, long)]
    pub keep_going: bool,

    /// 不进行交互输入，直接使用默认目录
    #[arg(long)]
    pub no_prompt: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 合并单个文件
    File {
        /// base 文件
        #[arg(long)]
        base: PathBuf,

        /// 翻译文件
        #[arg(long)]
        translated: PathBuf,

        /// 输出文件（文件名决定适用的特殊规则）
        #[arg(long)]
        output: PathBuf,
    },
}
