//! 程序入口：初始化日志、解析参数，执行批量或单文件合并

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use la_merge::cli::args::BatchArgs;
use la_merge::cli::prompt::{
    resolve_dir, DEFAULT_BASE_DIR, DEFAULT_TRANSLATED_DIR, PROMPT_BASE_DIR, PROMPT_TRANSLATED_DIR,
};
use la_merge::cli::{Cli, Commands};
use la_merge::utils::fs::ensure_dir;
use la_merge::{import_file, run, BatchConfig, ImportError, SpecialRules};

fn load_rules(path: Option<&Path>) -> anyhow::Result<SpecialRules> {
    match path {
        Some(p) => SpecialRules::load(p).with_context(|| format!("加载特殊规则失败: {}", p.display())),
        None => Ok(SpecialRules::builtin()),
    }
}

fn cmd_batch(args: BatchArgs, rules: &SpecialRules) -> anyhow::Result<()> {
    let interactive = !args.no_prompt && std::io::stdin().is_terminal();
    let config = BatchConfig {
        base_dir: resolve_dir(args.base_dir, interactive, PROMPT_BASE_DIR, DEFAULT_BASE_DIR)?,
        translated_dir: resolve_dir(args.translated_dir, interactive, PROMPT_TRANSLATED_DIR, DEFAULT_TRANSLATED_DIR)?,
        output_dir: args.output_dir,
        keep_going: args.keep_going,
    };

    let summary = run(&config, rules)?;
    if !summary.is_success() {
        for failure in &summary.failed {
            eprintln!("失败: {}: {}", failure.translated.display(), failure.error);
        }
        return Err(ImportError::Batch {
            failed: summary.failed.len(),
        }
        .into());
    }
    Ok(())
}

fn cmd_file(base: &Path, translated: &Path, output: &Path, rules: &SpecialRules) -> anyhow::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    import_file(base, translated, output, rules)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 初始化日志输出
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    let result = load_rules(cli.rules.as_deref()).and_then(|rules| match cli.command {
        Some(Commands::File { base, translated, output }) => cmd_file(&base, &translated, &output, &rules),
        None => cmd_batch(cli.batch, &rules),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
