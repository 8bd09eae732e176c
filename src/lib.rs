//! 译文回填工具库
//!
//! 把第三方翻译工具导出的 `{fullKey: 译文}` 映射合并回结构化的本地化 JSON，
//! 输出与 base 文件结构一致、字段顺序不变的新文件

pub mod cli;
pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::batch::{run, BatchConfig, BatchSummary};
pub use model::data_core::{import_file, BaseDocument, ImportError, ImportReport};
pub use model::key_builder::{build_base_key, PrimaryKeyPath};
pub use model::merger::{merge_translations, MergeStats, TranslationMap};
pub use model::special_rules::{FileRules, RuleKind, SpecialRules};
