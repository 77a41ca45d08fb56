//! # collect 子命令 CLI 定义
//!
//! 批量解析模型输出并汇总为表格和 CSV
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use clap::Args;
use std::path::PathBuf;

/// collect 子命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory (or single file) containing model output files
    pub input: PathBuf,

    /// Glob pattern(s) for output files, comma-separated
    #[arg(short, long, default_value = "*.mps")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Number of lowest-energy results to print
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Filename for the CSV summary
    #[arg(short, long, default_value = "model_properties.csv")]
    pub output: PathBuf,
}
