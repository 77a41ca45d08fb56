//! # show 子命令 CLI 定义
//!
//! 解析单个 `.mps` 模型输出文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/show.rs`

use clap::Args;
use std::path::PathBuf;

/// show 子命令参数
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Model output file containing @model_properties blocks
    pub file: PathBuf,

    /// Print a table of every property block, not only the latest
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Print the latest properties as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Plot energy against block index to this PNG file
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
