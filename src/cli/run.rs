//! # run 子命令 CLI 定义
//!
//! 对 XYZ 文件中的每个结构调用外部模型
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use crate::calculator::DEFAULT_COMMAND;
use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// XYZ file with one or more structures (e.g. NEB images)
    pub input: PathBuf,

    /// Command template; PREFIX is replaced by the file label
    #[arg(long, env = "GEMI_COMMAND", default_value = DEFAULT_COMMAND)]
    pub command: String,

    /// Label used for <label>.xyz / <label>.mps
    #[arg(long, default_value = "gemi")]
    pub label: String,

    /// Working directory for model input/output files
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Print each result as a JSON line
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the highest-energy structure (transition-state guess) to this XYZ file
    #[arg(long)]
    pub ts_output: Option<PathBuf>,
}
