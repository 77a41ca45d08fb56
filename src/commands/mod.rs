//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `calculator/`, `batch/`, `utils/`
//! - 子模块: show, collect, run

pub mod collect;
pub mod run;
pub mod show;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Show(args) => show::execute(args),
        Commands::Collect(args) => collect::execute(args),
        Commands::Run(args) => run::execute(args),
    }
}
