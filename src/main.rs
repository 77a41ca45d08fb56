//! # gemi - General External Model Interface
//!
//! 调用外部计算化学模型并解析其 `@model_properties` 输出。
//!
//! ## 子命令
//! - `show`    - 解析单个模型输出，报告最新性质块
//! - `collect` - 批量解析模型输出并汇总
//! - `run`     - 对 XYZ 中每个结构调用外部模型
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── calculator/(外部模型调用)
//!   │     ├── batch/     (批量并行解析)
//!   │     ├── parsers/   (性质输出 / XYZ 解析器)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod calculator;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
