//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `show`: 解析单个模型输出文件
//! - `collect`: 批量解析并汇总模型输出
//! - `run`: 调用外部模型计算结构（可多帧）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: show, collect, run

pub mod collect;
pub mod run;
pub mod show;

use clap::{Parser, Subcommand};

/// gemi - General External Model Interface
#[derive(Parser)]
#[command(name = "gemi")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Run external chemistry models and parse their @model_properties output", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Parse one model output file and report its latest properties
    Show(show::ShowArgs),

    /// Parse many model output files and write a summary table/CSV
    Collect(collect::CollectArgs),

    /// Run the external model on every structure in an XYZ file
    Run(run::RunArgs),
}
