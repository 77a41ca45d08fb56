//! # 统一错误处理模块
//!
//! 定义 gemi 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// gemi 统一错误类型
#[derive(Error, Debug)]
pub enum GemiError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 模型输出 (@model_properties) 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed property block #{block} at key '@{key}': {reason}")]
    PropertyParse {
        block: usize,
        key: String,
        reason: String,
    },

    #[error("Bad numeric data in property block #{block} at key '@{key}': {reason}\n  line: {line:?}")]
    NumericFormat {
        block: usize,
        key: String,
        line: String,
        reason: String,
    },

    #[error("No model property blocks found in output (the external model probably failed)")]
    EmptyResult,

    #[error("Model output {path} has no '{property}' in its latest property block")]
    MissingProperty { property: String, path: String },

    // ─────────────────────────────────────────────────────────────
    // 结构文件解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to launch external command '{command}': {reason}")]
    CommandNotFound { command: String, reason: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GemiError>;
