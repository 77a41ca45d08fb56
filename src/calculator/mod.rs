//! # 计算器模块
//!
//! 外部模型调用边界：写输入、启动外部进程、读取输出。
//! 进程生命周期由这里负责，文本解析交给 `parsers/model_properties.rs`。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 子模块: external

pub mod external;

pub use external::{ExternalModel, DEFAULT_COMMAND};
