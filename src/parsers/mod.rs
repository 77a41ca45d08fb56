//! # 解析器模块
//!
//! 提供外部模型性质输出 (`@model_properties`) 和 XYZ 结构文件的解析器。
//!
//! ## 依赖关系
//! - 被 `calculator/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: model_properties, xyz

pub mod model_properties;
pub mod xyz;

use crate::error::{GemiError, Result};
use crate::models::Molecule;
use std::path::Path;

/// 从文件路径推断格式并解析结构（所有帧）
pub fn parse_structure_file(path: &Path) -> Result<Vec<Molecule>> {
    if !path.exists() {
        return Err(GemiError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xyz" => xyz::parse_xyz_file(path),
        _ => Err(GemiError::UnsupportedFormat(format!(
            "Cannot determine format for: {} (expected .xyz)",
            path.display()
        ))),
    }
}
