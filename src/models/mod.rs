//! # 数据模型模块
//!
//! 定义分子结构和外部模型计算结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `calculator/` 和 `commands/` 使用
//! - 子模块: molecule, properties

pub mod molecule;
pub mod properties;

pub use molecule::{Atom, Molecule};
pub use properties::{ModelProperties, PropertyKey};
