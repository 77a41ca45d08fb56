//! # 分子结构数据模型
//!
//! 外部模型的输入结构：元素符号 + 笛卡尔坐标 (Å)，无晶格。
//!
//! ## 依赖关系
//! - 被 `parsers/xyz.rs` 和 `calculator/` 使用
//! - 无外部模块依赖

use std::collections::BTreeMap;

/// 原子信息
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z] (Å)
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 分子结构（或 NEB 路径上的一个 image）
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    /// 结构名称
    pub name: String,

    /// XYZ 注释行
    pub comment: String,

    /// 原子列表
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(name: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Molecule {
            name: name.into(),
            comment: String::new(),
            atoms,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula() {
        let water = Molecule::new(
            "water",
            vec![
                Atom::new("O", [0.0, 0.0, 0.0]),
                Atom::new("H", [0.76, 0.59, 0.0]),
                Atom::new("H", [-0.76, 0.59, 0.0]),
            ],
        );
        assert_eq!(water.formula(), "H2O");
        assert!(water.comment.is_empty());
    }
}
