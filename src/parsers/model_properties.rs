//! # 外部模型性质输出解析器
//!
//! 解析外部模型进程写出的 `.mps` 文本流，得到按顺序排列的性质记录，
//! 最后一条记录即当前结果（迭代进程总是把最新计算追加到末尾）。
//!
//! ## 格式说明
//! ```text
//! <preamble, ignored>
//! @model_properties_<anything>   # block marker
//! @energy                        # key marker
//! -123.4567
//! @forces
//! 0.1 0.2 0.3                    # one line per atom
//! @dipole
//! 1.0 2.0 3.0
//! @model_properties_<anything>
//! ...
//! ```
//! - `#` 开头的行为注释
//! - 任何键之前的数据行被丢弃
//! - 任一块解析失败则整个流解析失败
//!
//! ## 依赖关系
//! - 被 `calculator/`, `commands/show.rs`, `commands/collect.rs` 使用
//! - 使用 `models/properties.rs`

use crate::error::{GemiError, Result};
use crate::models::{ModelProperties, PropertyKey};
use regex::Regex;
use std::fs;
use std::path::Path;

/// 块分隔行
const BLOCK_MARKER: &str = r"(?m)^@model_properties_.*$";

/// 一个性质块中每个键对应的原始数据行
#[derive(Debug, Default)]
struct PropertyEntry<'a> {
    keys: Vec<(PropertyKey, Vec<&'a str>)>,
}

impl<'a> PropertyEntry<'a> {
    /// 声明键，返回其位置；重复声明继续追加到同一键
    fn declare(&mut self, key: PropertyKey) -> usize {
        match self.keys.iter().position(|(k, _)| *k == key) {
            Some(idx) => idx,
            None => {
                self.keys.push((key, Vec::new()));
                self.keys.len() - 1
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 解析外部模型输出文件
pub fn parse_model_properties_file(path: &Path) -> Result<Vec<ModelProperties>> {
    let content = fs::read_to_string(path).map_err(|e| GemiError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse(&content)
}

/// 从字符串内容解析所有性质块
///
/// 块号为其前面块分隔行的个数，第一个分隔行之前的内容为 0 号块。
pub fn parse(stream: &str) -> Result<Vec<ModelProperties>> {
    let marker = Regex::new(BLOCK_MARKER).map_err(|e| GemiError::Other(e.to_string()))?;

    let mut results = Vec::new();
    for (block, part) in marker.split(stream).enumerate() {
        if part.trim().is_empty() {
            continue;
        }

        let entry = scan_block(part);
        if entry.is_empty() {
            continue;
        }

        results.push(refine_entry(&entry, block)?);
    }

    Ok(results)
}

/// 取最新（最后）一条记录
pub fn latest(results: &[ModelProperties]) -> Result<&ModelProperties> {
    results.last().ok_or(GemiError::EmptyResult)
}

/// 逐行扫描一个块，按键收集原始数据行
fn scan_block(part: &str) -> PropertyEntry<'_> {
    let mut entry = PropertyEntry::default();
    let mut active: Option<usize> = None;

    for line in part.lines() {
        if let Some(name) = line.strip_prefix('@') {
            // 空键名不开启新键，其后的数据行与键前数据一样被丢弃
            active = if name.trim().is_empty() {
                None
            } else {
                Some(entry.declare(PropertyKey::from_name(name)))
            };
        } else if line.starts_with('#') || line.trim().is_empty() {
            continue;
        } else if let Some(idx) = active {
            entry.keys[idx].1.push(line);
        }
    }

    entry
}

/// 将原始数据行细化为数值记录
fn refine_entry(entry: &PropertyEntry<'_>, block: usize) -> Result<ModelProperties> {
    let mut props = ModelProperties {
        block,
        ..Default::default()
    };

    for (key, lines) in &entry.keys {
        match key {
            PropertyKey::Energy => {
                let line = first_line(lines, key, block)?;
                let [energy] = parse_floats::<1>(line, key, block)?;
                props.energy = Some(energy);
            }
            PropertyKey::Forces => {
                let forces = lines
                    .iter()
                    .map(|line| parse_floats::<3>(line, key, block))
                    .collect::<Result<Vec<_>>>()?;
                props.forces = Some(forces);
            }
            PropertyKey::Dipole => {
                let line = first_line(lines, key, block)?;
                props.dipole = Some(parse_floats::<3>(line, key, block)?);
            }
            PropertyKey::Unknown(name) => props.ignored_keys.push(name.clone()),
        }
    }

    Ok(props)
}

fn first_line<'a>(lines: &[&'a str], key: &PropertyKey, block: usize) -> Result<&'a str> {
    lines.first().copied().ok_or_else(|| GemiError::PropertyParse {
        block,
        key: key.to_string(),
        reason: "key declared without a data line".to_string(),
    })
}

/// 解析恰好 N 个空白分隔的浮点数
fn parse_floats<const N: usize>(line: &str, key: &PropertyKey, block: usize) -> Result<[f64; N]> {
    let numeric_error = |reason: String| GemiError::NumericFormat {
        block,
        key: key.to_string(),
        line: line.to_string(),
        reason,
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != N {
        return Err(numeric_error(format!(
            "expected {} value(s), found {}",
            N,
            tokens.len()
        )));
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(&tokens) {
        *value = token
            .parse()
            .map_err(|_| numeric_error(format!("'{}' is not a number", token)))?;
    }

    Ok(values)
}
