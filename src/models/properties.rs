//! # 模型性质数据模型
//!
//! 存储外部模型 (GEMI) 一次计算输出的性质：能量、原子力、偶极矩。
//!
//! ## 依赖关系
//! - 被 `parsers/model_properties.rs` 构建
//! - 被 `calculator/`, `commands/` 使用

use serde::Serialize;

/// 已识别的性质键
///
/// 未识别的键保留名称，在细化时忽略。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    Energy,
    Forces,
    Dipole,
    Unknown(String),
}

impl PropertyKey {
    /// 从 `@key` 行中去掉 `@` 后的文本构造
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "energy" => PropertyKey::Energy,
            "forces" => PropertyKey::Forces,
            "dipole" => PropertyKey::Dipole,
            other => PropertyKey::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PropertyKey::Energy => "energy",
            PropertyKey::Forces => "forces",
            PropertyKey::Dipole => "dipole",
            PropertyKey::Unknown(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一个性质块经细化后的结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelProperties {
    /// 所在块号（其前面块分隔行的个数）
    #[serde(skip)]
    pub block: usize,

    /// 总能量 (eV)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,

    /// 每个原子的受力 (eV/Å)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forces: Option<Vec<[f64; 3]>>,

    /// 偶极矩
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dipole: Option<[f64; 3]>,

    /// 块中出现但未识别的键
    #[serde(skip)]
    pub ignored_keys: Vec<String>,
}

impl ModelProperties {
    /// 原子数（由受力行数推断）
    pub fn num_atoms(&self) -> Option<usize> {
        self.forces.as_ref().map(|f| f.len())
    }

    /// 最大单原子受力模长 (fmax)
    pub fn max_force(&self) -> Option<f64> {
        let forces = self.forces.as_ref()?;
        forces
            .iter()
            .map(|f| (f[0] * f[0] + f[1] * f[1] + f[2] * f[2]).sqrt())
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.max(x))))
    }

    /// 偶极矩模长
    pub fn dipole_magnitude(&self) -> Option<f64> {
        self.dipole
            .map(|d| (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt())
    }

    /// 导出为 JSON，向量为普通嵌套数组
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_key_from_name() {
        assert_eq!(PropertyKey::from_name("energy"), PropertyKey::Energy);
        assert_eq!(PropertyKey::from_name(" forces "), PropertyKey::Forces);
        assert_eq!(PropertyKey::from_name("dipole"), PropertyKey::Dipole);
        assert_eq!(
            PropertyKey::from_name("stress"),
            PropertyKey::Unknown("stress".to_string())
        );
        assert_eq!(PropertyKey::from_name("stress").name(), "stress");
    }

    #[test]
    fn test_max_force_and_atoms() {
        let props = ModelProperties {
            forces: Some(vec![[3.0, 4.0, 0.0], [0.0, 0.0, 1.0]]),
            ..Default::default()
        };
        assert_eq!(props.num_atoms(), Some(2));
        assert!((props.max_force().unwrap() - 5.0).abs() < 1e-12);

        let empty = ModelProperties {
            forces: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(empty.max_force(), None);
        assert_eq!(ModelProperties::default().num_atoms(), None);
    }

    #[test]
    fn test_to_json_skips_missing_fields() {
        let props = ModelProperties {
            energy: Some(-1.5),
            dipole: Some([0.0, 0.0, 2.0]),
            ignored_keys: vec!["stress".to_string()],
            ..Default::default()
        };
        let json = props.to_json().unwrap();
        assert_eq!(json, r#"{"energy":-1.5,"dipole":[0.0,0.0,2.0]}"#);
        assert!((props.dipole_magnitude().unwrap() - 2.0).abs() < 1e-12);
    }
}
