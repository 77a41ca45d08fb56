//! # 外部模型计算器 (GEMI)
//!
//! General External Model Interface：把结构写成 `<label>.xyz`，
//! 在工作目录中执行命令模板，进程退出后读取 `<label>.mps` 并取最新性质块。
//!
//! 命令模板中的 `PREFIX` 会被替换为 label，例如默认模板
//! `runner PREFIX.xyz > PREFIX.mps`。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `parsers/xyz.rs`, `parsers/model_properties.rs`

use crate::error::{GemiError, Result};
use crate::models::{ModelProperties, Molecule};
use crate::parsers::{model_properties, xyz};

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 默认命令模板
pub const DEFAULT_COMMAND: &str = "runner PREFIX.xyz > PREFIX.mps";

/// 命令模板中的文件名占位符
const PREFIX_PLACEHOLDER: &str = "PREFIX";

/// 外部模型配置
#[derive(Debug, Clone)]
pub struct ExternalModel {
    /// 命令模板，通过 `sh -c` 执行
    pub command: String,
    /// 输入/输出文件名前缀
    pub label: String,
    /// 工作目录
    pub workdir: PathBuf,
}

impl Default for ExternalModel {
    fn default() -> Self {
        ExternalModel {
            command: DEFAULT_COMMAND.to_string(),
            label: "gemi".to_string(),
            workdir: PathBuf::from("."),
        }
    }
}

impl ExternalModel {
    pub fn new(command: impl Into<String>) -> Self {
        ExternalModel {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// 结构输入文件路径
    pub fn input_path(&self) -> PathBuf {
        self.workdir.join(format!("{}.xyz", self.label))
    }

    /// 性质输出文件路径
    pub fn output_path(&self) -> PathBuf {
        self.workdir.join(format!("{}.mps", self.label))
    }

    /// 替换占位符后的实际命令行
    pub fn command_line(&self) -> String {
        self.command.replace(PREFIX_PLACEHOLDER, &self.label)
    }

    /// 写出结构输入文件
    pub fn write_input(&self, molecule: &Molecule) -> Result<()> {
        fs::create_dir_all(&self.workdir).map_err(|e| GemiError::FileWriteError {
            path: self.workdir.display().to_string(),
            source: e,
        })?;

        let input = self.input_path();
        fs::write(&input, xyz::to_xyz_string(molecule)).map_err(|e| GemiError::FileWriteError {
            path: input.display().to_string(),
            source: e,
        })
    }

    /// 执行外部命令并等待其退出
    pub fn execute(&self) -> Result<()> {
        let cmdline = self.command_line();

        let output = Command::new("sh")
            .arg("-c")
            .arg(&cmdline)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| GemiError::CommandNotFound {
                command: cmdline.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(GemiError::CommandFailed {
                command: cmdline,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// 读取输出中的所有性质块
    pub fn read_all_results(&self) -> Result<Vec<ModelProperties>> {
        let output = self.output_path();
        if !output.exists() {
            return Err(GemiError::FileNotFound {
                path: output.display().to_string(),
            });
        }

        model_properties::parse_model_properties_file(&output)
    }

    /// 读取最新性质块，要求包含能量和受力
    pub fn read_results(&self) -> Result<ModelProperties> {
        let results = self.read_all_results()?;
        let current = model_properties::latest(&results)?;

        let output = self.output_path();
        require(current.energy.is_some(), "energy", &output)?;
        require(current.forces.is_some(), "forces", &output)?;

        Ok(current.clone())
    }

    /// 写输入 -> 执行 -> 读结果
    pub fn calculate(&self, molecule: &Molecule) -> Result<ModelProperties> {
        self.write_input(molecule)?;
        self.execute()?;
        self.read_results()
    }
}

fn require(present: bool, property: &str, path: &Path) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(GemiError::MissingProperty {
            property: property.to_string(),
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Atom;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gemi-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn h2() -> Molecule {
        Molecule::new(
            "h2",
            vec![
                Atom::new("H", [0.0, 0.0, 0.0]),
                Atom::new("H", [0.0, 0.0, 0.74]),
            ],
        )
    }

    #[test]
    fn test_command_line_substitutes_prefix() {
        let model = ExternalModel::default().with_label("image-03");
        assert_eq!(model.command_line(), "runner image-03.xyz > image-03.mps");
        assert_eq!(model.input_path(), PathBuf::from("./image-03.xyz"));
        assert_eq!(model.output_path(), PathBuf::from("./image-03.mps"));
    }

    #[test]
    fn test_calculate_reads_latest_block() {
        let dir = scratch_dir("calculate");
        let model = ExternalModel::new(
            r"test -s PREFIX.xyz && printf '@model_properties_1\n@energy\n-1.0\n@forces\n0 0 1\n0 0 -1\n@model_properties_2\n@energy\n-1.5\n@forces\n0 0 0.5\n0 0 -0.5\n' > PREFIX.mps",
        )
        .with_label("h2")
        .with_workdir(&dir);

        let props = model.calculate(&h2()).unwrap();
        assert_eq!(props.energy, Some(-1.5));
        assert_eq!(props.num_atoms(), Some(2));
        assert!(dir.join("h2.xyz").exists());
        assert_eq!(model.read_all_results().unwrap().len(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_command_is_reported() {
        let dir = scratch_dir("failed");
        let model = ExternalModel::new("echo broken >&2; exit 3").with_workdir(&dir);

        match model.calculate(&h2()) {
            Err(GemiError::CommandFailed { stderr, .. }) => assert_eq!(stderr, "broken"),
            other => panic!("unexpected result: {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_output_and_properties() {
        let dir = scratch_dir("missing");
        let silent = ExternalModel::new("true").with_workdir(&dir);
        assert!(matches!(
            silent.calculate(&h2()),
            Err(GemiError::FileNotFound { .. })
        ));

        let no_forces = ExternalModel::new(r"printf '@model_properties_1\n@energy\n-2.0\n' > PREFIX.mps")
            .with_workdir(&dir);
        match no_forces.calculate(&h2()) {
            Err(GemiError::MissingProperty { property, .. }) => assert_eq!(property, "forces"),
            other => panic!("unexpected result: {:?}", other),
        }

        let empty = ExternalModel::new("printf 'runner crashed\\n' > PREFIX.mps").with_workdir(&dir);
        assert!(matches!(
            empty.calculate(&h2()),
            Err(GemiError::EmptyResult)
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
