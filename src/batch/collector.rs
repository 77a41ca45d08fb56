//! # 文件收集器
//!
//! 根据输入路径和 glob 模式收集待解析的模型输出文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 逗号分隔的多个 glob 模式（如 `*.mps,*.out`）
//! - 可选递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/collect.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{GemiError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器，默认匹配 `*.mps`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    GemiError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（排序后）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(GemiError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        if self.patterns.is_empty() {
            return filename.ends_with(".mps");
        }

        self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(".")
            .with_pattern("*.mps, image-??.out")
            .unwrap();
        assert!(collector.matches_patterns(Path::new("jobs/gemi.mps")));
        assert!(collector.matches_patterns(Path::new("image-03.out")));
        assert!(!collector.matches_patterns(Path::new("image-003.out")));
        assert!(!collector.matches_patterns(Path::new("gemi.xyz")));

        let default = FileCollector::new(".");
        assert!(default.matches_patterns(Path::new("a.mps")));
        assert!(!default.matches_patterns(Path::new("a.log")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            FileCollector::new(".").with_pattern("[abc"),
            Err(GemiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_collect_recursive() {
        let dir = std::env::temp_dir().join(format!("gemi-collect-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("idpp")).unwrap();
        fs::write(dir.join("b.mps"), "").unwrap();
        fs::write(dir.join("a.mps"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("idpp").join("c.mps"), "").unwrap();

        let flat = FileCollector::new(&dir).collect().unwrap();
        assert_eq!(flat, vec![dir.join("a.mps"), dir.join("b.mps")]);

        let deep = FileCollector::new(&dir).recursive(true).collect().unwrap();
        assert_eq!(deep.len(), 3);

        assert!(FileCollector::new(dir.join("missing")).collect().is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
