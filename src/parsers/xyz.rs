//! # XYZ 格式读写
//!
//! 读取单帧或多帧 XYZ 文件（NEB images 通常存成多帧），
//! 并为外部模型写出普通 XYZ 输入。
//!
//! ## XYZ 格式说明
//! ```text
//! 3                      # number of atoms
//! water                  # comment line
//! O  0.000  0.000  0.000
//! H  0.757  0.586  0.000
//! H -0.757  0.586  0.000
//! (next frame ...)
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `calculator/` 使用
//! - 使用 `models/molecule.rs`

use crate::error::{GemiError, Result};
use crate::models::{Atom, Molecule};
use std::fs;
use std::path::Path;

/// 解析 XYZ 文件（可能包含多帧）
pub fn parse_xyz_file(path: &Path) -> Result<Vec<Molecule>> {
    let content = fs::read_to_string(path).map_err(|e| GemiError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xyz_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 从字符串内容解析所有帧
pub fn parse_xyz_content(content: &str, default_name: &str) -> Result<Vec<Molecule>> {
    let lines: Vec<&str> = content.lines().collect();
    let error = |reason: String| GemiError::ParseError {
        format: "xyz".to_string(),
        path: default_name.to_string(),
        reason,
    };

    let mut frames = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        // 帧之间或文件末尾的空行
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        let natoms: usize = lines[i]
            .trim()
            .parse()
            .map_err(|_| error(format!("Invalid atom count at line {}", i + 1)))?;

        let frame_end = i.checked_add(2).and_then(|s| s.checked_add(natoms));
        let frame_end = match frame_end {
            Some(end) if end <= lines.len() => end,
            _ => {
                return Err(error(format!(
                    "Frame {} expects {} atoms but the file ends early",
                    frames.len() + 1,
                    natoms
                )))
            }
        };

        let comment = lines[i + 1].trim().to_string();
        let mut atoms = Vec::with_capacity(natoms);

        for (offset, line) in lines[i + 2..frame_end].iter().enumerate() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            let line_no = i + 3 + offset;
            if parts.len() < 4 {
                return Err(error(format!("Invalid atom line {}", line_no)));
            }

            let mut position = [0.0; 3];
            for (k, value) in position.iter_mut().enumerate() {
                *value = parts[k + 1]
                    .parse()
                    .map_err(|_| error(format!("Invalid coordinate at line {}", line_no)))?;
            }
            atoms.push(Atom::new(parts[0], position));
        }

        let name = if frames.is_empty() {
            default_name.to_string()
        } else {
            format!("{}-{:02}", default_name, frames.len())
        };
        frames.push(Molecule::new(name, atoms).with_comment(comment));

        i = frame_end;
    }

    if frames.is_empty() {
        return Err(error("No structure found".to_string()));
    }

    Ok(frames)
}

/// 生成 XYZ 格式字符串
pub fn to_xyz_string(molecule: &Molecule) -> String {
    let mut result = String::new();

    result.push_str(&format!("{}\n", molecule.atoms.len()));
    let comment = if molecule.comment.is_empty() {
        molecule.name.as_str()
    } else {
        molecule.comment.as_str()
    };
    result.push_str(&format!("{}\n", comment));

    for atom in &molecule.atoms {
        result.push_str(&format!(
            "{:<3} {:16.10} {:16.10} {:16.10}\n",
            atom.element, atom.position[0], atom.position[1], atom.position[2]
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_frame() {
        let content = r#"3
water molecule
O  0.000  0.000  0.000
H  0.757  0.586  0.000
H -0.757  0.586  0.000
"#;
        let frames = parse_xyz_content(content, "water").unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].name, "water");
        assert_eq!(frames[0].comment, "water molecule");
        assert_eq!(frames[0].atoms.len(), 3);
        assert_eq!(frames[0].atoms[2].element, "H");
        assert!((frames[0].atoms[2].position[0] + 0.757).abs() < 1e-12);
    }

    #[test]
    fn test_parse_multi_frame_images() {
        let content = r#"2
image 0
H 0.0 0.0 0.0
H 0.0 0.0 0.74
2
image 1
H 0.0 0.0 0.0
H 0.0 0.0 0.90

"#;
        let frames = parse_xyz_content(content, "rx").unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].name, "rx");
        assert_eq!(frames[1].name, "rx-01");
        assert!((frames[1].atoms[1].position[2] - 0.90).abs() < 1e-12);
    }

    #[test]
    fn test_truncated_frame_fails() {
        let content = "3\ncomment\nO 0 0 0\nH 0 0 1\n";
        assert!(matches!(
            parse_xyz_content(content, "bad"),
            Err(GemiError::ParseError { .. })
        ));
    }

    #[test]
    fn test_huge_atom_count_fails() {
        let content = "18446744073709551615\ncomment\nH 0 0 0\n";
        assert!(matches!(
            parse_xyz_content(content, "big"),
            Err(GemiError::ParseError { .. })
        ));
    }

    #[test]
    fn test_bad_coordinate_fails() {
        let content = "1\ncomment\nO 0 zero 0\n";
        assert!(parse_xyz_content(content, "bad").is_err());
        assert!(parse_xyz_content("", "empty").is_err());
    }

    #[test]
    fn test_xyz_round_trip() {
        let molecule = Molecule::new(
            "co",
            vec![
                Atom::new("C", [0.0, 0.0, 0.0]),
                Atom::new("O", [0.0, 0.0, 1.128]),
            ],
        );
        let text = to_xyz_string(&molecule);
        assert!(text.starts_with("2\nco\n"));

        let parsed = parse_xyz_content(&text, "co").unwrap();
        assert_eq!(parsed[0].atoms.len(), 2);
        assert_eq!(parsed[0].atoms[1].element, "O");
        assert!((parsed[0].atoms[1].position[2] - 1.128).abs() < 1e-9);
    }
}
