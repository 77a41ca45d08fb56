//! # collect 命令实现
//!
//! 批量解析模型输出文件，按能量排序并汇总。
//!
//! ## 功能
//! - 按 glob 模式收集输出文件（可递归）
//! - 并行解析，单个文件失败不会中断整体
//! - 终端表格（最低能量的前 N 个）
//! - 完整 CSV 汇总
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `batch/`, `parsers/model_properties.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::collect::CollectArgs;
use crate::error::{GemiError, Result};
use crate::models::ModelProperties;
use crate::parsers::model_properties;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 单个输出文件的汇总
#[derive(Debug, Clone)]
struct OutputSummary {
    /// 性质块数量
    blocks: usize,
    /// 最新性质块
    current: ModelProperties,
}

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Blocks")]
    blocks: usize,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "ΔE (eV)")]
    delta_e: String,
    #[tabled(rename = "Fmax (eV/Å)")]
    fmax: String,
}

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    output::print_header("Collecting Model Properties");

    let files = FileCollector::new(&args.input)
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        return Err(GemiError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!(
        "Found {} output file(s) under '{}'",
        files.len(),
        args.input.display()
    ));

    let batch = BatchRunner::new(args.jobs).run(files, summarize_file)?;

    for (path, reason) in &batch.skipped {
        output::print_skip(&format!("{}: {}", path.display(), reason));
    }
    for (path, err) in &batch.failures {
        output::print_error(&format!("{}: {}", path.display(), err));
    }

    if batch.items.is_empty() {
        output::print_warning("No output file produced a usable property block.");
        return Ok(());
    }

    let total = batch.total();
    let mut items = batch.items;
    sort_by_energy(&mut items);

    let reference = items.first().and_then(|(_, s)| s.current.energy);
    let rows: Vec<SummaryRow> = items
        .iter()
        .take(args.top_n)
        .enumerate()
        .map(|(i, (path, summary))| SummaryRow {
            rank: i + 1,
            file: path.display().to_string(),
            blocks: summary.blocks,
            energy: output::format_value(summary.current.energy, 6),
            delta_e: output::format_value(
                summary.current.energy.zip(reference).map(|(e, e0)| e - e0),
                6,
            ),
            fmax: output::format_value(summary.current.max_force(), 4),
        })
        .collect();

    output::print_header(&format!(
        "Top {} Results by Model Energy",
        args.top_n.min(items.len())
    ));
    println!("{}", Table::new(&rows));

    save_summary_csv(&items, &args.output)?;
    output::print_done(&format!(
        "Collected {} of {} file(s) into '{}'",
        items.len(),
        total,
        args.output.display()
    ));

    Ok(())
}

/// 解析单个输出文件
fn summarize_file(path: &Path) -> ProcessResult<OutputSummary> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => return ProcessResult::Skipped("empty file".to_string()),
        Ok(_) => {}
        Err(e) => return ProcessResult::Failed(e.to_string()),
    }

    let parsed = model_properties::parse_model_properties_file(path).and_then(|results| {
        let current = model_properties::latest(&results)?.clone();
        Ok(OutputSummary {
            blocks: results.len(),
            current,
        })
    });

    match parsed {
        Ok(summary) => ProcessResult::Success(summary),
        Err(e) => ProcessResult::Failed(e.to_string()),
    }
}

/// 按能量升序排序，无能量的排在最后
fn sort_by_energy(items: &mut [(PathBuf, OutputSummary)]) {
    items.sort_by(|(_, a), (_, b)| match (a.current.energy, b.current.energy) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// 保存汇总到 CSV
fn save_summary_csv(items: &[(PathBuf, OutputSummary)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "rank",
        "file",
        "blocks",
        "energy_eV",
        "max_force_eV_per_A",
        "natoms",
        "dipole_x",
        "dipole_y",
        "dipole_z",
    ])?;

    for (i, (path, summary)) in items.iter().enumerate() {
        let props = &summary.current;
        let dipole = |k: usize| {
            props
                .dipole
                .map(|d| format!("{:.6}", d[k]))
                .unwrap_or_default()
        };

        wtr.write_record([
            (i + 1).to_string(),
            path.display().to_string(),
            summary.blocks.to_string(),
            props.energy.map(|e| format!("{:.10}", e)).unwrap_or_default(),
            props
                .max_force()
                .map(|f| format!("{:.6}", f))
                .unwrap_or_default(),
            props.num_atoms().map(|n| n.to_string()).unwrap_or_default(),
            dipole(0),
            dipole(1),
            dipole(2),
        ])?;
    }

    wtr.flush().map_err(|e| GemiError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gemi-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_summarize_file_outcomes() {
        let dir = scratch_dir("summarize");

        let good = dir.join("good.mps");
        fs::write(
            &good,
            "@model_properties_1\n@energy\n-1.0\n@model_properties_2\n@energy\n-2.0\n@forces\n0 3 4\n",
        )
        .unwrap();
        match summarize_file(&good) {
            ProcessResult::Success(s) => {
                assert_eq!(s.blocks, 2);
                assert_eq!(s.current.energy, Some(-2.0));
                assert_eq!(s.current.max_force(), Some(5.0));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let empty = dir.join("empty.mps");
        fs::write(&empty, "").unwrap();
        assert!(matches!(summarize_file(&empty), ProcessResult::Skipped(_)));

        let crashed = dir.join("crashed.mps");
        fs::write(&crashed, "segmentation fault\n").unwrap();
        assert!(matches!(summarize_file(&crashed), ProcessResult::Failed(_)));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_sort_and_csv() {
        let dir = scratch_dir("summary-csv");
        let summary = |energy: Option<f64>| OutputSummary {
            blocks: 1,
            current: ModelProperties {
                energy,
                dipole: Some([0.0, 0.0, 1.5]),
                ..Default::default()
            },
        };

        let mut items = vec![
            (PathBuf::from("none.mps"), summary(None)),
            (PathBuf::from("high.mps"), summary(Some(-1.0))),
            (PathBuf::from("low.mps"), summary(Some(-3.0))),
        ];
        sort_by_energy(&mut items);
        let order: Vec<&str> = items.iter().filter_map(|(p, _)| p.to_str()).collect();
        assert_eq!(order, vec!["low.mps", "high.mps", "none.mps"]);

        let csv_path = dir.join("summary.csv");
        save_summary_csv(&items, &csv_path).unwrap();
        let text = fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("rank,file,blocks,energy_eV"));
        assert_eq!(lines[1], "1,low.mps,1,-3.0000000000,,,0.000000,0.000000,1.500000");

        let _ = fs::remove_dir_all(&dir);
    }
}
