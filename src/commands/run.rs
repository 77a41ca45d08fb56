//! # run 命令实现
//!
//! 对 XYZ 文件中的每个结构（如 NEB images）调用外部模型。
//!
//! ## 功能
//! - 每帧写入 `<label>-NN.xyz`，执行外部命令，读取 `<label>-NN.mps`
//! - 任一帧失败立即中止，并指出是哪一帧
//! - 能量/受力汇总表格，标出最高能量结构（过渡态初猜）
//! - 可选写出最高能量结构
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `calculator/`, `parsers/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::calculator::ExternalModel;
use crate::cli::run::RunArgs;
use crate::error::{GemiError, Result};
use crate::models::ModelProperties;
use crate::parsers::{self, xyz};
use crate::utils::{output, progress};

use std::fs;
use tabled::{Table, Tabled};

/// 结果表格行
#[derive(Debug, Clone, Tabled)]
struct ImageRow {
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "ΔE (eV)")]
    delta_e: String,
    #[tabled(rename = "Fmax (eV/Å)")]
    fmax: String,
    #[tabled(rename = "")]
    mark: String,
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    let frames = parsers::parse_structure_file(&args.input)?;

    if !args.json {
        output::print_header("Running External Model");
        output::print_info(&format!(
            "Loaded {} structure(s) of {} from '{}'",
            frames.len(),
            frames[0].formula(),
            args.input.display()
        ));
        output::print_info(&format!("Command: {}", args.command));
    }

    let spinner = progress::create_spinner("Computing");
    let mut results: Vec<ModelProperties> = Vec::with_capacity(frames.len());

    for (i, frame) in frames.iter().enumerate() {
        let label = image_label(&args.label, i, frames.len());
        let model = ExternalModel::new(&args.command)
            .with_label(&label)
            .with_workdir(&args.workdir);

        spinner.set_message(format!("{} ({}/{})", label, i + 1, frames.len()));

        let props = model.calculate(frame).map_err(|e| {
            spinner.finish_and_clear();
            output::print_error(&format!("Image {:02} ({}) failed", i, label));
            e
        })?;

        if args.json {
            let line = props.to_json()?;
            spinner.suspend(|| println!("{}", line));
        }
        results.push(props);
    }

    spinner.finish_and_clear();

    let ts_index = highest_energy_index(&results).ok_or(GemiError::EmptyResult)?;

    if !args.json {
        let reference = results[0].energy;
        let rows: Vec<ImageRow> = results
            .iter()
            .enumerate()
            .map(|(i, r)| ImageRow {
                image: format!("{:02}", i),
                energy: output::format_value(r.energy, 6),
                delta_e: output::format_value(r.energy.zip(reference).map(|(e, e0)| e - e0), 6),
                fmax: output::format_value(r.max_force(), 4),
                mark: if i == ts_index && results.len() > 1 {
                    "<- highest".to_string()
                } else {
                    String::new()
                },
            })
            .collect();

        println!("{}", Table::new(&rows));
    }

    if let Some(ref ts_path) = args.ts_output {
        fs::write(ts_path, xyz::to_xyz_string(&frames[ts_index])).map_err(|e| {
            GemiError::FileWriteError {
                path: ts_path.display().to_string(),
                source: e,
            }
        })?;
        if !args.json {
            output::print_success(&format!(
                "Highest-energy structure (image {:02}) written to '{}'",
                ts_index,
                ts_path.display()
            ));
        }
    }

    if !args.json {
        output::print_done(&format!("Computed {} structure(s)", results.len()));
    }

    Ok(())
}

/// 每帧的文件名前缀；单帧时直接使用 label
fn image_label(label: &str, index: usize, total: usize) -> String {
    if total > 1 {
        format!("{}-{:02}", label, index)
    } else {
        label.to_string()
    }
}

/// 能量最高的结构序号
fn highest_energy_index(results: &[ModelProperties]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.energy.map(|e| (i, e)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
