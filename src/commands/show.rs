//! # show 命令实现
//!
//! 解析单个模型输出文件并报告最新性质块。
//!
//! ## 功能
//! - 报告性质块数量（最后一块被视为当前结果）
//! - 终端表格列出所有块 (`--all`)
//! - JSON 输出 (`--json`)
//! - 能量随块序号变化的曲线图 (`--plot`)
//!
//! ## 依赖关系
//! - 使用 `cli/show.rs` 定义的参数
//! - 使用 `parsers/model_properties.rs`
//! - 使用 `utils/output.rs`

use crate::cli::show::ShowArgs;
use crate::error::{GemiError, Result};
use crate::models::ModelProperties;
use crate::parsers::model_properties;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 性质块表格行
#[derive(Debug, Clone, Tabled)]
struct BlockRow {
    #[tabled(rename = "Block")]
    block: usize,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "ΔE (eV)")]
    delta_e: String,
    #[tabled(rename = "Fmax (eV/Å)")]
    fmax: String,
    #[tabled(rename = "Atoms")]
    atoms: String,
}

/// 执行 show 命令
pub fn execute(args: ShowArgs) -> Result<()> {
    if !args.file.exists() {
        return Err(GemiError::FileNotFound {
            path: args.file.display().to_string(),
        });
    }

    let results = model_properties::parse_model_properties_file(&args.file)?;
    let current = model_properties::latest(&results)?;

    // JSON 模式只输出结果本身，便于管道处理
    if args.json {
        println!("{}", current.to_json()?);
        return Ok(());
    }

    output::print_header(&format!("Model properties: {}", args.file.display()));
    output::print_info(&format!("Found {} property block(s)", results.len()));
    if results.len() > 1 {
        output::print_info("Using the last block as the current result");
    }
    if !current.ignored_keys.is_empty() {
        output::print_warning(&format!(
            "Ignored unrecognized key(s): {}",
            current.ignored_keys.join(", ")
        ));
    }

    if args.all {
        let reference = results.first().and_then(|r| r.energy);
        let rows: Vec<BlockRow> = results
            .iter()
            .map(|r| BlockRow {
                block: r.block,
                energy: output::format_value(r.energy, 6),
                delta_e: output::format_value(
                    r.energy.zip(reference).map(|(e, e0)| e - e0),
                    6,
                ),
                fmax: output::format_value(r.max_force(), 4),
                atoms: r
                    .num_atoms()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        println!("{}", Table::new(&rows));
        output::print_separator();
    }

    output::print_properties(current);

    if let Some(ref plot_path) = args.plot {
        plot_energies(&results, plot_path)?;
        output::print_success(&format!(
            "Energy plot saved to '{}'",
            plot_path.display()
        ));
    }

    Ok(())
}

/// 绘制能量-块序号曲线
fn plot_energies(results: &[ModelProperties], output_path: &Path) -> Result<()> {
    use plotters::prelude::*;

    let plot_data: Vec<(f64, f64)> = results
        .iter()
        .filter_map(|r| r.energy.map(|e| (r.block as f64, e)))
        .collect();

    if plot_data.is_empty() {
        return Err(GemiError::Other(
            "No energies in output; nothing to plot".to_string(),
        ));
    }

    let y_min = plot_data
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::INFINITY, f64::min);
    let y_max = plot_data
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let x_min = plot_data.first().map_or(0.0, |(x, _)| *x);
    let x_max = plot_data.last().map_or(0.0, |(x, _)| *x);
    let y_margin = ((y_max - y_min).abs() * 0.1).max(1e-3);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| GemiError::Other(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Model Energy per Property Block", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (x_min - 0.5)..(x_max + 0.5),
            (y_min - y_margin)..(y_max + y_margin),
        )
        .map_err(|e| GemiError::Other(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Block")
        .y_desc("Energy (eV)")
        .draw()
        .map_err(|e| GemiError::Other(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(plot_data.iter().copied(), BLUE.stroke_width(2)))
        .map_err(|e| GemiError::Other(e.to_string()))?;

    chart
        .draw_series(
            plot_data
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 4, BLUE.filled())),
        )
        .map_err(|e| GemiError::Other(e.to_string()))?;

    // 标记当前（最后）结果
    if let Some((x, y)) = plot_data.last() {
        chart
            .draw_series(std::iter::once(Circle::new((*x, *y), 7, RED.filled())))
            .map_err(|e| GemiError::Other(e.to_string()))?
            .label("Current result")
            .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| GemiError::Other(e.to_string()))?;
    }

    root.present()
        .map_err(|e| GemiError::Other(e.to_string()))?;

    Ok(())
}
