//! # 美化输出工具
//!
//! 提供统一的终端输出样式和数值格式化。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::models::ModelProperties;
use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 格式化可选数值，缺失时为 "-"
pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// 打印一条性质记录
pub fn print_properties(props: &ModelProperties) {
    println!(
        "  {:<14} {}",
        "energy".cyan(),
        format_value(props.energy, 8)
    );

    match props.forces {
        Some(ref forces) => {
            println!(
                "  {:<14} {} atom(s), fmax = {}",
                "forces".cyan(),
                forces.len(),
                format_value(props.max_force(), 6)
            );
            for (i, f) in forces.iter().enumerate() {
                println!(
                    "  {:>6} {:14.8} {:14.8} {:14.8}",
                    i + 1,
                    f[0],
                    f[1],
                    f[2]
                );
            }
        }
        None => println!("  {:<14} -", "forces".cyan()),
    }

    match props.dipole {
        Some(d) => println!(
            "  {:<14} {:.6} {:.6} {:.6} (|μ| = {})",
            "dipole".cyan(),
            d[0],
            d[1],
            d[2],
            format_value(props.dipole_magnitude(), 6)
        ),
        None => println!("  {:<14} -", "dipole".cyan()),
    }
}
