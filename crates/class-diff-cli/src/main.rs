//! class-diff - 类型声明差异分析工具
//!
//! 这是一个基于 Tree-sitter 的 C# 类型比较工具，
//! 报告同一类型两个版本之间的签名差异和实现差异。

mod cli;

use class_diff_core::{ClassComparer, ReportRenderer, Result};
use cli::{Cli, Config};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // 解析命令行参数
    let cli = Cli::parse_args();

    // 初始化日志记录，报告写到 stdout，日志写到 stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 验证参数
    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    let config: Config = cli.into();

    if config.verbose {
        info!("Starting class-diff comparison");
        debug!(
            "Configuration: old_file={}, new_file={}, format={:?}, threshold={}",
            config.old_file.display(),
            config.new_file.display(),
            config.output_format,
            config.comparison.similarity_threshold
        );
    }

    // 运行主要逻辑
    if let Err(e) = run(config) {
        error!("Application error: {}", e);
        std::process::exit(1);
    }

    info!("Comparison completed successfully");
}

/// 主要应用逻辑
fn run(config: Config) -> Result<()> {
    config.comparison.validate()?;

    let old_source = std::fs::read_to_string(&config.old_file)?;
    let new_source = std::fs::read_to_string(&config.new_file)?;

    let comparer = ClassComparer::new(config.comparison);
    let result = comparer.compare(&old_source, &new_source);
    info!(
        "Found {} difference(s), {} warning(s)",
        result.member_differences.len(),
        result.warnings.len()
    );

    let report = ReportRenderer::new(config.output_format).render(&result)?;

    match &config.output_file {
        Some(path) => {
            std::fs::write(path, report)?;
            info!("Report written to {}", path.display());
        }
        None => print!("{report}"),
    }

    Ok(())
}
