//! 命令行接口模块
//!
//! 提供命令行参数解析和参数校验

use clap::{Parser, ValueEnum};
use class_diff_core::{
    ClassDiffError, ComparisonConfig, DEFAULT_SIMILARITY_THRESHOLD, FrontendFactory, OutputFormat,
    Result,
};
use std::path::{Path, PathBuf};

/// class-diff - 类型声明差异分析工具
///
/// 比较同一个 C# 类型的两个版本，报告签名级别和实现级别的差异。
#[derive(Parser, Debug)]
#[command(name = "class-diff")]
#[command(author = "class-diff contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compare two versions of a C# type declaration")]
#[command(
    long_about = "class-diff compares two versions of a C# class, struct, record or interface and reports added and removed members, signature, accessibility and modifier changes, and implementation changes scored by token similarity."
)]
pub struct Cli {
    /// 旧版本源文件
    #[arg(help = "Source file containing the old version", value_name = "OLD_FILE")]
    pub old_file: PathBuf,

    /// 新版本源文件
    #[arg(help = "Source file containing the new version", value_name = "NEW_FILE")]
    pub new_file: PathBuf,

    /// 输出格式
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormatArg::PlainText,
        help = "Output format for the comparison report"
    )]
    pub format: OutputFormatArg,

    /// 要比较的类型名
    #[arg(
        short = 't',
        long = "type",
        value_name = "NAME",
        help = "Name of the type to compare (defaults to the first type in each file)"
    )]
    pub type_name: Option<String>,

    /// 相似度阈值
    #[arg(
        long = "threshold",
        value_name = "SCORE",
        default_value_t = DEFAULT_SIMILARITY_THRESHOLD,
        help = "Similarity below which an implementation is reported as changed (0.0-1.0)"
    )]
    pub threshold: f64,

    /// 详细输出
    #[arg(short = 'v', long = "verbose", help = "Enable verbose logging output")]
    pub verbose: bool,

    /// 输出到文件
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write output to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,
}

/// 输出格式命令行参数
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormatArg {
    /// 纯文本格式输出
    #[value(name = "text")]
    PlainText,
    /// Markdown 格式输出
    #[value(name = "markdown")]
    Markdown,
    /// JSON 格式输出
    #[value(name = "json")]
    Json,
}

/// 应用程序配置信息
#[derive(Debug, Clone)]
pub struct Config {
    /// 旧版本源文件
    pub old_file: PathBuf,
    /// 新版本源文件
    pub new_file: PathBuf,
    /// 输出格式
    pub output_format: OutputFormat,
    /// 比较配置
    pub comparison: ComparisonConfig,
    /// 是否启用详细输出
    pub verbose: bool,
    /// 输出文件路径
    pub output_file: Option<PathBuf>,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::PlainText => OutputFormat::PlainText,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            old_file: cli.old_file,
            new_file: cli.new_file,
            output_format: cli.format.into(),
            comparison: ComparisonConfig {
                similarity_threshold: cli.threshold,
                reserved_words: None,
                type_name: cli.type_name,
            },
            verbose: cli.verbose,
            output_file: cli.output_file,
        }
    }
}

impl Cli {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 验证参数的有效性
    pub fn validate(&self) -> Result<()> {
        validate_input(&self.old_file)?;
        validate_input(&self.new_file)?;

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ClassDiffError::ConfigError(format!(
                "Threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }

        if self
            .type_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ClassDiffError::ConfigError(
                "Type name cannot be empty".to_string(),
            ));
        }

        // 验证并创建输出文件路径 (如果指定)
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                // 只有当父目录不是空路径时才检查和创建
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ClassDiffError::IoError(std::io::Error::new(
                            e.kind(),
                            format!(
                                "Failed to create output directory {}: {}",
                                parent.display(),
                                e
                            ),
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }
}

fn validate_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ClassDiffError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file does not exist: {}", path.display()),
        )));
    }

    if FrontendFactory::detect_language(path).is_none() {
        return Err(ClassDiffError::UnsupportedFileType(
            path.display().to_string(),
        ));
    }

    Ok(())
}
