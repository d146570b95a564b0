use thiserror::Error;

/// class-diff 工具的错误类型定义
#[derive(Error, Debug)]
pub enum ClassDiffError {
    #[error("Source parsing error: {0}")]
    ParseError(String),

    #[error("Tree-sitter parsing failed: {0}")]
    TreeSitterError(String),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Report serialization failed: {0}")]
    SerializationError(String),
}

/// 项目通用的 Result 类型别名
pub type Result<T> = std::result::Result<T, ClassDiffError>;
