//! class-diff-core - 类型声明差异分析核心库
//!
//! 这是一个基于 Tree-sitter 的 C# 类型声明比较核心库，
//! 对两个版本的同一个类型做签名级别和实现级别的比较。

pub mod comparer;
pub mod difference;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod parser;
pub mod semantic;
pub mod signature;

// 重新导出主要的公共 API
pub use comparer::{ClassComparer, ComparisonConfig, ComparisonResult, INVALID_INPUT_WARNING};
pub use difference::{DifferenceKind, MemberDifference};
pub use error::{ClassDiffError, Result};
pub use extractor::{Member, MemberIndex, MemberKind, extract_members};
pub use formatter::{OutputFormat, ReportRenderer};
// 导出语言前端架构
pub use parser::{
    Accessibility, CSharpFrontend, Declaration, DeclarationKind, FrontendFactory,
    LanguageFrontend, MemberSyntax, MemberSyntaxKind, ParsedSource, SupportedLanguage,
};
pub use semantic::{DEFAULT_SIMILARITY_THRESHOLD, SemanticComparison, SemanticDiffer};
pub use signature::{SignatureComparison, diff_signatures};
