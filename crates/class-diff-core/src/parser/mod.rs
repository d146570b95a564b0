//! 语言前端模块
//!
//! 提供通用的前端接口和具体的语言实现

pub mod common;
pub mod csharp;

// 重新导出核心类型
pub use common::{
    Accessibility, Declaration, DeclarationKind, FrontendFactory, LanguageFrontend, MemberSyntax,
    MemberSyntaxKind, ParsedSource, SupportedLanguage,
};
pub use csharp::CSharpFrontend;
