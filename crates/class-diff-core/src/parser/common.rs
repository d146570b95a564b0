//! 通用前端接口和数据结构
//!
//! 定义语言前端的通用接口，以及比较引擎读取的声明树结构

use crate::error::{ClassDiffError, Result};
use std::fmt;
use std::path::Path;

/// 支持的编程语言枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    CSharp,
    // 未来支持的语言
    // Java,
    // TypeScript,
}

/// 语言前端接口
///
/// 前端负责把源码文本解析为 [`ParsedSource`]，比较引擎只读取结果，不回头访问语法树。
pub trait LanguageFrontend: Send + Sync {
    /// 解析源码，返回其中所有类型声明
    fn parse_source(&self, source: &str) -> Result<ParsedSource>;

    /// 相似度分词时忽略的保留字
    fn reserved_words(&self) -> &'static [&'static str];

    /// 获取语言名称
    fn language_name(&self) -> &'static str;

    /// 获取支持的文件扩展名
    fn file_extensions(&self) -> &'static [&'static str];
}

/// 前端工厂
pub struct FrontendFactory;

impl FrontendFactory {
    /// 根据语言类型创建前端
    pub fn create_frontend(language: SupportedLanguage) -> Box<dyn LanguageFrontend> {
        match language {
            SupportedLanguage::CSharp => Box::new(super::csharp::CSharpFrontend::new()),
        }
    }

    /// 根据文件路径检测语言类型
    pub fn detect_language(file_path: &Path) -> Option<SupportedLanguage> {
        match file_path.extension()?.to_str()? {
            "cs" => Some(SupportedLanguage::CSharp),
            _ => None,
        }
    }

    /// 根据文件路径创建对应的前端
    pub fn create_frontend_for_file(file_path: &Path) -> Result<Box<dyn LanguageFrontend>> {
        let language = Self::detect_language(file_path).ok_or_else(|| {
            ClassDiffError::UnsupportedFileType(file_path.to_string_lossy().to_string())
        })?;
        Ok(Self::create_frontend(language))
    }
}

/// 成员可访问性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    Private,
    Protected,
    Internal,
    /// 没有显式访问关键字、由语言决定的包级默认可见性
    PackageDefault,
}

impl Accessibility {
    /// 从访问修饰符关键字解析
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::PackageDefault => "package-default",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 类型声明的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Struct,
    Record,
    Interface,
}

/// 一个已解析的类型声明
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// 成员未写访问修饰符时采用的可访问性
    pub default_accessibility: Accessibility,
    /// 按源码顺序排列的成员
    pub members: Vec<MemberSyntax>,
}

/// 声明中的单个成员
#[derive(Debug, Clone)]
pub struct MemberSyntax {
    pub kind: MemberSyntaxKind,
    /// 按书写顺序排列的全部修饰符（包括访问修饰符）
    pub modifiers: Vec<String>,
    /// 去除注释后以单个空格连接各词法单元的完整文本（包括修饰符）
    pub canonical_text: String,
    pub has_body: bool,
}

/// 成员种类及其特有的结构信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSyntaxKind {
    Method {
        name: String,
        return_type: String,
        type_parameters: Option<String>,
        parameters: String,
    },
    Property {
        name: String,
        property_type: String,
        /// 访问器及其自身修饰符，例如 `get`、`private set`
        accessors: Vec<String>,
    },
    Field {
        field_type: String,
        variables: Vec<String>,
    },
    Event {
        event_type: String,
        name: String,
    },
    /// 构造函数、索引器、运算符、嵌套类型等不参与比较的成员
    Other { syntax_kind: String },
}

/// 前端解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// 按文档先序排列的所有类型声明（包括嵌套类型）
    pub declarations: Vec<Declaration>,
    /// 语法树中是否存在错误节点
    pub has_errors: bool,
}

impl ParsedSource {
    /// 选择要比较的声明：指定名称时按名称查找，否则取第一个
    pub fn select(&self, type_name: Option<&str>) -> Option<&Declaration> {
        match type_name {
            Some(name) => self.declarations.iter().find(|decl| decl.name == name),
            None => self.declarations.first(),
        }
    }
}
