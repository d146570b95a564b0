//! C# 语言前端实现
//!
//! 基于 Tree-sitter 的 C# 源码解析器，把类型声明及其成员转换为 [`Declaration`]

use super::common::{
    Accessibility, Declaration, DeclarationKind, LanguageFrontend, MemberSyntax, MemberSyntaxKind,
    ParsedSource,
};
use crate::error::{ClassDiffError, Result};
use tracing::debug;
use tree_sitter::{Node, Parser};

/// 相似度计算时忽略的 C# 关键字
const CSHARP_RESERVED_WORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "return", "var", "class", "void", "int",
    "string", "bool", "true", "false", "null",
];

/// C# 语言前端
///
/// 每次解析都创建新的 `tree_sitter::Parser`，因此同一个前端可以在多个线程间共享。
#[derive(Debug, Default)]
pub struct CSharpFrontend;

impl CSharpFrontend {
    /// 创建新的 C# 前端
    pub fn new() -> Self {
        Self
    }

    fn create_parser(&self) -> Result<Parser> {
        let language = tree_sitter_c_sharp::LANGUAGE.into();
        let mut parser = Parser::new();

        parser.set_language(&language).map_err(|e| {
            ClassDiffError::TreeSitterError(format!("Failed to set C# language: {e}"))
        })?;

        Ok(parser)
    }
}

impl LanguageFrontend for CSharpFrontend {
    fn parse_source(&self, source: &str) -> Result<ParsedSource> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or_else(|| {
            ClassDiffError::ParseError("Failed to parse C# source code".to_string())
        })?;
        let root = tree.root_node();

        let mut declarations = Vec::new();
        collect_declarations(root, source, &mut declarations);
        debug!(
            "Parsed C# source: {} type declaration(s), has_errors={}",
            declarations.len(),
            root.has_error()
        );

        Ok(ParsedSource {
            declarations,
            has_errors: root.has_error(),
        })
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        CSHARP_RESERVED_WORDS
    }

    fn language_name(&self) -> &'static str {
        "C#"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["cs"]
    }
}

/// 先序遍历语法树，收集所有类型声明（包括嵌套类型）
fn collect_declarations(node: Node, source: &str, declarations: &mut Vec<Declaration>) {
    if let Some(kind) = declaration_kind(node.kind()) {
        if let Some(declaration) = build_declaration(node, source, kind) {
            declarations.push(declaration);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_declarations(child, source, declarations);
    }
}

fn declaration_kind(node_kind: &str) -> Option<DeclarationKind> {
    match node_kind {
        "class_declaration" => Some(DeclarationKind::Class),
        "struct_declaration" => Some(DeclarationKind::Struct),
        "record_declaration" | "record_struct_declaration" => Some(DeclarationKind::Record),
        "interface_declaration" => Some(DeclarationKind::Interface),
        _ => None,
    }
}

fn build_declaration(node: Node, source: &str, kind: DeclarationKind) -> Option<Declaration> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| find_child_by_kind(node, "identifier"))?;

    // 接口成员默认公开，其余类型的成员默认私有
    let default_accessibility = match kind {
        DeclarationKind::Interface => Accessibility::Public,
        _ => Accessibility::Private,
    };

    let mut members = Vec::new();
    if let Some(body) = node
        .child_by_field_name("body")
        .or_else(|| find_child_by_kind(node, "declaration_list"))
    {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            if child.is_extra() {
                continue;
            }
            members.push(build_member(child, source, kind));
        }
    }

    Some(Declaration {
        name: node_text(name_node, source).to_string(),
        kind,
        default_accessibility,
        members,
    })
}

fn build_member(node: Node, source: &str, container: DeclarationKind) -> MemberSyntax {
    let modifiers = extract_modifiers(node, source);
    let kind = match node.kind() {
        "method_declaration" => extract_method(node, source),
        "property_declaration" => extract_property(node, source),
        "field_declaration" => extract_field(node, source),
        "event_field_declaration" => extract_event_field(node, source),
        "event_declaration" => extract_event(node, source),
        _ => None,
    }
    .unwrap_or_else(|| MemberSyntaxKind::Other {
        syntax_kind: node.kind().to_string(),
    });

    let abstract_or_extern = modifiers
        .iter()
        .any(|modifier| modifier == "abstract" || modifier == "extern");
    let has_body = !abstract_or_extern
        && match &kind {
            MemberSyntaxKind::Method { .. } => has_function_body(node),
            MemberSyntaxKind::Property { .. } | MemberSyntaxKind::Event { .. } => {
                container != DeclarationKind::Interface || has_accessor_body(node)
            }
            MemberSyntaxKind::Field { .. } => true,
            MemberSyntaxKind::Other { .. } => false,
        };

    MemberSyntax {
        kind,
        modifiers,
        canonical_text: canonical_text(node, source),
        has_body,
    }
}

fn extract_method(node: Node, source: &str) -> Option<MemberSyntaxKind> {
    let parameters = node
        .child_by_field_name("parameters")
        .or_else(|| find_child_by_kind(node, "parameter_list"))?;

    let name_node = node.child_by_field_name("name").or_else(|| {
        // 方法名是参数列表之前的最后一个标识符
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .take_while(|child| child.id() != parameters.id())
            .filter(|child| child.kind() == "identifier")
            .last()
    })?;

    let return_type = node
        .child_by_field_name("returns")
        .or_else(|| node.child_by_field_name("type"))
        .or_else(|| first_significant_child(node))?;

    let type_parameters = node
        .child_by_field_name("type_parameters")
        .or_else(|| find_child_by_kind(node, "type_parameter_list"))
        .map(|list| compact_text(list, source));

    Some(MemberSyntaxKind::Method {
        name: node_text(name_node, source).to_string(),
        return_type: compact_text(return_type, source),
        type_parameters,
        parameters: compact_text(parameters, source),
    })
}

fn extract_property(node: Node, source: &str) -> Option<MemberSyntaxKind> {
    let type_node = node
        .child_by_field_name("type")
        .or_else(|| first_significant_child(node))?;
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| identifier_after(node, type_node))?;

    let accessors = match node
        .child_by_field_name("accessors")
        .or_else(|| find_child_by_kind(node, "accessor_list"))
    {
        Some(list) => {
            let mut cursor = list.walk();
            list.named_children(&mut cursor)
                .filter(|child| child.kind() == "accessor_declaration")
                .map(|accessor| accessor_signature(accessor, source))
                .collect()
        }
        // 表达式体属性只有隐式的 get 访问器
        None => vec!["get".to_string()],
    };

    Some(MemberSyntaxKind::Property {
        name: node_text(name_node, source).to_string(),
        property_type: compact_text(type_node, source),
        accessors,
    })
}

fn extract_field(node: Node, source: &str) -> Option<MemberSyntaxKind> {
    let (field_type, variables) = extract_variable_declaration(node, source)?;
    Some(MemberSyntaxKind::Field {
        field_type,
        variables,
    })
}

fn extract_event_field(node: Node, source: &str) -> Option<MemberSyntaxKind> {
    let (event_type, variables) = extract_variable_declaration(node, source)?;
    let name = variables.into_iter().next()?;
    Some(MemberSyntaxKind::Event { event_type, name })
}

fn extract_event(node: Node, source: &str) -> Option<MemberSyntaxKind> {
    let type_node = node.child_by_field_name("type").or_else(|| {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .skip_while(|child| child.kind() != "event")
            .find(|child| child.is_named())
    })?;
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| identifier_after(node, type_node))?;

    Some(MemberSyntaxKind::Event {
        event_type: compact_text(type_node, source),
        name: node_text(name_node, source).to_string(),
    })
}

/// 解析 `variable_declaration`，返回声明类型和所有变量名
fn extract_variable_declaration(node: Node, source: &str) -> Option<(String, Vec<String>)> {
    let declaration = find_child_by_kind(node, "variable_declaration")?;
    let type_node = declaration.child_by_field_name("type").or_else(|| {
        let mut cursor = declaration.walk();
        declaration
            .named_children(&mut cursor)
            .find(|child| child.kind() != "variable_declarator")
    })?;

    let mut cursor = declaration.walk();
    let variables = declaration
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "variable_declarator")
        .filter_map(|declarator| {
            declarator
                .child_by_field_name("name")
                .or_else(|| find_child_by_kind(declarator, "identifier"))
        })
        .map(|name| node_text(name, source).to_string())
        .collect();

    Some((compact_text(type_node, source), variables))
}

/// 访问器签名：自身修饰符加关键字，例如 `private set`
fn accessor_signature(accessor: Node, source: &str) -> String {
    let mut parts = extract_modifiers(accessor, source);
    let keyword = accessor
        .child_by_field_name("name")
        .or_else(|| first_significant_child(accessor));
    if let Some(keyword) = keyword {
        parts.push(node_text(keyword, source).to_string());
    }
    parts.join(" ")
}

fn extract_modifiers(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == "modifier")
        .map(|child| node_text(child, source).to_string())
        .collect()
}

fn has_function_body(node: Node) -> bool {
    find_child_by_kind(node, "block").is_some()
        || find_child_by_kind(node, "arrow_expression_clause").is_some()
}

/// 属性或事件是否带有实现（表达式体或任一访问器带函数体）
fn has_accessor_body(node: Node) -> bool {
    if find_child_by_kind(node, "arrow_expression_clause").is_some() {
        return true;
    }
    let Some(list) = find_child_by_kind(node, "accessor_list") else {
        return false;
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor).any(has_function_body)
}

/// 跳过特性和修饰符后的第一个子节点
fn first_significant_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|child| !matches!(child.kind(), "attribute_list" | "modifier") && !child.is_extra())
}

/// 查找位于 `anchor` 之后的第一个标识符
fn identifier_after<'a>(node: Node<'a>, anchor: Node<'a>) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .skip_while(|child| child.id() != anchor.id())
        .skip(1)
        .find(|child| child.kind() == "identifier")
}

/// 查找直接子节点中指定类型的节点
fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|child| child.kind() == kind)
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// 收集所有叶子词法单元，跳过注释、预处理指令等 extra 节点和补全的缺失节点
fn collect_leaves<'a>(node: Node, source: &'a str, leaves: &mut Vec<&'a str>) {
    if node.is_extra() || node.is_missing() {
        return;
    }

    if node.child_count() == 0 {
        let text = node_text(node, source);
        if !text.is_empty() {
            leaves.push(text);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, source, leaves);
    }
}

/// 规范化文本：去掉所有注释与空白差异，词法单元之间以单个空格分隔
fn canonical_text(node: Node, source: &str) -> String {
    let mut leaves = Vec::new();
    collect_leaves(node, source, &mut leaves);
    leaves.join(" ")
}

/// 紧凑文本：用于签名片段，只在需要分隔的位置保留空格
fn compact_text(node: Node, source: &str) -> String {
    let mut leaves = Vec::new();
    collect_leaves(node, source, &mut leaves);

    let mut output = String::new();
    let mut previous: Option<&str> = None;
    for leaf in leaves {
        if previous.is_some_and(|prev| needs_space(prev, leaf)) {
            output.push(' ');
        }
        output.push_str(leaf);
        previous = Some(leaf);
    }
    output
}

fn needs_space(previous: &str, next: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || matches!(c, '_' | '@' | '"' | '\'');

    if previous == "," || matches!(previous, "=" | "=>") || matches!(next, "=" | "=>") {
        return true;
    }

    let next_is_word = next.chars().next().is_some_and(is_word);
    let previous_ends_word = previous.chars().last().is_some_and(is_word);
    next_is_word && (previous_ends_word || matches!(previous, "]" | ">" | "?" | "*" | ")"))
}
