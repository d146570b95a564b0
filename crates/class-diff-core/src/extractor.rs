//! 成员模型提取模块
//!
//! 把前端产生的声明转换为以成员名为键的规范化成员记录

use crate::parser::{Accessibility, Declaration, MemberSyntax, MemberSyntaxKind};
use std::collections::BTreeMap;
use tracing::debug;

/// 参与比较的成员种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
    Field,
    Event,
}

/// 规范化的成员记录
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// 用于相等比较的结构摘要（不含实现）
    pub signature: String,
    pub accessibility: Accessibility,
    /// 非访问修饰符，保持书写顺序
    pub modifiers: Vec<String>,
    pub has_body: bool,
    /// 去除注释和空白差异后的完整成员文本，仅在 `has_body` 时存在
    pub body_text: Option<String>,
}

impl Member {
    /// 是否带有 `abstract` 或 `extern` 修饰符
    pub fn is_abstract_or_extern(&self) -> bool {
        self.modifiers
            .iter()
            .any(|modifier| modifier == "abstract" || modifier == "extern")
    }
}

/// 按成员名排序的成员索引
pub type MemberIndex = BTreeMap<String, Member>;

/// 提取声明中所有可比较的成员
///
/// 同名成员后出现者覆盖先出现者；多变量字段只保留第一个变量；
/// 构造函数、索引器、嵌套类型等其他成员被忽略。
pub fn extract_members(declaration: &Declaration) -> MemberIndex {
    let mut members = MemberIndex::new();

    for syntax in &declaration.members {
        if let Some(member) = to_member(syntax, declaration.default_accessibility) {
            members.insert(member.name.clone(), member);
        }
    }

    debug!(
        "Extracted {} member(s) from {} ({} syntax member(s))",
        members.len(),
        declaration.name,
        declaration.members.len()
    );
    members
}

fn to_member(syntax: &MemberSyntax, default_accessibility: Accessibility) -> Option<Member> {
    let (kind, name, signature) = match &syntax.kind {
        MemberSyntaxKind::Method {
            name,
            return_type,
            type_parameters,
            parameters,
        } => (
            MemberKind::Method,
            name.clone(),
            format!(
                "{return_type} {name}{}{parameters}",
                type_parameters.as_deref().unwrap_or_default()
            ),
        ),
        MemberSyntaxKind::Property {
            name,
            property_type,
            accessors,
        } => {
            let accessor_set: String = accessors.iter().map(|a| format!("{a}; ")).collect();
            (
                MemberKind::Property,
                name.clone(),
                format!("{property_type} {name} {{ {accessor_set}}}"),
            )
        }
        MemberSyntaxKind::Field {
            field_type,
            variables,
        } => {
            let name = variables.first()?.clone();
            let signature = format!("{field_type} {name}");
            (MemberKind::Field, name, signature)
        }
        MemberSyntaxKind::Event { event_type, name } => (
            MemberKind::Event,
            name.clone(),
            format!("event {event_type} {name}"),
        ),
        MemberSyntaxKind::Other { .. } => return None,
    };

    if name.is_empty() {
        return None;
    }

    let accessibility = syntax
        .modifiers
        .iter()
        .find_map(|modifier| Accessibility::from_keyword(modifier))
        .unwrap_or(default_accessibility);
    let modifiers = syntax
        .modifiers
        .iter()
        .filter(|modifier| Accessibility::from_keyword(modifier).is_none())
        .cloned()
        .collect();

    Some(Member {
        kind,
        name,
        signature,
        accessibility,
        modifiers,
        has_body: syntax.has_body,
        body_text: syntax
            .has_body
            .then(|| syntax.canonical_text.clone()),
    })
}
