//! 成员差异类型

use serde::Serialize;
use std::fmt;

/// 差异种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifferenceKind {
    SignatureChange,
    ImplementationChange,
    Added,
    Removed,
    AccessibilityChange,
    ModifierChange,
}

impl DifferenceKind {
    /// 所有差异种类，按报告中的展示顺序排列
    pub const ALL: [DifferenceKind; 6] = [
        DifferenceKind::Added,
        DifferenceKind::Removed,
        DifferenceKind::SignatureChange,
        DifferenceKind::AccessibilityChange,
        DifferenceKind::ModifierChange,
        DifferenceKind::ImplementationChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceKind::SignatureChange => "signature-change",
            DifferenceKind::ImplementationChange => "implementation-change",
            DifferenceKind::Added => "added",
            DifferenceKind::Removed => "removed",
            DifferenceKind::AccessibilityChange => "accessibility-change",
            DifferenceKind::ModifierChange => "modifier-change",
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条成员差异
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDifference {
    pub member_name: String,
    pub kind: DifferenceKind,
    pub description: String,
}

impl MemberDifference {
    pub fn new(
        member_name: impl Into<String>,
        kind: DifferenceKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            kind,
            description: description.into(),
        }
    }
}
