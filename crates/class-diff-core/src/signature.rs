//! 签名差异模块
//!
//! 比较两个成员索引的结构：新增/删除的成员，以及共有成员的签名、可访问性和修饰符

use crate::difference::{DifferenceKind, MemberDifference};
use crate::extractor::MemberIndex;

/// 签名比较结果
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureComparison {
    pub equal: bool,
    pub differences: Vec<MemberDifference>,
}

/// 比较两个成员索引的结构差异
///
/// 输出顺序固定：新增成员、删除成员，然后按成员名依次给出签名、可访问性、修饰符差异。
pub fn diff_signatures(old: &MemberIndex, new: &MemberIndex) -> SignatureComparison {
    let mut differences = Vec::new();

    for name in new.keys().filter(|name| !old.contains_key(*name)) {
        differences.push(MemberDifference::new(
            name.as_str(),
            DifferenceKind::Added,
            format!("Member '{name}' was added"),
        ));
    }

    for name in old.keys().filter(|name| !new.contains_key(*name)) {
        differences.push(MemberDifference::new(
            name.as_str(),
            DifferenceKind::Removed,
            format!("Member '{name}' was removed"),
        ));
    }

    for (name, before) in old {
        let Some(after) = new.get(name) else {
            continue;
        };

        if before.signature != after.signature {
            differences.push(MemberDifference::new(
                name.as_str(),
                DifferenceKind::SignatureChange,
                format!(
                    "Signature changed from '{}' to '{}'",
                    before.signature, after.signature
                ),
            ));
        }

        if before.accessibility != after.accessibility {
            differences.push(MemberDifference::new(
                name.as_str(),
                DifferenceKind::AccessibilityChange,
                format!(
                    "Accessibility changed from {} to {}",
                    before.accessibility, after.accessibility
                ),
            ));
        }

        // 修饰符按顺序比较，顺序不同也视为变更
        if before.modifiers != after.modifiers {
            differences.push(MemberDifference::new(
                name.as_str(),
                DifferenceKind::ModifierChange,
                format!(
                    "Modifiers changed from [{}] to [{}]",
                    before.modifiers.join(", "),
                    after.modifiers.join(", ")
                ),
            ));
        }
    }

    SignatureComparison {
        equal: differences.is_empty(),
        differences,
    }
}
