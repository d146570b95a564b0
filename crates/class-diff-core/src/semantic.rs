//! 语义差异模块
//!
//! 对共有成员的实现做比较：先比较规范化文本的哈希，哈希不同时
//! 再计算词法单元集合的 Jaccard 相似度。

use crate::difference::{DifferenceKind, MemberDifference};
use crate::extractor::{Member, MemberIndex};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;

/// 默认相似度阈值，低于该值的实现被视为已变更
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.95;

/// 分词时使用的分隔符（空白之外）
const TOKEN_DELIMITERS: [char; 6] = ['(', ')', '{', '}', ';', ','];

/// 实现比较结果
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticComparison {
    pub equal: bool,
    pub similarity_score: f64,
    pub differences: Vec<MemberDifference>,
}

/// 语义差异比较器
///
/// 保留字集合由调用方注入，使分词规则可以适配不同语言。
#[derive(Debug, Clone)]
pub struct SemanticDiffer {
    threshold: f64,
    reserved_words: HashSet<String>,
}

impl SemanticDiffer {
    pub fn new<I>(threshold: f64, reserved_words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            threshold,
            reserved_words: reserved_words
                .into_iter()
                .map(|word| word.as_ref().to_string())
                .collect(),
        }
    }

    /// 比较两个成员索引中同名成员的实现
    pub fn diff(&self, old: &MemberIndex, new: &MemberIndex) -> SemanticComparison {
        let common: Vec<(&String, &Member, &Member)> = old
            .iter()
            .filter_map(|(name, before)| new.get(name).map(|after| (name, before, after)))
            .collect();

        if common.is_empty() {
            return SemanticComparison {
                equal: false,
                similarity_score: 0.0,
                differences: Vec::new(),
            };
        }

        let mut compared = 0usize;
        let mut matching = 0usize;
        let mut total_similarity = 0.0;
        let mut differences = Vec::new();

        for (name, before, after) in common {
            if is_excluded(before) || is_excluded(after) {
                debug!("Skipping member without implementation: {}", name);
                continue;
            }
            compared += 1;

            let before_body = before.body_text.as_deref().unwrap_or_default();
            let after_body = after.body_text.as_deref().unwrap_or_default();

            if content_hash(before_body) == content_hash(after_body) {
                matching += 1;
                total_similarity += 1.0;
                continue;
            }

            let similarity = self.token_similarity(before_body, after_body);
            total_similarity += similarity;

            if similarity < self.threshold {
                differences.push(MemberDifference::new(
                    name.as_str(),
                    DifferenceKind::ImplementationChange,
                    format!(
                        "Implementation changed (similarity: {:.0}%)",
                        similarity * 100.0
                    ),
                ));
            }
        }

        // 没有可比较的实现时不能判定为相等
        if compared == 0 {
            return SemanticComparison {
                equal: false,
                similarity_score: 0.0,
                differences,
            };
        }

        SemanticComparison {
            equal: matching == compared,
            similarity_score: total_similarity / compared as f64,
            differences,
        }
    }

    /// 两段代码词法单元集合的 Jaccard 相似度；两者都没有有效单元时为 1.0
    pub fn token_similarity(&self, left: &str, right: &str) -> f64 {
        let left_tokens = self.tokenize(left);
        let right_tokens = self.tokenize(right);

        let union = left_tokens.union(&right_tokens).count();
        if union == 0 {
            return 1.0;
        }
        let intersection = left_tokens.intersection(&right_tokens).count();
        intersection as f64 / union as f64
    }

    /// 按空白和 `( ) { } ; ,` 切分，丢弃单字符单元和保留字
    pub fn tokenize<'t>(&self, code: &'t str) -> HashSet<&'t str> {
        code.split(|c: char| c.is_whitespace() || TOKEN_DELIMITERS.contains(&c))
            .filter(|token| token.chars().count() > 1 && !self.reserved_words.contains(*token))
            .collect()
    }
}

/// abstract/extern 成员以及没有实现的成员不参与语义比较
fn is_excluded(member: &Member) -> bool {
    member.is_abstract_or_extern() || !member.has_body
}

/// 规范化文本的 SHA-256 摘要
pub fn content_hash(code: &str) -> [u8; 32] {
    let digest = Sha256::digest(code.as_bytes());
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    hash
}
