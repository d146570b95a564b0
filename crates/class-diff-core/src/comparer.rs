//! 比较聚合模块
//!
//! 串联前端解析、成员提取、签名比较与语义比较，生成一份比较报告

use crate::difference::{DifferenceKind, MemberDifference};
use crate::error::{ClassDiffError, Result};
use crate::extractor::extract_members;
use crate::parser::{Declaration, FrontendFactory, LanguageFrontend, SupportedLanguage};
use crate::semantic::{DEFAULT_SIMILARITY_THRESHOLD, SemanticDiffer};
use crate::signature::diff_signatures;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// 任一输入无法得到类型声明时记录的警告
pub const INVALID_INPUT_WARNING: &str = "One or both inputs are not valid type declarations";

/// 比较配置
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// 相似度低于该值的实现被报告为变更
    pub similarity_threshold: f64,
    /// 分词时忽略的保留字；为 `None` 时使用前端提供的关键字表
    pub reserved_words: Option<Vec<String>>,
    /// 要比较的类型名；为 `None` 时取每个输入中的第一个类型声明
    pub type_name: Option<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            reserved_words: None,
            type_name: None,
        }
    }
}

impl ComparisonConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ClassDiffError::ConfigError(format!(
                "Similarity threshold must be between 0.0 and 1.0, got {}",
                self.similarity_threshold
            )));
        }

        if self.type_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ClassDiffError::ConfigError(
                "Type name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// 比较报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// 左侧被比较的类型名
    pub left_name: Option<String>,
    /// 右侧被比较的类型名
    pub right_name: Option<String>,
    pub signatures_equal: bool,
    pub implementations_semantically_equal: bool,
    /// 共有成员实现相似度的平均值，范围 [0, 1]
    pub similarity_score: f64,
    /// 签名差异在前，语义差异在后
    pub member_differences: Vec<MemberDifference>,
    pub warnings: Vec<String>,
}

impl ComparisonResult {
    /// 指定种类的差异
    pub fn differences_of(&self, kind: DifferenceKind) -> impl Iterator<Item = &MemberDifference> {
        self.member_differences
            .iter()
            .filter(move |difference| difference.kind == kind)
    }

    /// 指定种类的差异数量
    pub fn count(&self, kind: DifferenceKind) -> usize {
        self.differences_of(kind).count()
    }

    /// 签名与实现都相同且没有任何差异
    pub fn is_identical(&self) -> bool {
        self.signatures_equal
            && self.implementations_semantically_equal
            && self.member_differences.is_empty()
    }
}

/// 类型声明比较器
///
/// 不保存任何可变状态，同一个实例可以被多个线程同时使用。
pub struct ClassComparer {
    config: ComparisonConfig,
    frontend: Box<dyn LanguageFrontend>,
}

impl Default for ClassComparer {
    fn default() -> Self {
        Self::new(ComparisonConfig::default())
    }
}

impl ClassComparer {
    /// 使用 C# 前端创建比较器
    pub fn new(config: ComparisonConfig) -> Self {
        Self::with_frontend(
            config,
            FrontendFactory::create_frontend(SupportedLanguage::CSharp),
        )
    }

    /// 使用指定前端创建比较器
    pub fn with_frontend(config: ComparisonConfig, frontend: Box<dyn LanguageFrontend>) -> Self {
        Self { config, frontend }
    }

    /// 比较两段源码中的类型声明
    ///
    /// 任何解析失败都会转换为报告中的警告，本方法不会失败。
    pub fn compare(&self, left_source: &str, right_source: &str) -> ComparisonResult {
        let mut warnings = Vec::new();
        let left = self.resolve_declaration("first", left_source, &mut warnings);
        let right = self.resolve_declaration("second", right_source, &mut warnings);

        let (Some(left), Some(right)) = (left, right) else {
            warn!("{}", INVALID_INPUT_WARNING);
            warnings.push(INVALID_INPUT_WARNING.to_string());
            return ComparisonResult {
                warnings,
                ..ComparisonResult::default()
            };
        };

        let mut result = self.compare_declarations(&left, &right);
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        result
    }

    /// 比较两个已解析的类型声明
    pub fn compare_declarations(
        &self,
        left: &Declaration,
        right: &Declaration,
    ) -> ComparisonResult {
        let left_members = extract_members(left);
        let right_members = extract_members(right);

        let signatures = diff_signatures(&left_members, &right_members);
        let semantics = self.semantic_differ().diff(&left_members, &right_members);

        let mut member_differences = signatures.differences;
        member_differences.extend(semantics.differences);

        info!(
            "Compared {} with {}: {} difference(s), similarity {:.2}",
            left.name,
            right.name,
            member_differences.len(),
            semantics.similarity_score
        );

        ComparisonResult {
            left_name: Some(left.name.clone()),
            right_name: Some(right.name.clone()),
            signatures_equal: signatures.equal,
            implementations_semantically_equal: semantics.equal,
            similarity_score: semantics.similarity_score,
            member_differences,
            warnings: Vec::new(),
        }
    }

    /// 并发比较多组源码，结果顺序与输入一致
    pub fn compare_many<S>(&self, pairs: &[(S, S)]) -> Vec<ComparisonResult>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Comparing {} source pair(s) in parallel", pairs.len());
        pairs
            .par_iter()
            .map(|(left, right)| self.compare(left.as_ref(), right.as_ref()))
            .collect()
    }

    fn semantic_differ(&self) -> SemanticDiffer {
        match &self.config.reserved_words {
            Some(words) => SemanticDiffer::new(self.config.similarity_threshold, words),
            None => SemanticDiffer::new(
                self.config.similarity_threshold,
                self.frontend.reserved_words(),
            ),
        }
    }

    /// 解析一侧输入并选出要比较的声明，问题记录为警告
    fn resolve_declaration(
        &self,
        label: &str,
        source: &str,
        warnings: &mut Vec<String>,
    ) -> Option<Declaration> {
        let parsed = match self.frontend.parse_source(source) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to parse {} input: {}", label, e);
                warnings.push(format!("Failed to parse the {label} input: {e}"));
                return None;
            }
        };

        if parsed.has_errors {
            warnings.push(format!(
                "The {label} input contains syntax errors; the comparison may be incomplete"
            ));
        }

        let type_name = self.config.type_name.as_deref();
        let declaration = parsed.select(type_name).cloned();
        if let (None, Some(name)) = (&declaration, type_name) {
            warnings.push(format!("Type '{name}' was not found in the {label} input"));
        }
        declaration
    }
}
