//! vibe-coder lint rules
//!
//! This crate provides the `no-optional-properties` rule of the vibe-coder ESLint plugin,
//! running over the oxc AST. Rules can be used:
//! 1. Through [`lint`] / [`LintRunner`], which walk a whole program
//! 2. Directly, by handing single nodes and a [`RuleHost`] to a rule's `check`

pub mod config;
pub mod plugin;
pub mod rules;
pub mod utils;
pub mod visitor;
mod context;
mod diagnostic;

use serde::Serialize;

pub use config::{ConfigError, RuleSeverity, RulesConfig};
pub use context::{CommentStyle, LintContext, RuleHost, TriviaComment};
pub use diagnostic::{Diagnostic, DiagnosticSeverity, LineIndex};
pub use plugin::{plugin, Plugin, Preset, RuleDescriptor};
pub use rules::*;
pub use visitor::{lint, lint_with_config, LintResult, LintRunner};

/// Rule category, as ESLint's `meta.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Code that is likely to be incorrect
    Problem,
    /// Code that could be written in a better way
    Suggestion,
    /// Whitespace and formatting
    Layout,
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
    const DESCRIPTION: &'static str;
    /// Grouping shown in the generated docs
    const DOCS_CATEGORY: &'static str;
    /// Whether the `recommended` preset enables the rule
    const RECOMMENDED: bool;
    /// `(message id, message template)` pairs
    const MESSAGES: &'static [(&'static str, &'static str)];

    fn descriptor() -> RuleDescriptor
    where
        Self: Sized,
    {
        RuleDescriptor::of::<Self>()
    }
}
