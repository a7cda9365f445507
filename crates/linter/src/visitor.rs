//! Unified visitor pattern for running all lint rules in a single AST pass
//!
//! This module provides a `LintRunner` that traverses the AST once, hands every
//! declared field to the enabled rules, and collects the diagnostics they report.

use oxc_ast::ast::{Program, PropertyDefinition, TSPropertySignature};
use oxc_ast_visit::{walk, Visit};

use crate::config::RulesConfig;
use crate::context::LintContext;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::rules::PropertyField;

/// Unified visitor that runs all enabled rules during a single AST traversal
pub struct LintRunner<'c> {
    ctx: LintContext<'c>,
    config: RulesConfig,
}

impl<'c> LintRunner<'c> {
    pub fn new(ctx: LintContext<'c>, config: RulesConfig) -> Self {
        Self { ctx, config }
    }

    /// Run all enabled rules on the given program
    pub fn run(mut self, program: &Program<'_>) -> LintResult {
        if !self.config.is_empty() {
            self.visit_program(program);
        }
        LintResult {
            diagnostics: self.ctx.into_diagnostics(),
        }
    }

    /// Check a declared field with all applicable rules
    fn check_field(&mut self, field: PropertyField<'_, '_>) {
        tracing::trace!(start = field.span().start, "checking field");

        // no-optional-properties
        if let Some(rule) = &self.config.no_optional_properties {
            rule.check(field, &mut self.ctx);
        }
    }
}

impl<'a> Visit<'a> for LintRunner<'_> {
    fn visit_ts_property_signature(&mut self, it: &TSPropertySignature<'a>) {
        self.check_field(PropertyField::Signature(it));
        walk::walk_ts_property_signature(self, it);
    }

    fn visit_property_definition(&mut self, it: &PropertyDefinition<'a>) {
        self.check_field(PropertyField::Definition(it));
        walk::walk_property_definition(self, it);
    }
}

/// Result of running the linter
#[derive(Debug)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Convenience function to lint a program with default configuration
pub fn lint(source_text: &str, program: &Program<'_>) -> LintResult {
    lint_with_config(source_text, program, RulesConfig::default())
}

/// Convenience function to lint a program with custom configuration
pub fn lint_with_config(
    source_text: &str,
    program: &Program<'_>,
    config: RulesConfig,
) -> LintResult {
    let ctx = LintContext::new(source_text, &program.comments);
    let result = LintRunner::new(ctx, config).run(program);
    tracing::debug!(diagnostics = result.diagnostics.len(), "lint finished");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSeverity;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn parse_and_lint(source: &str) -> LintResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty());
        lint(source, &ret.program)
    }

    fn parse_and_lint_with_config(source: &str, config: RulesConfig) -> LintResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        lint_with_config(source, &ret.program, config)
    }

    #[test]
    fn test_lint_clean_code() {
        let result = parse_and_lint("interface User { name: string; email: string; }");
        assert!(result.diagnostics.is_empty());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_lint_optional_property() {
        let result = parse_and_lint("interface User { name?: string; email: string; }");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, "no-optional-properties");
    }

    #[test]
    fn test_lint_nested_type_literals() {
        let result = parse_and_lint(
            "interface Settings { theme: { primary?: string; secondary?: string }; push: boolean }",
        );
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn test_lint_reaches_class_in_function() {
        let result = parse_and_lint("function make() { return class { a?: string }; }");
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_lint_type_alias_and_class() {
        let result = parse_and_lint(
            "type Config = { port?: number }; class Server { host: string | null = null; }",
        );
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn test_lint_order_follows_source() {
        let result = parse_and_lint("interface A { a?: string; b: null | number; c?: boolean }");
        let starts: Vec<_> = result.diagnostics.iter().map(|d| d.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert_eq!(starts.len(), 3);
    }

    #[test]
    fn test_lint_with_disabled_rules() {
        let result = parse_and_lint_with_config("interface A { a?: string }", RulesConfig::none());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_result_counts() {
        let config = RulesConfig::none().with_no_optional_properties(RuleSeverity::Warn);
        let result = parse_and_lint_with_config("interface A { a?: string; b?: string }", config);
        assert!(result.has_warnings());
        assert!(!result.has_errors());
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.warning_count(), 2);

        let result = parse_and_lint("interface A { a?: string }");
        assert!(result.has_errors());
        assert_eq!(result.error_count(), 1);
    }
}
