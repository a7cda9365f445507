//! vibe-coder/no-optional-properties
//!
//! Disallow optional properties (`name?: T`) and properties typed as a union with
//! `undefined` or `null` in interfaces, type literals and classes.
//!
//! A `?` property is allowed when the line directly above it is a comment of the form
//! `//optional: reason`. The union check has no escape hatch.

use oxc_ast::ast::{PropertyDefinition, TSPropertySignature, TSType};
use oxc_span::{GetSpan, Span};

use crate::context::RuleHost;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::utils::declared_absence_marker;
use crate::{RuleCategory, RuleMeta};

/// Prefix an exemption comment's trimmed text must start with
pub const EXEMPTION_MARKER: &str = "optional:";

/// A declared field of an interface, type literal or class
#[derive(Debug, Clone, Copy)]
pub enum PropertyField<'n, 'a> {
    /// `interface A { x?: T }` / `type A = { x?: T }`
    Signature(&'n TSPropertySignature<'a>),
    /// `class A { x?: T }`
    Definition(&'n PropertyDefinition<'a>),
}

impl<'n, 'a> PropertyField<'n, 'a> {
    pub fn span(&self) -> Span {
        match self {
            Self::Signature(sig) => sig.span,
            Self::Definition(def) => def.span,
        }
    }

    pub fn key_span(&self) -> Span {
        match self {
            Self::Signature(sig) => sig.key.span(),
            Self::Definition(def) => def.key.span(),
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            Self::Signature(sig) => sig.optional,
            Self::Definition(def) => def.optional,
        }
    }

    pub fn declared_type(&self) -> Option<&'n TSType<'a>> {
        let annotation = match *self {
            Self::Signature(sig) => sig.type_annotation.as_deref(),
            Self::Definition(def) => def.type_annotation.as_deref(),
        };
        annotation.map(|annotation| &annotation.type_annotation)
    }
}

/// no-optional-properties rule
#[derive(Debug, Clone)]
pub struct NoOptionalProperties {
    severity: DiagnosticSeverity,
}

impl Default for NoOptionalProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleMeta for NoOptionalProperties {
    const NAME: &'static str = "no-optional-properties";
    const CATEGORY: RuleCategory = RuleCategory::Suggestion;
    const DESCRIPTION: &'static str =
        "Prevent optional properties in types and interfaces to encourage explicit design decisions";
    const DOCS_CATEGORY: &'static str = "Best Practices";
    const RECOMMENDED: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        Self::MESSAGE_ID,
        "Optional properties should be avoided. Use required properties or union types instead. If this property is truly optional, add a comment above: \"//optional: reason\"",
    )];
}

impl NoOptionalProperties {
    pub const MESSAGE_ID: &'static str = "noOptionalProperty";

    pub fn new() -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
        }
    }

    pub fn with_severity(severity: DiagnosticSeverity) -> Self {
        Self { severity }
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    fn message() -> &'static str {
        Self::MESSAGES[0].1
    }

    /// Check one declared field, reporting through `host`.
    ///
    /// The `?` check and the union check are independent: a field can be reported twice.
    pub fn check<'a, H: RuleHost<'a>>(&self, field: PropertyField<'_, '_>, host: &mut H) {
        if field.is_optional() && !has_exemption_comment(field.span().start, &*host) {
            host.report(
                self.diagnostic(field.span())
                    .with_label(field.key_span(), "declared optional with `?`"),
            );
        }

        if let Some((marker, marker_span)) = field.declared_type().and_then(declared_absence_marker)
        {
            let keyword = marker.keyword();
            host.report(
                self.diagnostic(field.span())
                    .with_label(
                        marker_span,
                        format!("`{keyword}` makes this property implicitly absent"),
                    )
                    .with_help(format!(
                        "Remove `{keyword}` from the type and make absence explicit."
                    )),
            );
        }
    }

    fn diagnostic(&self, span: Span) -> Diagnostic {
        Diagnostic::new(Self::NAME, span, Self::message())
            .with_message_id(Self::MESSAGE_ID)
            .with_severity(self.severity)
    }
}

/// Whether the comment directly above `node_start` is an `//optional:` line comment.
///
/// Only the nearest comment counts. Unless it directly follows the opening `{` or `(` of
/// the body, it has to be on its own line (a trailing comment on the previous member
/// belongs to that member). No blank line may separate it from the node.
pub fn has_exemption_comment<'a, H: RuleHost<'a>>(node_start: u32, host: &H) -> bool {
    let comments = host.comments_before(node_start);
    let Some(nearest) = comments.last() else {
        return false;
    };

    if !nearest.is_line() || !nearest.text.trim().starts_with(EXEMPTION_MARKER) {
        return false;
    }

    let source = host.source_text();
    let Some(gap) = source.get(nearest.span.end as usize..node_start as usize) else {
        return false;
    };
    if gap.matches('\n').count() > 1 {
        return false;
    }

    if let Some(prev_end) = host.token_end_before(node_start) {
        let opens_body = source
            .get(..prev_end as usize)
            .is_some_and(|before| before.ends_with(['{', '(']));
        let lead = source.get(prev_end as usize..nearest.span.start as usize).unwrap_or("");
        if !opens_body && !lead.contains('\n') {
            return false;
        }
    }

    tracing::trace!(offset = node_start, "optional property exempted by comment");
    true
}
