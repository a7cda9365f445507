//! Lint context for rule execution

use oxc_ast::Comment;
use oxc_span::Span;

use crate::Diagnostic;

/// Comment flavour as written in source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A comment as seen by rules: its style, the text between the delimiters, and where it sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaComment<'a> {
    pub style: CommentStyle,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> TriviaComment<'a> {
    /// Build from the full comment source, delimiters included
    pub fn from_source(raw: &'a str, span: Span) -> Self {
        if let Some(text) = raw.strip_prefix("//") {
            return Self { style: CommentStyle::Line, text, span };
        }
        let text = raw.strip_prefix("/*").unwrap_or(raw);
        let text = text.strip_suffix("*/").unwrap_or(text);
        Self { style: CommentStyle::Block, text, span }
    }

    pub fn is_line(&self) -> bool {
        self.style == CommentStyle::Line
    }
}

/// What a rule may ask of the host while checking a node.
///
/// [`LintContext`] is the real implementation; tests can substitute a stub.
pub trait RuleHost<'a> {
    /// Full source text of the file being linted
    fn source_text(&self) -> &'a str;

    /// End offset of the last non-comment token before `offset`, if any
    fn token_end_before(&self, offset: u32) -> Option<u32>;

    /// Comments between the preceding token and `offset`, in source order.
    /// With no preceding token this is every comment from the start of the file.
    fn comments_before(&self, offset: u32) -> Vec<TriviaComment<'a>>;

    /// Record a diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Whitespace as JavaScript sees it: Unicode white space, line terminators and the BOM
fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Context passed to rules during linting
pub struct LintContext<'a> {
    /// Source code being linted
    source_text: &'a str,
    /// Comments of the program, sorted by position
    comments: &'a [Comment],
    /// Collected diagnostics
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LintContext<'a> {
    pub fn new(source_text: &'a str, comments: &'a [Comment]) -> Self {
        Self {
            source_text,
            comments,
            diagnostics: Vec::new(),
        }
    }

    /// Get a slice of source text for a span
    pub fn span_text(&self, span: Span) -> &'a str {
        &self.source_text[span.start as usize..span.end as usize]
    }

    fn trivia(&self, comment: &Comment) -> TriviaComment<'a> {
        TriviaComment::from_source(self.span_text(comment.span), comment.span)
    }

    /// Comment ending exactly at `offset`
    fn comment_ending_at(&self, offset: u32) -> Option<&'a Comment> {
        let idx = self.comments.partition_point(|c| c.span.end < offset);
        self.comments.get(idx).filter(|c| c.span.end == offset)
    }

    /// Consume the context and return all diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get reference to diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<'a> RuleHost<'a> for LintContext<'a> {
    fn source_text(&self) -> &'a str {
        self.source_text
    }

    fn token_end_before(&self, offset: u32) -> Option<u32> {
        let mut cursor = (offset as usize).min(self.source_text.len());
        loop {
            let before = self.source_text.get(..cursor)?;
            cursor = before.trim_end_matches(is_js_whitespace).len();
            if cursor == 0 {
                return None;
            }
            match self.comment_ending_at(cursor as u32) {
                Some(comment) => cursor = comment.span.start as usize,
                None => return Some(cursor as u32),
            }
        }
    }

    fn comments_before(&self, offset: u32) -> Vec<TriviaComment<'a>> {
        let lower = self.token_end_before(offset).unwrap_or(0);
        let first = self.comments.partition_point(|c| c.span.start < lower);
        self.comments[first..]
            .iter()
            .take_while(|c| c.span.end <= offset)
            .map(|c| self.trivia(c))
            .collect()
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
