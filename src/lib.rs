//! vibe-coder on OXC
//!
//! Parses JavaScript/TypeScript with OXC and runs the vibe-coder lint rules over it.
//!
//! ## Usage
//!
//! ```rust
//! use vibe_coder_oxc::{lint_source, RulesConfig};
//!
//! let source = "interface User { name?: string }";
//! let result = lint_source(source, "user.ts", RulesConfig::default()).unwrap();
//! assert_eq!(result.diagnostics.len(), 1);
//! ```

pub use vibe_linter::{
    plugin, ConfigError, Diagnostic, DiagnosticSeverity, LineIndex, LintResult, Plugin,
    RuleSeverity, RulesConfig,
};

#[cfg(feature = "napi")]
use napi_derive::napi;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Default file name when the caller does not give one
pub const DEFAULT_FILENAME: &str = "input.ts";

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("cannot lint `{0}`: unsupported file extension")]
    UnsupportedFile(String),
    #[error("failed to parse `{filename}`: {}", .messages.join("; "))]
    Parse {
        filename: String,
        messages: Vec<String>,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A diagnostic exposed to JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
pub struct JsDiagnostic {
    /// Qualified rule name, e.g. `vibe-coder/no-optional-properties`
    pub rule: String,
    pub message_id: Option<String>,
    pub message: String,
    /// "error" or "warning"
    pub severity: String,
    pub start: u32,
    pub end: u32,
    /// 1-based
    pub line: u32,
    /// 1-based, in bytes
    pub column: u32,
}

/// Lint options exposed to JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
#[derive(Default)]
pub struct JsLintOptions {
    /// Source filename, used to pick the dialect
    /// @default "input.ts"
    pub filename: Option<String>,

    /// ESLint-style config object as JSON
    /// @default the `recommended` preset
    pub config: Option<String>,
}

/// Lint source code from JavaScript
#[cfg(feature = "napi")]
#[napi]
pub fn lint_file(source: String, options: Option<JsLintOptions>) -> napi::Result<Vec<JsDiagnostic>> {
    let options = options.unwrap_or_default();
    let filename = options.filename.as_deref().unwrap_or(DEFAULT_FILENAME);
    let config = match options.config.as_deref() {
        Some(json) => RulesConfig::from_json(plugin(), json).map_err(to_napi_error)?,
        None => RulesConfig::default(),
    };

    let result = lint_source(&source, filename, config).map_err(to_napi_error)?;
    let index = LineIndex::new(&source);
    let plugin_name = plugin().name();

    Ok(result
        .diagnostics
        .into_iter()
        .map(|d| {
            let (line, column) = index.line_col(d.start);
            JsDiagnostic {
                rule: format!("{plugin_name}/{}", d.rule),
                message_id: d.message_id,
                message: d.message,
                severity: match d.severity {
                    DiagnosticSeverity::Error => "error".to_string(),
                    DiagnosticSeverity::Warning => "warning".to_string(),
                },
                start: d.start,
                end: d.end,
                line,
                column,
            }
        })
        .collect())
}

/// ESLint-shaped plugin description as JSON
#[cfg(feature = "napi")]
#[napi]
pub fn plugin_meta() -> String {
    plugin().to_json().to_string()
}

#[cfg(feature = "napi")]
fn to_napi_error(err: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

/// Parse `source` and run the configured rules over it.
///
/// The dialect follows the extension of `filename` (`.ts`, `.tsx`, `.mts`, `.js`, ...).
pub fn lint_source(
    source: &str,
    filename: &str,
    config: RulesConfig,
) -> Result<LintResult, LintError> {
    let source_type = SourceType::from_path(filename)
        .map_err(|_| LintError::UnsupportedFile(filename.to_string()))?;

    tracing::debug!(filename, "linting");

    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        tracing::warn!(filename, errors = messages.len(), "parse failed");
        return Err(LintError::Parse {
            filename: filename.to_string(),
            messages,
        });
    }

    Ok(vibe_linter::lint_with_config(source, &ret.program, config))
}

/// Lint with a config given as ESLint-style JSON
pub fn lint_source_with_json_config(
    source: &str,
    filename: &str,
    config_json: &str,
) -> Result<LintResult, LintError> {
    let config = RulesConfig::from_json(plugin(), config_json)?;
    lint_source(source, filename, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_clean_source() {
        let result = lint_source("interface A { a: string }", DEFAULT_FILENAME, RulesConfig::default())
            .unwrap();
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_lint_optional() {
        let result = lint_source("type A = { a?: string }", "a.mts", RulesConfig::default()).unwrap();
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = lint_source("", "notes.txt", RulesConfig::default()).unwrap_err();
        assert!(matches!(err, LintError::UnsupportedFile(name) if name == "notes.txt"));
    }

    #[test]
    fn test_parse_error() {
        let err = lint_source("interface {", DEFAULT_FILENAME, RulesConfig::default()).unwrap_err();
        match err {
            LintError::Parse { filename, messages } => {
                assert_eq!(filename, DEFAULT_FILENAME);
                assert!(!messages.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_config_error_is_wrapped() {
        let err = lint_source_with_json_config("", DEFAULT_FILENAME, r#"{"rules": {"nope": 2}}"#)
            .unwrap_err();
        assert!(matches!(err, LintError::Config(ConfigError::UnknownRule(_))));
        assert_eq!(err.to_string(), "unknown rule `nope`");
    }
}
