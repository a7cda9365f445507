//! Which rules run, and at what severity

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostic::DiagnosticSeverity;
use crate::plugin::Plugin;
use crate::rules::NoOptionalProperties;
use crate::RuleMeta;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid severity {value} for rule `{rule}` (expected \"off\", \"warn\", \"error\", 0, 1 or 2)")]
    InvalidSeverity { rule: String, value: String },
    #[error("rule `{rule}` takes no options")]
    UnexpectedOptions { rule: String },
}

/// Severity a rule is configured at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Off,
    Warn,
    Error,
}

impl RuleSeverity {
    /// Severity of the diagnostics the rule emits, `None` when it is switched off
    pub fn diagnostic_severity(self) -> Option<DiagnosticSeverity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(DiagnosticSeverity::Warning),
            Self::Error => Some(DiagnosticSeverity::Error),
        }
    }

    /// Parse ESLint's rule entry forms: `"error"`, `2`, `["error", ...options]`.
    ///
    /// Returns the severity and whatever options followed it.
    fn from_entry<'v>(rule: &str, value: &'v Value) -> Result<(Self, &'v [Value]), ConfigError> {
        let invalid = || ConfigError::InvalidSeverity {
            rule: rule.to_string(),
            value: value.to_string(),
        };

        let severity = match value {
            Value::String(name) => match name.as_str() {
                "off" => Self::Off,
                "warn" => Self::Warn,
                "error" => Self::Error,
                _ => return Err(invalid()),
            },
            Value::Number(level) => match level.as_u64() {
                Some(0) => Self::Off,
                Some(1) => Self::Warn,
                Some(2) => Self::Error,
                _ => return Err(invalid()),
            },
            Value::Array(items) => match items.as_slice() {
                [level @ (Value::String(_) | Value::Number(_)), options @ ..] => {
                    let (severity, _) = Self::from_entry(rule, level)?;
                    return Ok((severity, options));
                }
                _ => return Err(invalid()),
            },
            _ => return Err(invalid()),
        };
        Ok((severity, &[]))
    }
}

/// On-disk shape, mirroring an ESLint config object
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    rules: IndexMap<String, Value>,
}

/// Configuration for which rules are enabled
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub no_optional_properties: Option<NoOptionalProperties>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            no_optional_properties: Some(NoOptionalProperties::new()),
        }
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none() -> Self {
        Self {
            no_optional_properties: None,
        }
    }

    pub fn with_no_optional_properties(mut self, severity: RuleSeverity) -> Self {
        self.no_optional_properties = severity
            .diagnostic_severity()
            .map(NoOptionalProperties::with_severity);
        self
    }

    /// Start from nothing and apply the named preset of `plugin`
    pub fn from_preset(plugin: &Plugin, name: &str) -> Result<Self, ConfigError> {
        Self::none().extend_preset(plugin, name)
    }

    /// Read `{"extends": "<preset>", "rules": {"<rule>": <severity>}}`.
    ///
    /// Without `extends` the starting point is [`RulesConfig::none`]; entries in `rules`
    /// override what the preset set. Unknown top-level keys are rejected.
    pub fn from_json(plugin: &Plugin, json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;

        let mut config = Self::none();
        if let Some(preset) = raw.extends.as_deref() {
            let preset = preset
                .strip_prefix("plugin:")
                .and_then(|rest| rest.strip_prefix(plugin.name()))
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(preset);
            config = config.extend_preset(plugin, preset)?;
        }

        for (rule, entry) in &raw.rules {
            let (severity, options) = RuleSeverity::from_entry(rule, entry)?;
            config = config.with_rule(plugin, rule, severity, options)?;
        }

        tracing::debug!(
            no_optional_properties = config.no_optional_properties.is_some(),
            "loaded rules config"
        );
        Ok(config)
    }

    fn extend_preset(self, plugin: &Plugin, name: &str) -> Result<Self, ConfigError> {
        let preset = plugin
            .preset(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        preset.rules.iter().try_fold(self, |config, (rule, severity)| {
            config.with_rule(plugin, rule, *severity, &[])
        })
    }

    /// Set one rule by bare or qualified name.
    ///
    /// `options` are refused for rules whose schema is empty.
    pub fn with_rule(
        self,
        plugin: &Plugin,
        rule: &str,
        severity: RuleSeverity,
        options: &[Value],
    ) -> Result<Self, ConfigError> {
        let descriptor = plugin
            .rule(rule)
            .ok_or_else(|| ConfigError::UnknownRule(rule.to_string()))?;

        if !options.is_empty() && !descriptor.accepts_options() {
            return Err(ConfigError::UnexpectedOptions {
                rule: rule.to_string(),
            });
        }

        if descriptor.name == NoOptionalProperties::NAME {
            Ok(self.with_no_optional_properties(severity))
        } else {
            Err(ConfigError::UnknownRule(rule.to_string()))
        }
    }

    /// Whether any rule is switched on
    pub fn is_empty(&self) -> bool {
        self.no_optional_properties.is_none()
    }
}
