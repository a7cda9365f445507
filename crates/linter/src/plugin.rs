//! Plugin registry: rule descriptions and presets, as ESLint sees them

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::RuleSeverity;
use crate::rules::NoOptionalProperties;
use crate::{RuleCategory, RuleMeta};

/// Name the rules are published under (`vibe-coder/<rule>`)
pub const PLUGIN_NAME: &str = "vibe-coder";

/// `meta.docs` of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDocs {
    pub description: &'static str,
    pub category: &'static str,
    pub recommended: bool,
}

/// Declarative description of a rule (ESLint `meta`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    #[serde(skip)]
    pub name: &'static str,
    #[serde(rename = "type")]
    pub category: RuleCategory,
    pub docs: RuleDocs,
    /// Always `None`: no rule here produces fixes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixable: Option<&'static str>,
    /// JSON schema of the rule options; empty means the rule takes none
    pub schema: Vec<Value>,
    pub messages: IndexMap<&'static str, &'static str>,
}

impl RuleDescriptor {
    pub fn of<R: RuleMeta>() -> Self {
        Self {
            name: R::NAME,
            category: R::CATEGORY,
            docs: RuleDocs {
                description: R::DESCRIPTION,
                category: R::DOCS_CATEGORY,
                recommended: R::RECOMMENDED,
            },
            fixable: None,
            schema: Vec::new(),
            messages: R::MESSAGES.iter().copied().collect(),
        }
    }

    /// `vibe-coder/<name>`
    pub fn qualified_name(&self) -> String {
        format!("{PLUGIN_NAME}/{}", self.name)
    }

    pub fn accepts_options(&self) -> bool {
        !self.schema.is_empty()
    }
}

/// A named config preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub plugins: Vec<&'static str>,
    /// Qualified rule name to severity
    pub rules: IndexMap<String, RuleSeverity>,
}

/// The plugin object: every rule plus the presets that switch them on
#[derive(Debug, Clone)]
pub struct Plugin {
    name: &'static str,
    version: &'static str,
    rules: IndexMap<&'static str, RuleDescriptor>,
    configs: IndexMap<&'static str, Preset>,
}

impl Default for Plugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin {
    pub fn new() -> Self {
        let rules: IndexMap<_, _> = [NoOptionalProperties::descriptor()]
            .into_iter()
            .map(|rule| (rule.name, rule))
            .collect();

        let all_at_error = || Preset {
            plugins: vec![PLUGIN_NAME],
            rules: rules
                .values()
                .map(|rule| (rule.qualified_name(), RuleSeverity::Error))
                .collect(),
        };
        let configs = IndexMap::from([("recommended", all_at_error()), ("strict", all_at_error())]);

        Self {
            name: PLUGIN_NAME,
            version: env!("CARGO_PKG_VERSION"),
            rules,
            configs,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn presets(&self) -> impl Iterator<Item = (&'static str, &Preset)> {
        self.configs.iter().map(|(name, preset)| (*name, preset))
    }

    /// Look a rule up by bare (`no-optional-properties`) or qualified name
    pub fn rule(&self, name: &str) -> Option<&RuleDescriptor> {
        let bare = name
            .strip_prefix(self.name)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(name);
        self.rules.get(bare)
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.configs.get(name)
    }

    /// ESLint-shaped plugin object
    pub fn to_json(&self) -> Value {
        let rules: serde_json::Map<String, Value> = self
            .rules
            .iter()
            .map(|(name, rule)| (name.to_string(), json!({ "meta": rule })))
            .collect();

        json!({
            "meta": { "name": self.name, "version": self.version },
            "rules": rules,
            "configs": self.configs,
        })
    }
}

/// The process-wide plugin, built on first use
pub fn plugin() -> &'static Plugin {
    static PLUGIN: OnceLock<Plugin> = OnceLock::new();
    PLUGIN.get_or_init(Plugin::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_lookup() {
        let plugin = Plugin::new();
        assert!(plugin.rule("no-optional-properties").is_some());
        assert!(plugin.rule("vibe-coder/no-optional-properties").is_some());
        assert!(plugin.rule("other/no-optional-properties").is_none());
        assert!(plugin.rule("no-such-rule").is_none());
    }

    #[test]
    fn test_descriptor() {
        let rule = NoOptionalProperties::descriptor();
        assert_eq!(rule.name, "no-optional-properties");
        assert_eq!(rule.category, RuleCategory::Suggestion);
        assert!(rule.docs.recommended);
        assert!(!rule.accepts_options());
        assert_eq!(rule.fixable, None);
        assert_eq!(rule.messages.len(), 1);
        assert!(rule.messages["noOptionalProperty"].contains("//optional: reason"));
    }

    #[test]
    fn test_presets_enable_rule_at_error() {
        let plugin = Plugin::new();
        let names: Vec<_> = plugin.presets().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["recommended", "strict"]);

        for (_, preset) in plugin.presets() {
            assert_eq!(preset.plugins, vec!["vibe-coder"]);
            assert_eq!(
                preset.rules.get("vibe-coder/no-optional-properties"),
                Some(&RuleSeverity::Error)
            );
        }
    }

    #[test]
    fn test_shared_plugin_is_stable() {
        assert!(std::ptr::eq(plugin(), plugin()));
        assert_eq!(plugin().name(), PLUGIN_NAME);
    }

    #[test]
    fn test_to_json_snapshot() {
        let json = serde_json::to_string_pretty(&Plugin::new().to_json()).unwrap();
        insta::assert_snapshot!(json.replace(env!("CARGO_PKG_VERSION"), "<version>"), @r###"
        {
          "meta": {
            "name": "vibe-coder",
            "version": "<version>"
          },
          "rules": {
            "no-optional-properties": {
              "meta": {
                "type": "suggestion",
                "docs": {
                  "description": "Prevent optional properties in types and interfaces to encourage explicit design decisions",
                  "category": "Best Practices",
                  "recommended": true
                },
                "schema": [],
                "messages": {
                  "noOptionalProperty": "Optional properties should be avoided. Use required properties or union types instead. If this property is truly optional, add a comment above: \"//optional: reason\""
                }
              }
            }
          },
          "configs": {
            "recommended": {
              "plugins": [
                "vibe-coder"
              ],
              "rules": {
                "vibe-coder/no-optional-properties": "error"
              }
            },
            "strict": {
              "plugins": [
                "vibe-coder"
              ],
              "rules": {
                "vibe-coder/no-optional-properties": "error"
              }
            }
          }
        }
        "###);
    }
}
