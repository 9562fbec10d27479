use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Current raw values of sibling fields, keyed by field id.
pub type FieldValues = HashMap<String, String>;

/// A condition evaluated against a sibling field's raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum DependsCondition {
    /// Sibling value equals the given raw string.
    Equals { value: String },
    /// Sibling value is one of the given raw strings.
    OneOf { values: Vec<String> },
    /// Sibling value is truthy (`1` or `true`).
    IsTrue,
    /// Sibling value is falsy (`0`, `false`, or empty).
    IsFalse,
    /// Sibling has any non-empty value.
    IsSet,
}

impl DependsCondition {
    /// Evaluate against a raw value; `None` means the sibling is unset.
    #[must_use]
    pub fn evaluate(&self, value: Option<&str>) -> bool {
        match self {
            Self::Equals { value: expected } => value == Some(expected.as_str()),
            Self::OneOf { values } => {
                value.is_some_and(|v| values.iter().any(|candidate| candidate == v))
            }
            Self::IsTrue => matches!(value, Some("1" | "true")),
            Self::IsFalse => matches!(value, None | Some("0" | "false" | "")),
            Self::IsSet => value.is_some_and(|v| !v.is_empty()),
        }
    }
}

/// A single dependency rule: check a sibling field against a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependsRule {
    /// The sibling field id to check.
    pub field: String,
    /// The condition to evaluate against that field's value.
    pub condition: DependsCondition,
}

impl DependsRule {
    /// Create a rule for the given sibling field.
    #[must_use]
    pub fn new(field: impl Into<String>, condition: DependsCondition) -> Self {
        Self {
            field: field.into(),
            condition,
        }
    }

    /// Evaluate this rule against the current sibling values.
    #[must_use]
    pub fn evaluate(&self, values: &FieldValues) -> bool {
        self.condition
            .evaluate(values.get(&self.field).map(String::as_str))
    }
}

/// Composable dependency logic: combine rules with ALL, ANY, NOT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "logic", rename_all = "snake_case")]
pub enum DependsRuleSet {
    /// A single rule.
    Single(DependsRule),
    /// All nested rules must match.
    All { rules: Vec<DependsRuleSet> },
    /// At least one nested rule must match.
    Any { rules: Vec<DependsRuleSet> },
    /// Negates the nested rule.
    Not { rule: Box<DependsRuleSet> },
}

impl DependsRuleSet {
    /// Shorthand for a single equality dependency, the common case.
    #[must_use]
    pub fn when_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Single(DependsRule::new(
            field,
            DependsCondition::Equals {
                value: value.into(),
            },
        ))
    }

    /// Shorthand for "sibling toggle is on".
    #[must_use]
    pub fn when_true(field: impl Into<String>) -> Self {
        Self::Single(DependsRule::new(field, DependsCondition::IsTrue))
    }

    /// Evaluate the rule set against the current sibling values.
    #[must_use]
    pub fn evaluate(&self, values: &FieldValues) -> bool {
        match self {
            Self::Single(rule) => rule.evaluate(values),
            Self::All { rules } => rules.iter().all(|r| r.evaluate(values)),
            Self::Any { rules } => rules.iter().any(|r| r.evaluate(values)),
            Self::Not { rule } => !rule.evaluate(values),
        }
    }

    /// Collect all sibling field ids referenced by this rule set.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        let mut deps = Vec::new();
        self.collect_dependencies(&mut deps);
        deps.sort();
        deps.dedup();
        deps
    }

    fn collect_dependencies(&self, deps: &mut Vec<String>) {
        match self {
            Self::Single(rule) => deps.push(rule.field.clone()),
            Self::All { rules } | Self::Any { rules } => {
                for r in rules {
                    r.collect_dependencies(deps);
                }
            }
            Self::Not { rule } => rule.collect_dependencies(deps),
        }
    }
}
