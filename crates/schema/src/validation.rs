use serde::{Deserialize, Serialize};

/// A declarative constraint attached to a field.
///
/// Rules are pure data so they serialize into schema tables; they are
/// checked against the raw wire value at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// Value must be at least `length` characters.
    MinLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be at most `length` characters.
    MaxLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must match the given regex pattern.
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be >= `value`.
    Min {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be <= `value`.
    Max {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be one of the given raw strings.
    OneOf {
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    /// Require a minimum string length.
    #[must_use]
    pub fn min_length(length: usize) -> Self {
        Self::MinLength {
            length,
            message: None,
        }
    }

    /// Require a maximum string length.
    #[must_use]
    pub fn max_length(length: usize) -> Self {
        Self::MaxLength {
            length,
            message: None,
        }
    }

    /// Require the value to match a regex pattern.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: None,
        }
    }

    /// Require a numeric minimum (inclusive).
    #[must_use]
    pub fn min(value: f64) -> Self {
        Self::Min {
            value,
            message: None,
        }
    }

    /// Require a numeric maximum (inclusive).
    #[must_use]
    pub fn max(value: f64) -> Self {
        Self::Max {
            value,
            message: None,
        }
    }

    /// Check a raw wire value against this rule.
    ///
    /// Returns the failure message on violation; the rule's custom
    /// `message` wins over the generated one.
    pub fn check(&self, raw: &str) -> Result<(), String> {
        match self {
            Self::MinLength { length, message } => {
                if raw.chars().count() < *length {
                    Err(fail(message, format!("shorter than {length} characters")))
                } else {
                    Ok(())
                }
            }
            Self::MaxLength { length, message } => {
                if raw.chars().count() > *length {
                    Err(fail(message, format!("longer than {length} characters")))
                } else {
                    Ok(())
                }
            }
            Self::Pattern { pattern, message } => {
                let re = regex::Regex::new(pattern)
                    .map_err(|e| format!("invalid pattern `{pattern}`: {e}"))?;
                if re.is_match(raw) {
                    Ok(())
                } else {
                    Err(fail(message, format!("does not match `{pattern}`")))
                }
            }
            Self::Min { value, message } => match raw.parse::<f64>() {
                Ok(n) if n >= *value => Ok(()),
                Ok(_) => Err(fail(message, format!("below minimum {value}"))),
                Err(_) => Err(fail(message, format!("`{raw}` is not a number"))),
            },
            Self::Max { value, message } => match raw.parse::<f64>() {
                Ok(n) if n <= *value => Ok(()),
                Ok(_) => Err(fail(message, format!("above maximum {value}"))),
                Err(_) => Err(fail(message, format!("`{raw}` is not a number"))),
            },
            Self::OneOf { values, message } => {
                if values.iter().any(|candidate| candidate == raw) {
                    Ok(())
                } else {
                    Err(fail(
                        message,
                        format!("`{raw}` is not one of the allowed values"),
                    ))
                }
            }
        }
    }
}

fn fail(custom: &Option<String>, generated: String) -> String {
    custom.clone().unwrap_or(generated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_and_max_length() {
        assert!(ValidationRule::min_length(3).check("abc").is_ok());
        assert!(ValidationRule::min_length(3).check("ab").is_err());
        assert!(ValidationRule::max_length(3).check("abc").is_ok());
        assert!(ValidationRule::max_length(3).check("abcd").is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(ValidationRule::max_length(2).check("éé").is_ok());
        assert!(ValidationRule::min_length(3).check("éé").is_err());
    }

    #[test]
    fn pattern_rule() {
        let rule = ValidationRule::pattern(r"^https?://");
        assert!(rule.check("https://shop.example").is_ok());
        assert!(rule.check("ftp://shop.example").is_err());
    }

    #[test]
    fn pattern_rule_rejects_bad_regex() {
        let rule = ValidationRule::pattern("(unclosed");
        let err = rule.check("anything").unwrap_err();
        assert!(err.contains("invalid pattern"));
    }

    #[test]
    fn numeric_bounds() {
        assert!(ValidationRule::min(1.0).check("1").is_ok());
        assert!(ValidationRule::min(1.0).check("0.5").is_err());
        assert!(ValidationRule::max(100.0).check("100").is_ok());
        assert!(ValidationRule::max(100.0).check("101").is_err());
    }

    #[test]
    fn numeric_rules_reject_non_numbers() {
        let err = ValidationRule::min(0.0).check("abc").unwrap_err();
        assert!(err.contains("not a number"));
    }

    #[test]
    fn one_of_rule() {
        let rule = ValidationRule::OneOf {
            values: vec!["asc".into(), "desc".into()],
            message: None,
        };
        assert!(rule.check("asc").is_ok());
        assert!(rule.check("up").is_err());
    }

    #[test]
    fn custom_message_wins() {
        let rule = ValidationRule::MinLength {
            length: 8,
            message: Some("use at least 8 characters".into()),
        };
        assert_eq!(
            rule.check("short").unwrap_err(),
            "use at least 8 characters"
        );
    }

    #[test]
    fn serde_round_trip() {
        let rule = ValidationRule::Min {
            value: 1.0,
            message: Some("must be positive".into()),
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"rule\":\"min\""));

        let parsed: ValidationRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn optional_message_omitted_from_json() {
        let json = serde_json::to_string(&ValidationRule::min_length(1)).unwrap();
        assert!(!json.contains("message"));
    }
}
