//! Validation rules evaluated by the form controller

use serde::{Deserialize, Serialize};

/// A validator descriptor attached to a field registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    Required {
        #[serde(default)]
        message: Option<String>,
    },
    MinLength {
        len: usize,
        #[serde(default)]
        message: Option<String>,
    },
    MaxLength {
        len: usize,
        #[serde(default)]
        message: Option<String>,
    },
    /// Counts ASCII digits only, so masks and currency labels don't matter
    MinDigits {
        count: usize,
        #[serde(default)]
        message: Option<String>,
    },
}

impl Rule {
    pub fn required() -> Self {
        Rule::Required { message: None }
    }

    pub fn min_length(len: usize) -> Self {
        Rule::MinLength { len, message: None }
    }

    pub fn max_length(len: usize) -> Self {
        Rule::MaxLength { len, message: None }
    }

    pub fn min_digits(count: usize) -> Self {
        Rule::MinDigits {
            count,
            message: None,
        }
    }

    /// Replace the default message
    pub fn with_message(mut self, text: &str) -> Self {
        match &mut self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::MinDigits { message, .. } => *message = Some(text.to_string()),
        }
        self
    }

    /// Returns the error message when `value` breaks the rule
    pub fn check(&self, value: &str) -> Option<String> {
        let length = value.chars().count();
        let (passed, custom, default) = match self {
            Rule::Required { message } => (
                !value.trim().is_empty(),
                message,
                "This field is required".to_string(),
            ),
            Rule::MinLength { len, message } => (
                length >= *len,
                message,
                format!("Must be at least {len} characters"),
            ),
            Rule::MaxLength { len, message } => (
                length <= *len,
                message,
                format!("Must be at most {len} characters"),
            ),
            Rule::MinDigits { count, message } => (
                value.chars().filter(|c| c.is_ascii_digit()).count() >= *count,
                message,
                format!("Must contain at least {count} digits"),
            ),
        };

        if passed {
            None
        } else {
            Some(custom.clone().unwrap_or(default))
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Rule::Required { .. })
    }
}

/// Run `rules` in order and collect every failure
pub fn evaluate(rules: &[Rule], value: &str) -> Vec<String> {
    rules.iter().filter_map(|rule| rule.check(value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required() {
        assert_eq!(
            Rule::required().check(""),
            Some("This field is required".to_string())
        );
        assert_eq!(
            Rule::required().check("   "),
            Some("This field is required".to_string())
        );
        assert!(Rule::required().check("x").is_none());
    }

    #[test]
    fn test_length_bounds_count_chars() {
        assert!(Rule::min_length(3).check("ab").is_some());
        assert!(Rule::min_length(3).check("abc").is_none());
        assert!(Rule::max_length(2).check("çã").is_none());
        assert_eq!(
            Rule::max_length(2).check("abc"),
            Some("Must be at most 2 characters".to_string())
        );
    }

    #[test]
    fn test_min_digits_ignores_mask_literals() {
        let rule = Rule::min_digits(11);
        assert!(rule.check("(11) 98765-4321").is_none());
        assert!(rule.check("(11) 9876").is_some());
    }

    #[test]
    fn test_custom_message() {
        let rule = Rule::min_length(5).with_message("Too short");
        assert_eq!(rule.check("abc"), Some("Too short".to_string()));
    }

    #[test]
    fn test_evaluate_keeps_order() {
        let rules = [
            Rule::required(),
            Rule::min_length(3).with_message("first"),
            Rule::min_digits(1).with_message("second"),
        ];
        assert_eq!(
            evaluate(&rules, ""),
            vec![
                "This field is required".to_string(),
                "first".to_string(),
                "second".to_string(),
            ]
        );
        assert!(evaluate(&rules, "a1b").is_empty());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"[
            {"type": "required"},
            {"type": "min_length", "len": 3, "message": "Too short"}
        ]"#;
        let rules: Vec<Rule> = serde_json::from_str(json).unwrap();
        assert_eq!(
            rules,
            vec![
                Rule::required(),
                Rule::min_length(3).with_message("Too short"),
            ]
        );
    }
}
