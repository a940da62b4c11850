//! Attribute validators
//!
//! Validators run during configuration validation, before any CRUD
//! operation sees the value. Null and unknown values are skipped by the
//! schema walker, so implementations only handle known values.

use crate::types::{AttributePath, Diagnostic, Dynamic};
use regex::Regex;

pub trait Validator: Send + Sync {
    /// Human-readable description
    fn description(&self) -> String;

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>);
}

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLengthValidator {
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl Validator for StringLengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("length must be between {} and {}", min, max),
            (Some(min), None) => format!("length must be at least {}", min),
            (None, Some(max)) => format!("length must be at most {}", max),
            (None, None) => "any length".to_string(),
        }
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_string() else {
            return;
        };
        let len = s.chars().count();
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);
        if too_short || too_long {
            diagnostics.push(
                Diagnostic::error(
                    format!("Invalid value for {}", path),
                    format!("expected {} {}, got {}", path, self.description(), len),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}

/// Matches a string against a regular expression. Like Terraform's
/// `StringMatch` the pattern is not implicitly anchored.
pub struct StringPatternValidator {
    pattern: Result<Regex, regex::Error>,
    message: String,
}

impl StringPatternValidator {
    pub fn new(pattern: &str, message: &str) -> Self {
        Self {
            pattern: Regex::new(pattern),
            message: message.to_string(),
        }
    }
}

impl Validator for StringPatternValidator {
    fn description(&self) -> String {
        self.message.clone()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_string() else {
            return;
        };
        match &self.pattern {
            Ok(pattern) if pattern.is_match(s) => {}
            Ok(pattern) => diagnostics.push(
                Diagnostic::error(
                    format!("Invalid value for {}", path),
                    format!(
                        "invalid value for {} ({}): \"{}\" does not match {}",
                        path, self.message, s, pattern
                    ),
                )
                .with_attribute(path.clone()),
            ),
            Err(e) => diagnostics.push(
                Diagnostic::error(
                    "Invalid validator pattern",
                    format!("pattern for {} failed to compile: {}", path, e),
                )
                .with_attribute(path.clone()),
            ),
        }
    }
}

/// Accepts only values from a fixed enumeration
pub struct StringInSliceValidator {
    values: Vec<String>,
}

impl StringInSliceValidator {
    pub fn new(values: &[&str]) -> Self {
        Self {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl Validator for StringInSliceValidator {
    fn description(&self) -> String {
        format!("must be one of {:?}", self.values)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_string() else {
            return;
        };
        if !self.values.iter().any(|v| v == s) {
            diagnostics.push(
                Diagnostic::error(
                    format!("Invalid value for {}", path),
                    format!("expected {} to be one of {:?}, got {}", path, self.values, s),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}
