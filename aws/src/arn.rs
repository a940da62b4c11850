//! Amazon Resource Names

use std::fmt;
use tfplug::types::{AttributePath, Diagnostic, Dynamic};
use tfplug::validator::Validator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Split an ARN into its six colon-separated sections. The resource
    /// section may itself contain colons.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut sections = s.splitn(6, ':');

        match sections.next() {
            Some("arn") => {}
            _ => return Err("arn: invalid prefix".to_string()),
        }

        let (Some(partition), Some(service), Some(region), Some(account_id), Some(resource)) = (
            sections.next(),
            sections.next(),
            sections.next(),
            sections.next(),
            sections.next(),
        ) else {
            return Err("arn: not enough sections".to_string());
        };

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

/// `aws`, `aws-cn`, `aws-us-gov`, `aws-iso-b`, ...
pub fn is_valid_partition(partition: &str) -> bool {
    let Some(rest) = partition.strip_prefix("aws") else {
        return false;
    };
    rest.is_empty()
        || rest.strip_prefix('-').is_some_and(|tail| {
            tail.split('-')
                .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_lowercase()))
        })
}

/// `us-east-1`, `us-gov-west-1`, `cn-north-1`, ...
pub fn is_valid_region(region: &str) -> bool {
    let segments: Vec<&str> = region.split('-').collect();
    let [country, middle @ .., number] = segments.as_slice() else {
        return false;
    };
    country.len() == 2
        && country.chars().all(|c| c.is_ascii_lowercase())
        && !middle.is_empty()
        && middle
            .iter()
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_lowercase()))
        && number.len() == 1
        && number.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_account_id(account_id: &str) -> bool {
    account_id.len() == 12 && account_id.chars().all(|c| c.is_ascii_digit())
}

/// Account section of an ARN: a 12-digit ID or one of the AWS-owned
/// pseudo accounts
fn is_valid_arn_account(account: &str) -> bool {
    matches!(account, "aws" | "aws-managed" | "third-party") || is_valid_account_id(account)
}

/// Checks that a value is a well-formed ARN
pub fn validate_arn(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }

    let arn = Arn::parse(value)?;

    if !is_valid_partition(&arn.partition) {
        return Err(format!("invalid partition value ({})", arn.partition));
    }
    if !arn.region.is_empty() && !is_valid_region(&arn.region) {
        return Err(format!("invalid region value ({})", arn.region));
    }
    if !arn.account_id.is_empty() && !is_valid_arn_account(&arn.account_id) {
        return Err(format!("invalid account ID value ({})", arn.account_id));
    }
    if arn.resource.is_empty() {
        return Err("missing resource value".to_string());
    }

    Ok(())
}

pub struct ArnValidator;

impl Validator for ArnValidator {
    fn description(&self) -> String {
        "value must be a valid ARN".to_string()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_string() else {
            return;
        };
        if let Err(reason) = validate_arn(s) {
            diagnostics.push(
                Diagnostic::error(
                    format!("Invalid value for {}", path),
                    format!("\"{}\" ({}) is an invalid ARN: {}", path, s, reason),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}

pub struct AccountIdValidator;

impl Validator for AccountIdValidator {
    fn description(&self) -> String {
        "value must be a 12-digit AWS account ID".to_string()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_string() else {
            return;
        };
        if !is_valid_account_id(s) {
            diagnostics.push(
                Diagnostic::error(
                    format!("Invalid value for {}", path),
                    format!("\"{}\" ({}) must be a 12-digit AWS account ID", path, s),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}
