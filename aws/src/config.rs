//! Provider configuration
//!
//! Values set in the provider block win; unset values fall back to the
//! standard AWS environment variables.

use crate::arn::{is_valid_account_id, AccountIdValidator};
use crate::error::{ProviderError, Result};
use crate::tags::IgnoreTagsConfig;
use serde::Deserialize;
use tfplug::schema::NestedBlockBuilder;
use tfplug::types::null_as_default;
use tfplug::{AttributeBuilder, AttributeType, Config, Schema, SchemaBuilder};

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENV_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";

#[derive(Debug, Default, Deserialize)]
struct ProviderConfigModel {
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    partition: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    ignore_tags: Vec<IgnoreTagsModel>,
}

#[derive(Debug, Default, Deserialize)]
struct IgnoreTagsModel {
    #[serde(default, deserialize_with = "null_as_default")]
    keys: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    key_prefixes: Vec<String>,
}

/// Fully resolved provider settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub region: String,
    /// None means "ask STS for the caller's account"
    pub account_id: Option<String>,
    pub partition: String,
    pub ignore_tags: IgnoreTagsConfig,
}

impl ProviderConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let model: ProviderConfigModel = if config.is_null() {
            ProviderConfigModel::default()
        } else {
            config
                .to_model()
                .map_err(|e| ProviderError::InvalidConfiguration(e.to_string()))?
        };

        let region = non_empty(model.region)
            .or_else(|| env_var(ENV_REGION))
            .or_else(|| env_var(ENV_DEFAULT_REGION))
            .ok_or_else(|| {
                ProviderError::InvalidConfiguration(format!(
                    "region is required (set in provider config or {} env var)",
                    ENV_REGION
                ))
            })?;

        let account_id = non_empty(model.account_id).or_else(|| env_var(ENV_ACCOUNT_ID));
        if let Some(account_id) = &account_id {
            if !is_valid_account_id(account_id) {
                return Err(ProviderError::InvalidConfiguration(format!(
                    "account_id ({}) must be a 12-digit AWS account ID",
                    account_id
                )));
            }
        }

        let partition =
            non_empty(model.partition).unwrap_or_else(|| partition_for_region(&region).to_string());

        let ignore_tags = model
            .ignore_tags
            .into_iter()
            .fold(IgnoreTagsConfig::default(), |mut acc, block| {
                acc.keys.extend(block.keys);
                acc.key_prefixes.extend(block.key_prefixes);
                acc
            });

        Ok(Self {
            region,
            account_id,
            partition,
            ignore_tags,
        })
    }
}

/// Partition a region belongs to
pub fn partition_for_region(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "aws-cn"
    } else if region.starts_with("us-gov-") {
        "aws-us-gov"
    } else if region.starts_with("us-isob-") {
        "aws-iso-b"
    } else if region.starts_with("us-iso-") {
        "aws-iso"
    } else {
        "aws"
    }
}

pub fn provider_schema() -> Schema {
    SchemaBuilder::new()
        .description("Manages AWS S3 Control and Kendra resources")
        .attribute(
            AttributeBuilder::new("region", AttributeType::String)
                .description("AWS region. Defaults to AWS_REGION, then AWS_DEFAULT_REGION")
                .optional()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("account_id", AttributeType::String)
                .description("AWS account ID. Defaults to AWS_ACCOUNT_ID, then the caller identity")
                .optional()
                .validator(AccountIdValidator)
                .build(),
        )
        .attribute(
            AttributeBuilder::new("partition", AttributeType::String)
                .description("AWS partition. Derived from the region when unset")
                .optional()
                .build(),
        )
        .block(
            NestedBlockBuilder::list("ignore_tags")
                .description("Tags to leave out of every tags attribute")
                .max_items(1)
                .attribute(
                    AttributeBuilder::new(
                        "keys",
                        AttributeType::Set(Box::new(AttributeType::String)),
                    )
                    .optional()
                    .build(),
                )
                .attribute(
                    AttributeBuilder::new(
                        "key_prefixes",
                        AttributeType::Set(Box::new(AttributeType::String)),
                    )
                    .optional()
                    .build(),
                )
                .build(),
        )
        .build()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}
