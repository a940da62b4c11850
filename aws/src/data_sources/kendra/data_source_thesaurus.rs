//! Kendra thesaurus data source

use crate::api::kendra::{DescribeThesaurusInput, S3Path};
use crate::api::{self, KendraApi};
use crate::arn::Arn;
use crate::error::{ProviderError, Result};
use crate::resource_id::thesaurus_create_resource_id;
use crate::tags::{IgnoreTagsConfig, KeyValueTags};
use crate::AwsProviderData;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::data_source::{DataSource, ReadDataSourceRequest, ReadDataSourceResponse};
use tfplug::schema::{AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder};
use tfplug::types::{null_as_default, AttributePath, DynamicValue};
use tfplug::validator::{StringLengthValidator, StringPatternValidator};

pub const TYPE_NAME: &str = "aws_kendra_thesaurus";

const RESOURCE_NAME: &str = "Kendra Thesaurus";

/// RFC 3339 rendering of the zero timestamp, used when the service omits one
pub const ZERO_TIME_RFC3339: &str = "0001-01-01T00:00:00Z";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThesaurusModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_size_bytes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_s3_path: Vec<SourceS3PathModel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub synonym_rule_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub term_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thesaurus_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceS3PathModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
}

pub fn flatten_source_s3_path(api_object: Option<&S3Path>) -> Vec<SourceS3PathModel> {
    let Some(api_object) = api_object else {
        return vec![];
    };

    vec![SourceS3PathModel {
        bucket: api_object.bucket.clone().unwrap_or_default(),
        key: api_object.key.clone().unwrap_or_default(),
    }]
}

fn format_timestamp(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => ZERO_TIME_RFC3339.to_string(),
    }
}

pub struct ThesaurusDataSource {
    kendra: Arc<dyn KendraApi>,
    region: String,
    account_id: String,
    partition: String,
    ignore_tags: IgnoreTagsConfig,
}

impl ThesaurusDataSource {
    pub fn new(provider_data: &AwsProviderData) -> Self {
        Self {
            kendra: provider_data.kendra.clone(),
            region: provider_data.region.clone(),
            account_id: provider_data.account_id.clone(),
            partition: provider_data.partition.clone(),
            ignore_tags: provider_data.ignore_tags.clone(),
        }
    }

    pub fn schema_static() -> Schema {
        let computed_string = |name: &str, description: &str| {
            AttributeBuilder::new(name, AttributeType::String)
                .description(description)
                .computed()
                .build()
        };
        let computed_number = |name: &str, description: &str| {
            AttributeBuilder::new(name, AttributeType::Number)
                .description(description)
                .computed()
                .build()
        };

        SchemaBuilder::new()
            .version(0)
            .description("Provides details about a specific Amazon Kendra Thesaurus")
            .attribute(computed_string("id", "Thesaurus ID and index ID separated by a slash"))
            .attribute(computed_string("arn", "ARN of the thesaurus"))
            .attribute(computed_string(
                "created_at",
                "RFC 3339 timestamp of when the thesaurus was created",
            ))
            .attribute(computed_string("description", "Description of the thesaurus"))
            .attribute(computed_string(
                "error_message",
                "Reason the thesaurus failed, when status is FAILED",
            ))
            .attribute(computed_number(
                "file_size_bytes",
                "Size of the thesaurus file in bytes",
            ))
            .attribute(
                AttributeBuilder::new("index_id", AttributeType::String)
                    .description("Identifier of the index that contains the thesaurus")
                    .required()
                    .validator(StringPatternValidator::new(
                        "[a-zA-Z0-9][a-zA-Z0-9-]{35}",
                        "Starts with an alphanumeric character. Subsequently, can contain alphanumeric characters and hyphens. Fixed length of 36.",
                    ))
                    .build(),
            )
            .attribute(computed_string("name", "Name of the thesaurus"))
            .attribute(computed_string(
                "role_arn",
                "ARN of the role with permission to access the thesaurus file",
            ))
            .attribute(computed_string("status", "Status of the thesaurus"))
            .attribute(computed_number(
                "synonym_rule_count",
                "Number of synonym rules in the thesaurus file",
            ))
            .attribute(
                AttributeBuilder::new("tags", AttributeType::Map(Box::new(AttributeType::String)))
                    .description("Metadata assigned to the thesaurus")
                    .computed()
                    .build(),
            )
            .attribute(computed_number(
                "term_count",
                "Number of unique terms in the thesaurus file",
            ))
            .attribute(
                AttributeBuilder::new("thesaurus_id", AttributeType::String)
                    .description("Identifier of the thesaurus")
                    .required()
                    .validator(StringLengthValidator::between(1, 100))
                    .validator(StringPatternValidator::new(
                        "[a-zA-Z0-9][a-zA-Z0-9_-]*",
                        "Starts with an alphanumeric character. Subsequently, can contain alphanumeric characters and hyphens.",
                    ))
                    .build(),
            )
            .attribute(computed_string(
                "updated_at",
                "RFC 3339 timestamp of when the thesaurus was last updated",
            ))
            .block(
                NestedBlockBuilder::list("source_s3_path")
                    .description("S3 location of the thesaurus file")
                    .computed()
                    .attribute(computed_string("bucket", "Name of the S3 bucket"))
                    .attribute(computed_string("key", "Name of the file"))
                    .build(),
            )
            .build()
    }

    fn arn(&self, index_id: &str, thesaurus_id: &str) -> String {
        Arn {
            partition: self.partition.clone(),
            service: "kendra".to_string(),
            region: self.region.clone(),
            account_id: self.account_id.clone(),
            resource: format!("index/{}/thesaurus/{}", index_id, thesaurus_id),
        }
        .to_string()
    }

    async fn read_model(&self, ctx: &Context, config: &DynamicValue) -> Result<ThesaurusModel> {
        let config: ThesaurusModel = config
            .to_model()
            .map_err(|e| ProviderError::InvalidConfiguration(e.to_string()))?;
        let thesaurus_id = config.thesaurus_id;
        let index_id = config.index_id;

        tracing::debug!(%thesaurus_id, %index_id, "Reading Kendra Thesaurus");
        let output = api::call(
            ctx,
            self.kendra.describe_thesaurus(DescribeThesaurusInput {
                id: thesaurus_id.clone(),
                index_id: index_id.clone(),
            }),
        )
        .await
        .map_err(|e| ProviderError::external("getting", RESOURCE_NAME, &thesaurus_id, e))?
        .ok_or_else(|| ProviderError::EmptyResponse {
            action: "getting",
            resource: RESOURCE_NAME.to_string(),
            id: thesaurus_id.clone(),
        })?;

        let arn = self.arn(&index_id, &thesaurus_id);

        let tags = api::call(ctx, self.kendra.list_tags_for_resource(&arn))
            .await
            .map_err(|e| ProviderError::external("listing tags for", RESOURCE_NAME, &arn, e))?;
        let tags = KeyValueTags::from_kendra(tags.tags)
            .ignore_aws()
            .ignore_config(&self.ignore_tags);

        Ok(ThesaurusModel {
            id: Some(thesaurus_create_resource_id(&thesaurus_id, &index_id)),
            arn,
            created_at: format_timestamp(output.created_at),
            description: output.description.unwrap_or_default(),
            error_message: output.error_message.unwrap_or_default(),
            file_size_bytes: output.file_size_bytes.unwrap_or_default(),
            index_id: output.index_id.unwrap_or(index_id),
            name: output.name.unwrap_or_default(),
            role_arn: output.role_arn.unwrap_or_default(),
            source_s3_path: flatten_source_s3_path(output.source_s3_path.as_ref()),
            status: output.status.unwrap_or_default(),
            synonym_rule_count: output.synonym_rule_count.unwrap_or_default(),
            tags: tags.into_map(),
            term_count: output.term_count.unwrap_or_default(),
            thesaurus_id: output.id.unwrap_or(thesaurus_id),
            updated_at: format_timestamp(output.updated_at),
        })
    }
}

#[async_trait]
impl DataSource for ThesaurusDataSource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Self::schema_static()
    }

    async fn read(&self, ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let result = self.read_model(&ctx, &request.config).await.and_then(|model| {
            DynamicValue::from_model(&model)
                .map_err(|e| ProviderError::state(&AttributePath::root(), e))
        });

        match result {
            Ok(state) => ReadDataSourceResponse {
                state,
                diagnostics: vec![],
            },
            Err(e) => {
                let thesaurus_id = request
                    .config
                    .get_optional_string(&AttributePath::new("thesaurus_id"))
                    .ok()
                    .flatten()
                    .unwrap_or_default();
                ReadDataSourceResponse {
                    diagnostics: vec![e.for_resource(RESOURCE_NAME, &thesaurus_id).into()],
                    state: request.config,
                }
            }
        }
    }
}
