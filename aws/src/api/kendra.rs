//! Kendra API surface used by the thesaurus data source
//!
//! Kendra speaks the AWS JSON 1.1 protocol, so the response models carry the
//! service's PascalCase member names and epoch-second timestamps.

use super::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeThesaurusInput {
    pub id: String,
    pub index_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeThesaurusOutput {
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<i64>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role_arn: Option<String>,
    #[serde(default)]
    pub source_s3_path: Option<S3Path>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub synonym_rule_count: Option<i64>,
    #[serde(default)]
    pub term_count: Option<i64>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3Path {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceOutput {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[async_trait]
pub trait KendraApi: Send + Sync {
    /// `Ok(None)` is an empty response body
    async fn describe_thesaurus(
        &self,
        input: DescribeThesaurusInput,
    ) -> Result<Option<DescribeThesaurusOutput>, ApiError>;

    async fn list_tags_for_resource(
        &self,
        resource_arn: &str,
    ) -> Result<ListTagsForResourceOutput, ApiError>;
}

/// Decode a `DescribeThesaurus` response body
pub fn parse_describe_thesaurus_response(body: &[u8]) -> Result<Option<DescribeThesaurusOutput>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn describe_thesaurus_response_decodes() {
        let body = br#"{
            "CreatedAt": 1640995200,
            "Description": "test thesaurus",
            "FileSizeBytes": 1024,
            "Id": "thesaurus-1",
            "IndexId": "0123456789abcdef0123456789abcdef0123",
            "Name": "example",
            "RoleArn": "arn:aws:iam::123456789012:role/kendra",
            "SourceS3Path": {"Bucket": "my-bucket", "Key": "thesaurus.txt"},
            "Status": "ACTIVE",
            "SynonymRuleCount": 12,
            "TermCount": 40
        }"#;

        let out = parse_describe_thesaurus_response(body).unwrap().unwrap();

        assert_eq!(
            out.created_at,
            Some(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(out.updated_at, None);
        assert_eq!(out.file_size_bytes, Some(1024));
        assert_eq!(out.status.as_deref(), Some("ACTIVE"));
        assert_eq!(
            out.source_s3_path,
            Some(S3Path {
                bucket: Some("my-bucket".to_string()),
                key: Some("thesaurus.txt".to_string()),
            })
        );
    }

    #[test]
    fn empty_body_is_no_output() {
        assert_eq!(parse_describe_thesaurus_response(b"").unwrap(), None);
        assert_eq!(parse_describe_thesaurus_response(b"  \n").unwrap(), None);
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = parse_describe_thesaurus_response(b"{\"Id\": 5}").unwrap_err();
        assert!(matches!(err, ApiError::ParseError(_)));
    }
}
