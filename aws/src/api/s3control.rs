//! S3 Control API surface used by the Object Lambda access point resource

use super::error::ApiError;
use async_trait::async_trait;

/// Returned when the access point does not exist
pub const ERR_CODE_NO_SUCH_ACCESS_POINT: &str = "NoSuchAccessPoint";

/// Every code that means "the Object Lambda access point is gone"
pub const OBJECT_LAMBDA_ACCESS_POINT_NOT_FOUND_CODES: &[&str] = &[ERR_CODE_NO_SUCH_ACCESS_POINT];

/// Features an Object Lambda access point can enable on top of GetObject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectLambdaAllowedFeature {
    GetObjectRange,
    GetObjectPartNumber,
    HeadObjectRange,
    HeadObjectPartNumber,
}

impl ObjectLambdaAllowedFeature {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetObjectRange => "GetObject-Range",
            Self::GetObjectPartNumber => "GetObject-PartNumber",
            Self::HeadObjectRange => "HeadObject-Range",
            Self::HeadObjectPartNumber => "HeadObject-PartNumber",
        }
    }

    pub fn values() -> Vec<&'static str> {
        [
            Self::GetObjectRange,
            Self::GetObjectPartNumber,
            Self::HeadObjectRange,
            Self::HeadObjectPartNumber,
        ]
        .iter()
        .map(Self::as_str)
        .collect()
    }
}

/// S3 operations a transformation can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectLambdaTransformationConfigurationAction {
    GetObject,
    HeadObject,
    ListObjects,
    ListObjectsV2,
}

impl ObjectLambdaTransformationConfigurationAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetObject => "GetObject",
            Self::HeadObject => "HeadObject",
            Self::ListObjects => "ListObjects",
            Self::ListObjectsV2 => "ListObjectsV2",
        }
    }

    pub fn values() -> Vec<&'static str> {
        [
            Self::GetObject,
            Self::HeadObject,
            Self::ListObjects,
            Self::ListObjectsV2,
        ]
        .iter()
        .map(Self::as_str)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectLambdaConfiguration {
    pub allowed_features: Option<Vec<String>>,
    pub cloud_watch_metrics_enabled: Option<bool>,
    pub supporting_access_point: Option<String>,
    pub transformation_configurations: Option<Vec<ObjectLambdaTransformationConfiguration>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectLambdaTransformationConfiguration {
    pub actions: Option<Vec<String>>,
    pub content_transformation: Option<ObjectLambdaContentTransformation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectLambdaContentTransformation {
    pub aws_lambda: Option<AwsLambdaTransformation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AwsLambdaTransformation {
    pub function_arn: Option<String>,
    pub function_payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAccessPointForObjectLambdaInput {
    pub account_id: String,
    pub name: String,
    pub configuration: Option<ObjectLambdaConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAccessPointForObjectLambdaOutput {
    pub object_lambda_access_point_arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAccessPointForObjectLambdaOutput {
    pub name: Option<String>,
    pub creation_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAccessPointConfigurationForObjectLambdaOutput {
    pub configuration: Option<ObjectLambdaConfiguration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutAccessPointConfigurationForObjectLambdaInput {
    pub account_id: String,
    pub name: String,
    pub configuration: Option<ObjectLambdaConfiguration>,
}

#[async_trait]
pub trait S3ControlApi: Send + Sync {
    async fn create_access_point_for_object_lambda(
        &self,
        input: CreateAccessPointForObjectLambdaInput,
    ) -> Result<CreateAccessPointForObjectLambdaOutput, ApiError>;

    async fn get_access_point_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<GetAccessPointForObjectLambdaOutput, ApiError>;

    async fn get_access_point_configuration_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<GetAccessPointConfigurationForObjectLambdaOutput, ApiError>;

    async fn put_access_point_configuration_for_object_lambda(
        &self,
        input: PutAccessPointConfigurationForObjectLambdaInput,
    ) -> Result<(), ApiError>;

    async fn delete_access_point_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<(), ApiError>;
}
