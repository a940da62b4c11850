//! Configuration models for the Object Lambda access point and their
//! mapping to and from the S3 Control API structures
//!
//! Expand skips empty values so the request only carries what the user set.
//! Flatten turns an absent structure into an empty block list.

use crate::api::s3control::{
    AwsLambdaTransformation, ObjectLambdaConfiguration, ObjectLambdaContentTransformation,
    ObjectLambdaTransformationConfiguration,
};
use serde::{Deserialize, Serialize};
use tfplug::types::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectLambdaAccessPointModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub configuration: Vec<ConfigurationModel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigurationModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cloud_watch_metrics_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supporting_access_point: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transformation_configuration: Vec<TransformationConfigurationModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransformationConfigurationModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_transformation: Vec<ContentTransformationModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentTransformationModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub aws_lambda: Vec<AwsLambdaModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AwsLambdaModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub function_arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub function_payload: String,
}

impl ConfigurationModel {
    /// Set-typed fields in a stable order, so two configurations that only
    /// differ in element order compare equal
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.allowed_features.sort();
        for tc in &mut out.transformation_configuration {
            tc.actions.sort();
        }
        out.transformation_configuration.sort();
        out
    }

    /// Whether moving from `self` to `other` needs a configuration put.
    /// The supporting access point is excluded since changing it replaces
    /// the access point.
    pub fn mutable_part_differs(&self, other: &Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.allowed_features != b.allowed_features
            || a.cloud_watch_metrics_enabled != b.cloud_watch_metrics_enabled
            || a.transformation_configuration != b.transformation_configuration
    }
}

fn non_empty_string(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn non_empty_list(items: &[String]) -> Option<Vec<String>> {
    (!items.is_empty()).then(|| items.to_vec())
}

pub fn expand_object_lambda_configuration(model: &ConfigurationModel) -> ObjectLambdaConfiguration {
    ObjectLambdaConfiguration {
        allowed_features: non_empty_list(&model.allowed_features),
        cloud_watch_metrics_enabled: model.cloud_watch_metrics_enabled.then_some(true),
        supporting_access_point: non_empty_string(&model.supporting_access_point),
        transformation_configurations: expand_object_lambda_transformation_configurations(
            &model.transformation_configuration,
        ),
    }
}

pub fn expand_object_lambda_transformation_configurations(
    models: &[TransformationConfigurationModel],
) -> Option<Vec<ObjectLambdaTransformationConfiguration>> {
    if models.is_empty() {
        return None;
    }

    Some(
        models
            .iter()
            .map(expand_object_lambda_transformation_configuration)
            .collect(),
    )
}

pub fn expand_object_lambda_transformation_configuration(
    model: &TransformationConfigurationModel,
) -> ObjectLambdaTransformationConfiguration {
    ObjectLambdaTransformationConfiguration {
        actions: non_empty_list(&model.actions),
        content_transformation: model
            .content_transformation
            .first()
            .map(expand_object_lambda_content_transformation),
    }
}

pub fn expand_object_lambda_content_transformation(
    model: &ContentTransformationModel,
) -> ObjectLambdaContentTransformation {
    ObjectLambdaContentTransformation {
        aws_lambda: model.aws_lambda.first().map(expand_aws_lambda_transformation),
    }
}

pub fn expand_aws_lambda_transformation(model: &AwsLambdaModel) -> AwsLambdaTransformation {
    AwsLambdaTransformation {
        function_arn: non_empty_string(&model.function_arn),
        function_payload: non_empty_string(&model.function_payload),
    }
}

pub fn flatten_object_lambda_configuration(
    api_object: Option<&ObjectLambdaConfiguration>,
) -> Vec<ConfigurationModel> {
    let Some(api_object) = api_object else {
        return vec![];
    };

    vec![ConfigurationModel {
        allowed_features: api_object.allowed_features.clone().unwrap_or_default(),
        cloud_watch_metrics_enabled: api_object.cloud_watch_metrics_enabled.unwrap_or_default(),
        supporting_access_point: api_object.supporting_access_point.clone().unwrap_or_default(),
        transformation_configuration: flatten_object_lambda_transformation_configurations(
            api_object.transformation_configurations.as_deref(),
        ),
    }]
}

pub fn flatten_object_lambda_transformation_configurations(
    api_objects: Option<&[ObjectLambdaTransformationConfiguration]>,
) -> Vec<TransformationConfigurationModel> {
    api_objects
        .unwrap_or_default()
        .iter()
        .map(|api_object| TransformationConfigurationModel {
            actions: api_object.actions.clone().unwrap_or_default(),
            content_transformation: flatten_object_lambda_content_transformation(
                api_object.content_transformation.as_ref(),
            ),
        })
        .collect()
}

pub fn flatten_object_lambda_content_transformation(
    api_object: Option<&ObjectLambdaContentTransformation>,
) -> Vec<ContentTransformationModel> {
    let Some(api_object) = api_object else {
        return vec![];
    };

    vec![ContentTransformationModel {
        aws_lambda: flatten_aws_lambda_transformation(api_object.aws_lambda.as_ref()),
    }]
}

pub fn flatten_aws_lambda_transformation(
    api_object: Option<&AwsLambdaTransformation>,
) -> Vec<AwsLambdaModel> {
    let Some(api_object) = api_object else {
        return vec![];
    };

    vec![AwsLambdaModel {
        function_arn: api_object.function_arn.clone().unwrap_or_default(),
        function_payload: api_object.function_payload.clone().unwrap_or_default(),
    }]
}
