//! AWS provider resources for S3 Control and Kendra
//!
//! The provider is built from injected service clients. `configure`
//! resolves region, account and partition and hands an [`AwsProviderData`]
//! to every resource and data source it creates.

pub mod api;
pub mod arn;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod provider_data;
pub mod resource_id;
pub mod resources;
pub mod tags;

pub use error::ProviderError;
pub use provider_data::AwsProviderData;

use api::{KendraApi, S3ControlApi, StsApi};
use async_trait::async_trait;
use config::ProviderConfig;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tfplug::context::Context;
use tfplug::provider::{ConfigureRequest, ConfigureResponse, Provider};
use tfplug::types::has_errors;
use tfplug::{DataSource, Resource, Schema, TfplugError};

pub struct AwsProvider {
    s3control: Arc<dyn S3ControlApi>,
    kendra: Arc<dyn KendraApi>,
    sts: Arc<dyn StsApi>,
    provider_data: Option<AwsProviderData>,
}

impl AwsProvider {
    pub fn new(
        s3control: Arc<dyn S3ControlApi>,
        kendra: Arc<dyn KendraApi>,
        sts: Arc<dyn StsApi>,
    ) -> Self {
        Self {
            s3control,
            kendra,
            sts,
            provider_data: None,
        }
    }

    /// Set once `configure` succeeded
    pub fn provider_data(&self) -> Option<&AwsProviderData> {
        self.provider_data.as_ref()
    }

    async fn resolve(&self, ctx: &Context, request: &ConfigureRequest) -> error::Result<AwsProviderData> {
        let config = ProviderConfig::from_config(&request.config)?;

        let account_id = match config.account_id {
            Some(account_id) => account_id,
            None => {
                tracing::debug!(region = %config.region, "Looking up caller identity");
                api::call(ctx, self.sts.get_caller_identity())
                    .await
                    .map_err(|e| {
                        ProviderError::InvalidConfiguration(format!(
                            "retrieving caller identity: {}",
                            e
                        ))
                    })?
                    .account
                    .filter(|a| !a.is_empty())
                    .ok_or_else(|| {
                        ProviderError::InvalidConfiguration(
                            "caller identity did not include an account ID".to_string(),
                        )
                    })?
            }
        };

        Ok(AwsProviderData::new(
            self.s3control.clone(),
            self.kendra.clone(),
            config.region,
            account_id,
            config.partition,
        )
        .with_ignore_tags(config.ignore_tags))
    }
}

#[async_trait]
impl Provider for AwsProvider {
    fn type_name(&self) -> &str {
        "aws"
    }

    fn schema(&self) -> Schema {
        config::provider_schema()
    }

    async fn configure(&mut self, ctx: Context, request: ConfigureRequest) -> ConfigureResponse {
        let mut diagnostics = self.schema().validate(&request.config);
        if has_errors(&diagnostics) {
            return ConfigureResponse { diagnostics };
        }

        match self.resolve(&ctx, &request).await {
            Ok(data) => {
                tracing::debug!(
                    region = %data.region,
                    partition = %data.partition,
                    "AWS provider configured"
                );
                self.provider_data = Some(data);
            }
            Err(e) => {
                tracing::error!(error = %e, "AWS provider configuration failed");
                diagnostics.push(e.into());
            }
        }

        ConfigureResponse { diagnostics }
    }

    async fn create_resource(&self, name: &str) -> tfplug::Result<Box<dyn Resource>> {
        let data = self
            .provider_data
            .as_ref()
            .ok_or(TfplugError::ProviderNotConfigured)?;

        match name {
            resources::s3control::resource_object_lambda_access_point::TYPE_NAME => Ok(Box::new(
                resources::ObjectLambdaAccessPointResource::new(data),
            )),
            _ => Err(TfplugError::ResourceNotFound(name.to_string())),
        }
    }

    async fn create_data_source(&self, name: &str) -> tfplug::Result<Box<dyn DataSource>> {
        let data = self
            .provider_data
            .as_ref()
            .ok_or(TfplugError::ProviderNotConfigured)?;

        match name {
            data_sources::kendra::data_source_thesaurus::TYPE_NAME => {
                Ok(Box::new(data_sources::ThesaurusDataSource::new(data)))
            }
            _ => Err(TfplugError::DataSourceNotFound(name.to_string())),
        }
    }

    async fn resource_schemas(&self) -> HashMap<String, Schema> {
        static SCHEMAS: OnceLock<HashMap<String, Schema>> = OnceLock::new();

        SCHEMAS
            .get_or_init(|| {
                let mut schemas = HashMap::new();
                schemas.insert(
                    resources::s3control::resource_object_lambda_access_point::TYPE_NAME
                        .to_string(),
                    resources::ObjectLambdaAccessPointResource::schema_static(),
                );
                schemas
            })
            .clone()
    }

    async fn data_source_schemas(&self) -> HashMap<String, Schema> {
        static SCHEMAS: OnceLock<HashMap<String, Schema>> = OnceLock::new();

        SCHEMAS
            .get_or_init(|| {
                let mut schemas = HashMap::new();
                schemas.insert(
                    data_sources::kendra::data_source_thesaurus::TYPE_NAME.to_string(),
                    data_sources::ThesaurusDataSource::schema_static(),
                );
                schemas
            })
            .clone()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::api::test_helpers::{FakeKendra, FakeS3Control, FakeSts};
    use serial_test::serial;
    use std::collections::HashMap;
    use tfplug::{Dynamic, DynamicValue};

    fn provider(sts: FakeSts) -> AwsProvider {
        AwsProvider::new(
            Arc::new(FakeS3Control::new()),
            Arc::new(FakeKendra::new()),
            Arc::new(sts),
        )
    }

    fn clear_env() {
        std::env::remove_var(config::ENV_REGION);
        std::env::remove_var(config::ENV_DEFAULT_REGION);
        std::env::remove_var(config::ENV_ACCOUNT_ID);
    }

    fn request(entries: Vec<(&str, &str)>) -> ConfigureRequest {
        ConfigureRequest {
            config: DynamicValue::new(Dynamic::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), Dynamic::String(v.to_string())))
                    .collect::<HashMap<_, _>>(),
            )),
        }
    }

    #[tokio::test]
    #[serial]
    async fn configure_uses_caller_identity_when_account_unset() {
        clear_env();
        let mut provider = provider(FakeSts::new("123456789012"));

        let response = provider
            .configure(Context::new(), request(vec![("region", "us-east-1")]))
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let data = provider.provider_data().unwrap();
        assert_eq!(data.account_id, "123456789012");
        assert_eq!(data.partition, "aws");
    }

    #[tokio::test]
    #[serial]
    async fn configure_reports_caller_identity_failure() {
        clear_env();
        let mut provider = provider(FakeSts::unavailable());

        let response = provider
            .configure(Context::new(), request(vec![("region", "us-east-1")]))
            .await;

        assert!(has_errors(&response.diagnostics));
        assert!(response.diagnostics[0].detail.contains("InvalidClientTokenId"));
        assert!(provider.provider_data().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn configure_requires_region() {
        clear_env();
        let mut provider = provider(FakeSts::new("123456789012"));

        let response = provider.configure(Context::new(), request(vec![])).await;

        assert!(has_errors(&response.diagnostics));
        assert!(response.diagnostics[0].detail.contains("region is required"));
    }

    #[tokio::test]
    #[serial]
    async fn configure_rejects_invalid_account_id_before_resolving() {
        clear_env();
        let mut provider = provider(FakeSts::new("123456789012"));

        let response = provider
            .configure(
                Context::new(),
                request(vec![("region", "us-east-1"), ("account_id", "nope")]),
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(
            response.diagnostics[0].attribute.as_ref().map(|a| a.to_string()),
            Some("account_id".to_string())
        );
    }

    #[tokio::test]
    #[serial]
    async fn create_resource_requires_configuration() {
        let provider = provider(FakeSts::new("123456789012"));

        let result = provider
            .create_resource("aws_s3control_object_lambda_access_point")
            .await;
        assert!(matches!(result, Err(TfplugError::ProviderNotConfigured)));
    }

    #[tokio::test]
    #[serial]
    async fn creates_known_resources_and_data_sources() {
        clear_env();
        let mut provider = provider(FakeSts::new("123456789012"));
        provider
            .configure(Context::new(), request(vec![("region", "us-west-2")]))
            .await;

        let resource = provider
            .create_resource("aws_s3control_object_lambda_access_point")
            .await
            .unwrap();
        assert_eq!(resource.type_name(), "aws_s3control_object_lambda_access_point");

        let data_source = provider
            .create_data_source("aws_kendra_thesaurus")
            .await
            .unwrap();
        assert_eq!(data_source.type_name(), "aws_kendra_thesaurus");

        assert!(matches!(
            provider.create_resource("aws_unknown").await,
            Err(TfplugError::ResourceNotFound(_))
        ));
        assert!(matches!(
            provider.create_data_source("aws_unknown").await,
            Err(TfplugError::DataSourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn schemas_are_listed_by_type_name() {
        let provider = provider(FakeSts::new("123456789012"));

        let resources = provider.resource_schemas().await;
        assert!(resources.contains_key("aws_s3control_object_lambda_access_point"));

        let data_sources = provider.data_source_schemas().await;
        assert!(data_sources.contains_key("aws_kendra_thesaurus"));
    }
}
