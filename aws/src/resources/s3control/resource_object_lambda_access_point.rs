//! S3 Object Lambda access point resource

use super::object_lambda_flex::{
    expand_object_lambda_configuration, flatten_object_lambda_configuration,
    ObjectLambdaAccessPointModel,
};
use crate::api::s3control::{
    CreateAccessPointForObjectLambdaInput, ObjectLambdaAllowedFeature,
    ObjectLambdaTransformationConfigurationAction, PutAccessPointConfigurationForObjectLambdaInput,
    ERR_CODE_NO_SUCH_ACCESS_POINT, OBJECT_LAMBDA_ACCESS_POINT_NOT_FOUND_CODES,
};
use crate::api::{self, S3ControlApi};
use crate::arn::{AccountIdValidator, Arn, ArnValidator};
use crate::error::{ProviderError, Result};
use crate::resource_id::{
    object_lambda_access_point_create_resource_id, object_lambda_access_point_parse_resource_id,
};
use crate::AwsProviderData;
use async_trait::async_trait;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::resource::{
    CreateResourceRequest, CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, UpdateResourceRequest, UpdateResourceResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};
use tfplug::validator::StringInSliceValidator;
use tfplug::import_state_passthrough_id;

pub const TYPE_NAME: &str = "aws_s3control_object_lambda_access_point";

const RESOURCE_NAME: &str = "S3 Object Lambda Access Point";

pub struct ObjectLambdaAccessPointResource {
    s3control: Arc<dyn S3ControlApi>,
    account_id: String,
    partition: String,
}

impl ObjectLambdaAccessPointResource {
    pub fn new(provider_data: &AwsProviderData) -> Self {
        Self {
            s3control: provider_data.s3control.clone(),
            account_id: provider_data.account_id.clone(),
            partition: provider_data.partition.clone(),
        }
    }

    pub fn schema_static() -> Schema {
        let aws_lambda = NestedBlockBuilder::list("aws_lambda")
            .max_items(1)
            .attribute(
                AttributeBuilder::new("function_arn", AttributeType::String)
                    .description("ARN of the Lambda function that transforms the object")
                    .required()
                    .validator(ArnValidator)
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("function_payload", AttributeType::String)
                    .description("Additional JSON passed to the function")
                    .optional()
                    .build(),
            )
            .build();

        let content_transformation = NestedBlockBuilder::list("content_transformation")
            .required()
            .max_items(1)
            .block(aws_lambda)
            .build();

        let transformation_configuration = NestedBlockBuilder::set("transformation_configuration")
            .required()
            .attribute(
                AttributeBuilder::new("actions", AttributeType::Set(Box::new(AttributeType::String)))
                    .description("S3 operations the transformation applies to")
                    .required()
                    .element_validator(StringInSliceValidator::new(
                        &ObjectLambdaTransformationConfigurationAction::values(),
                    ))
                    .build(),
            )
            .block(content_transformation)
            .build();

        SchemaBuilder::new()
            .version(0)
            .description("Provides a resource to manage an S3 Object Lambda Access Point")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Account ID and access point name separated by a colon")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("account_id", AttributeType::String)
                    .description("AWS account ID owning the access point. Defaults to the provider's account")
                    .optional()
                    .computed()
                    .force_new()
                    .validator(AccountIdValidator)
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("arn", AttributeType::String)
                    .description("Amazon Resource Name of the Object Lambda Access Point")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Name of the Object Lambda Access Point")
                    .required()
                    .force_new()
                    .build(),
            )
            .block(
                NestedBlockBuilder::list("configuration")
                    .description("Object Lambda Access Point configuration")
                    .required()
                    .max_items(1)
                    .attribute(
                        AttributeBuilder::new(
                            "allowed_features",
                            AttributeType::Set(Box::new(AttributeType::String)),
                        )
                        .description("Features supported in addition to GetObject")
                        .optional()
                        .element_validator(StringInSliceValidator::new(
                            &ObjectLambdaAllowedFeature::values(),
                        ))
                        .build(),
                    )
                    .attribute(
                        AttributeBuilder::new("cloud_watch_metrics_enabled", AttributeType::Bool)
                            .description("Whether request metrics are published to CloudWatch")
                            .optional()
                            .build(),
                    )
                    .attribute(
                        AttributeBuilder::new("supporting_access_point", AttributeType::String)
                            .description("Standard access point associated with the Object Lambda Access Point")
                            .required()
                            .force_new()
                            .validator(ArnValidator)
                            .build(),
                    )
                    .block(transformation_configuration)
                    .build(),
            )
            .build()
    }

    fn arn(&self, account_id: &str, name: &str) -> String {
        // Object Lambda access point ARNs carry no region
        Arn {
            partition: self.partition.clone(),
            service: "s3-object-lambda".to_string(),
            region: String::new(),
            account_id: account_id.to_string(),
            resource: format!("accesspoint/{}", name),
        }
        .to_string()
    }

    /// Returns the new resource ID
    async fn create_access_point(&self, ctx: &Context, config: &DynamicValue) -> Result<String> {
        let model: ObjectLambdaAccessPointModel = config
            .to_model()
            .map_err(|e| ProviderError::InvalidConfiguration(e.to_string()))?;

        let account_id = model
            .account_id
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.account_id.clone());
        let id = object_lambda_access_point_create_resource_id(&account_id, &model.name);

        let input = CreateAccessPointForObjectLambdaInput {
            account_id,
            name: model.name.clone(),
            configuration: model
                .configuration
                .first()
                .map(expand_object_lambda_configuration),
        };

        tracing::debug!(?input, "Creating S3 Object Lambda Access Point");
        api::call(ctx, self.s3control.create_access_point_for_object_lambda(input))
            .await
            .map_err(|e| ProviderError::external("creating", RESOURCE_NAME, &id, e))?;

        Ok(id)
    }

    /// `Ok(None)` means the access point is gone and should leave state
    async fn read_model(
        &self,
        ctx: &Context,
        id: &str,
        is_new_resource: bool,
    ) -> Result<Option<ObjectLambdaAccessPointModel>> {
        let (account_id, name) = object_lambda_access_point_parse_resource_id(id)?;

        match api::call(
            ctx,
            self.s3control
                .get_access_point_for_object_lambda(&account_id, &name),
        )
        .await
        {
            Ok(_) => {}
            Err(e) if e.code_in(OBJECT_LAMBDA_ACCESS_POINT_NOT_FOUND_CODES) => {
                if is_new_resource {
                    return Err(ProviderError::NotFound {
                        resource: RESOURCE_NAME.to_string(),
                        id: id.to_string(),
                    });
                }
                tracing::warn!(id, "S3 Object Lambda Access Point not found, removing from state");
                return Ok(None);
            }
            Err(e) => return Err(ProviderError::external("reading", RESOURCE_NAME, id, e)),
        }

        let output = api::call(
            ctx,
            self.s3control
                .get_access_point_configuration_for_object_lambda(&account_id, &name),
        )
        .await
        .map_err(|e| ProviderError::external("reading", RESOURCE_NAME, id, e))?;

        Ok(Some(ObjectLambdaAccessPointModel {
            id: Some(id.to_string()),
            arn: Some(self.arn(&account_id, &name)),
            account_id: Some(account_id),
            configuration: flatten_object_lambda_configuration(output.configuration.as_ref()),
            name,
        }))
    }

    async fn read_state(
        &self,
        ctx: &Context,
        id: &str,
        is_new_resource: bool,
    ) -> Result<Option<DynamicValue>> {
        match self.read_model(ctx, id, is_new_resource).await? {
            Some(model) => DynamicValue::from_model(&model)
                .map(Some)
                .map_err(|e| ProviderError::state(&AttributePath::root(), e)),
            None => Ok(None),
        }
    }

    async fn update_access_point(&self, ctx: &Context, request: &UpdateResourceRequest) -> Result<String> {
        let prior: ObjectLambdaAccessPointModel = request
            .prior_state
            .to_model()
            .map_err(|e| ProviderError::state(&AttributePath::root(), e))?;
        let config: ObjectLambdaAccessPointModel = request
            .config
            .to_model()
            .map_err(|e| ProviderError::InvalidConfiguration(e.to_string()))?;

        let id = resource_id_from_state(&prior)?;
        let (account_id, name) = object_lambda_access_point_parse_resource_id(&id)?;

        let prior_configuration = prior.configuration.first().cloned().unwrap_or_default();
        let new_configuration = config.configuration.first().cloned().unwrap_or_default();

        if prior_configuration.mutable_part_differs(&new_configuration) {
            let input = PutAccessPointConfigurationForObjectLambdaInput {
                account_id,
                name,
                configuration: config
                    .configuration
                    .first()
                    .map(expand_object_lambda_configuration),
            };

            tracing::debug!(?input, "Updating S3 Object Lambda Access Point configuration");
            api::call(
                ctx,
                self.s3control
                    .put_access_point_configuration_for_object_lambda(input),
            )
            .await
            .map_err(|e| ProviderError::external("updating", RESOURCE_NAME, &id, e))?;
        }

        Ok(id)
    }

    async fn delete_access_point(&self, ctx: &Context, state: &DynamicValue) -> Result<()> {
        let model: ObjectLambdaAccessPointModel = state
            .to_model()
            .map_err(|e| ProviderError::state(&AttributePath::root(), e))?;
        let id = resource_id_from_state(&model)?;
        let (account_id, name) = object_lambda_access_point_parse_resource_id(&id)?;

        tracing::debug!(id = %id, "Deleting S3 Object Lambda Access Point");
        match api::call(
            ctx,
            self.s3control
                .delete_access_point_for_object_lambda(&account_id, &name),
        )
        .await
        {
            Ok(()) => Ok(()),
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_ACCESS_POINT) => Ok(()),
            Err(e) => Err(ProviderError::external("deleting", RESOURCE_NAME, &id, e)),
        }
    }
}

/// Diagnostic for a failure of this resource, naming it and its ID
fn diagnostic(err: ProviderError, id: &str) -> Diagnostic {
    err.for_resource(RESOURCE_NAME, id).into()
}

/// ID recorded in `state`, empty when there is none
fn state_id(state: &DynamicValue) -> String {
    state
        .get_optional_string(&AttributePath::new("id"))
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// The stored ID, or one rebuilt from account and name for state written
/// without it
fn resource_id_from_state(model: &ObjectLambdaAccessPointModel) -> Result<String> {
    if let Some(id) = model.id.as_deref().filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }
    match model.account_id.as_deref() {
        Some(account_id) if !account_id.is_empty() && !model.name.is_empty() => Ok(
            object_lambda_access_point_create_resource_id(account_id, &model.name),
        ),
        _ => Err(ProviderError::MalformedIdentifier {
            id: String::new(),
            expected: "account-id:access-point-name".to_string(),
        }),
    }
}

#[async_trait]
impl Resource for ObjectLambdaAccessPointResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Self::schema_static()
    }

    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse {
        let mut diagnostics: Vec<Diagnostic> = vec![];

        let id = match self.create_access_point(&ctx, &request.config).await {
            Ok(id) => id,
            Err(e) => {
                diagnostics.push(diagnostic(e, ""));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        match self.read_state(&ctx, &id, true).await {
            Ok(Some(new_state)) => CreateResourceResponse {
                new_state,
                diagnostics,
            },
            result => {
                // The access point exists; keep its ID so it can be tainted
                // instead of orphaned
                let mut new_state = request.planned_state;
                let id_path = AttributePath::new("id");
                if let Err(e) = new_state.set_string(&id_path, id.as_str()) {
                    diagnostics.push(diagnostic(ProviderError::state(&id_path, e), &id));
                }
                diagnostics.push(match result {
                    Err(e) => diagnostic(e, &id),
                    _ => ProviderError::NotFound {
                        resource: RESOURCE_NAME.to_string(),
                        id,
                    }
                    .into(),
                });
                CreateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let id = match request.current_state.to_model::<ObjectLambdaAccessPointModel>() {
            Ok(model) => resource_id_from_state(&model),
            Err(e) => Err(ProviderError::state(&AttributePath::root(), e)),
        };

        let result = match id {
            Ok(id) => self.read_state(&ctx, &id, false).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(new_state) => ReadResourceResponse {
                new_state,
                diagnostics: vec![],
            },
            Err(e) => ReadResourceResponse {
                diagnostics: vec![diagnostic(e, &state_id(&request.current_state))],
                new_state: Some(request.current_state),
            },
        }
    }

    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse {
        let result = match self.update_access_point(&ctx, &request).await {
            Ok(id) => self.read_state(&ctx, &id, false).await.and_then(|state| {
                state.ok_or_else(|| ProviderError::NotFound {
                    resource: RESOURCE_NAME.to_string(),
                    id,
                })
            }),
            Err(e) => Err(e),
        };

        match result {
            Ok(new_state) => UpdateResourceResponse {
                new_state,
                diagnostics: vec![],
            },
            Err(e) => UpdateResourceResponse {
                diagnostics: vec![diagnostic(e, &state_id(&request.prior_state))],
                new_state: request.prior_state,
            },
        }
    }

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse {
        let diagnostics = match self.delete_access_point(&ctx, &request.prior_state).await {
            Ok(()) => vec![],
            Err(e) => vec![diagnostic(e, &state_id(&request.prior_state))],
        };

        DeleteResourceResponse { diagnostics }
    }

    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };

        if let Err(e) = object_lambda_access_point_parse_resource_id(&request.id) {
            response.diagnostics.push(diagnostic(e, &request.id));
            return response;
        }

        import_state_passthrough_id(AttributePath::new("id"), &request, &mut response);
        response
    }
}
