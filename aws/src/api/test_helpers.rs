//! In-memory fakes of the AWS API traits

use super::error::ApiError;
use super::kendra::{
    DescribeThesaurusInput, DescribeThesaurusOutput, KendraApi, ListTagsForResourceOutput, Tag,
};
use super::s3control::{
    CreateAccessPointForObjectLambdaInput, CreateAccessPointForObjectLambdaOutput,
    GetAccessPointConfigurationForObjectLambdaOutput, GetAccessPointForObjectLambdaOutput,
    ObjectLambdaConfiguration, PutAccessPointConfigurationForObjectLambdaInput, S3ControlApi,
    ERR_CODE_NO_SUCH_ACCESS_POINT,
};
use super::sts::{GetCallerIdentityOutput, StsApi};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

type Failures = Mutex<HashMap<&'static str, (String, String)>>;

fn record(calls: &Mutex<Vec<&'static str>>, failures: &Failures, op: &'static str) -> Result<(), ApiError> {
    calls.lock().unwrap().push(op);
    match failures.lock().unwrap().get(op) {
        Some((code, message)) => Err(ApiError::service(code.clone(), message.clone())),
        None => Ok(()),
    }
}

#[derive(Default)]
pub struct FakeS3Control {
    access_points: Mutex<HashMap<(String, String), Option<ObjectLambdaConfiguration>>>,
    failures: Failures,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeS3Control {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account_id: &str, name: &str, configuration: Option<ObjectLambdaConfiguration>) {
        self.access_points
            .lock()
            .unwrap()
            .insert((account_id.to_string(), name.to_string()), configuration);
    }

    pub fn remove(&self, account_id: &str, name: &str) {
        self.access_points
            .lock()
            .unwrap()
            .remove(&(account_id.to_string(), name.to_string()));
    }

    pub fn contains(&self, account_id: &str, name: &str) -> bool {
        self.access_points
            .lock()
            .unwrap()
            .contains_key(&(account_id.to_string(), name.to_string()))
    }

    pub fn configuration(&self, account_id: &str, name: &str) -> Option<ObjectLambdaConfiguration> {
        self.access_points
            .lock()
            .unwrap()
            .get(&(account_id.to_string(), name.to_string()))
            .cloned()
            .flatten()
    }

    /// Make every call to `op` fail with the given service error code
    pub fn fail(&self, op: &'static str, code: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (code.to_string(), message.to_string()));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn missing(account_id: &str, name: &str) -> ApiError {
        ApiError::service(
            ERR_CODE_NO_SUCH_ACCESS_POINT,
            format!("The specified accesspoint does not exist: {}:{}", account_id, name),
        )
    }
}

#[async_trait]
impl S3ControlApi for FakeS3Control {
    async fn create_access_point_for_object_lambda(
        &self,
        input: CreateAccessPointForObjectLambdaInput,
    ) -> Result<CreateAccessPointForObjectLambdaOutput, ApiError> {
        record(&self.calls, &self.failures, "CreateAccessPointForObjectLambda")?;
        if self.contains(&input.account_id, &input.name) {
            return Err(ApiError::service(
                "AccessPointAlreadyOwnedByYou",
                "Your previous request to create the named accesspoint succeeded",
            ));
        }
        let arn = format!(
            "arn:aws:s3-object-lambda:us-west-2:{}:accesspoint/{}",
            input.account_id, input.name
        );
        self.insert(&input.account_id, &input.name, input.configuration);
        Ok(CreateAccessPointForObjectLambdaOutput {
            object_lambda_access_point_arn: Some(arn),
        })
    }

    async fn get_access_point_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<GetAccessPointForObjectLambdaOutput, ApiError> {
        record(&self.calls, &self.failures, "GetAccessPointForObjectLambda")?;
        if !self.contains(account_id, name) {
            return Err(Self::missing(account_id, name));
        }
        Ok(GetAccessPointForObjectLambdaOutput {
            name: Some(name.to_string()),
            creation_date: None,
        })
    }

    async fn get_access_point_configuration_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<GetAccessPointConfigurationForObjectLambdaOutput, ApiError> {
        record(
            &self.calls,
            &self.failures,
            "GetAccessPointConfigurationForObjectLambda",
        )?;
        if !self.contains(account_id, name) {
            return Err(Self::missing(account_id, name));
        }
        Ok(GetAccessPointConfigurationForObjectLambdaOutput {
            configuration: self.configuration(account_id, name),
        })
    }

    async fn put_access_point_configuration_for_object_lambda(
        &self,
        input: PutAccessPointConfigurationForObjectLambdaInput,
    ) -> Result<(), ApiError> {
        record(
            &self.calls,
            &self.failures,
            "PutAccessPointConfigurationForObjectLambda",
        )?;
        if !self.contains(&input.account_id, &input.name) {
            return Err(Self::missing(&input.account_id, &input.name));
        }
        self.insert(&input.account_id, &input.name, input.configuration);
        Ok(())
    }

    async fn delete_access_point_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        record(&self.calls, &self.failures, "DeleteAccessPointForObjectLambda")?;
        if !self.contains(account_id, name) {
            return Err(Self::missing(account_id, name));
        }
        self.remove(account_id, name);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeKendra {
    thesauri: Mutex<HashMap<(String, String), DescribeThesaurusOutput>>,
    tags: Mutex<HashMap<String, Vec<Tag>>>,
    empty_responses: Mutex<bool>,
    failures: Failures,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeKendra {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_thesaurus(&self, output: DescribeThesaurusOutput) {
        let key = (
            output.id.clone().unwrap_or_default(),
            output.index_id.clone().unwrap_or_default(),
        );
        self.thesauri.lock().unwrap().insert(key, output);
    }

    pub fn insert_tags(&self, arn: &str, tags: &[(&str, &str)]) {
        self.tags.lock().unwrap().insert(
            arn.to_string(),
            tags.iter()
                .map(|(k, v)| Tag {
                    key: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        );
    }

    /// Answer `DescribeThesaurus` with an empty body
    pub fn respond_empty(&self) {
        *self.empty_responses.lock().unwrap() = true;
    }

    pub fn fail(&self, op: &'static str, code: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (code.to_string(), message.to_string()));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl KendraApi for FakeKendra {
    async fn describe_thesaurus(
        &self,
        input: DescribeThesaurusInput,
    ) -> Result<Option<DescribeThesaurusOutput>, ApiError> {
        record(&self.calls, &self.failures, "DescribeThesaurus")?;
        if *self.empty_responses.lock().unwrap() {
            return Ok(None);
        }
        self.thesauri
            .lock()
            .unwrap()
            .get(&(input.id.clone(), input.index_id.clone()))
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                ApiError::service(
                    "ResourceNotFoundException",
                    format!("Thesaurus {} not found in index {}", input.id, input.index_id),
                )
            })
    }

    async fn list_tags_for_resource(
        &self,
        resource_arn: &str,
    ) -> Result<ListTagsForResourceOutput, ApiError> {
        record(&self.calls, &self.failures, "ListTagsForResource")?;
        Ok(ListTagsForResourceOutput {
            tags: self
                .tags
                .lock()
                .unwrap()
                .get(resource_arn)
                .cloned()
                .unwrap_or_default(),
        })
    }
}

pub struct FakeSts {
    pub account_id: Option<String>,
}

impl FakeSts {
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: Some(account_id.to_string()),
        }
    }

    pub fn unavailable() -> Self {
        Self { account_id: None }
    }
}

#[async_trait]
impl StsApi for FakeSts {
    async fn get_caller_identity(&self) -> Result<GetCallerIdentityOutput, ApiError> {
        match &self.account_id {
            Some(account) => Ok(GetCallerIdentityOutput {
                account: Some(account.clone()),
                arn: Some(format!("arn:aws:iam::{}:user/test", account)),
                user_id: Some("AIDATESTUSER".to_string()),
            }),
            None => Err(ApiError::service(
                "InvalidClientTokenId",
                "The security token included in the request is invalid",
            )),
        }
    }
}
