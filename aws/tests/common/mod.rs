//! Shared fakes for the provider integration tests
//!
//! Kendra answers from raw JSON-protocol bodies so the response and error
//! decoders run the same way they do against the real service.

#![allow(clippy::disallowed_methods)]
#![allow(dead_code)]

use async_trait::async_trait;
use aws::api::kendra::{
    parse_describe_thesaurus_response, DescribeThesaurusInput, DescribeThesaurusOutput,
    KendraApi, ListTagsForResourceOutput,
};
use aws::api::s3control::{
    CreateAccessPointForObjectLambdaInput, CreateAccessPointForObjectLambdaOutput,
    GetAccessPointConfigurationForObjectLambdaOutput, GetAccessPointForObjectLambdaOutput,
    ObjectLambdaConfiguration, PutAccessPointConfigurationForObjectLambdaInput, S3ControlApi,
};
use aws::api::sts::{GetCallerIdentityOutput, StsApi};
use aws::api::ApiError;
use std::collections::HashMap;
use std::sync::Mutex;

pub const ACCOUNT_ID: &str = "123456789012";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// S3 Control backed by a map, with the service's error codes
#[derive(Default)]
pub struct MemoryS3Control {
    store: Mutex<HashMap<String, Option<ObjectLambdaConfiguration>>>,
    pub puts: Mutex<usize>,
}

impl MemoryS3Control {
    fn key(account_id: &str, name: &str) -> String {
        format!("{}/{}", account_id, name)
    }

    fn no_such_access_point() -> ApiError {
        ApiError::service("NoSuchAccessPoint", "The specified accesspoint does not exist")
    }

    pub fn exists(&self, account_id: &str, name: &str) -> bool {
        self.store
            .lock()
            .unwrap()
            .contains_key(&Self::key(account_id, name))
    }

    /// Simulate deletion outside Terraform
    pub fn forget(&self, account_id: &str, name: &str) {
        self.store.lock().unwrap().remove(&Self::key(account_id, name));
    }
}

#[async_trait]
impl S3ControlApi for MemoryS3Control {
    async fn create_access_point_for_object_lambda(
        &self,
        input: CreateAccessPointForObjectLambdaInput,
    ) -> Result<CreateAccessPointForObjectLambdaOutput, ApiError> {
        self.store.lock().unwrap().insert(
            Self::key(&input.account_id, &input.name),
            input.configuration,
        );
        Ok(CreateAccessPointForObjectLambdaOutput::default())
    }

    async fn get_access_point_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<GetAccessPointForObjectLambdaOutput, ApiError> {
        if !self.exists(account_id, name) {
            return Err(Self::no_such_access_point());
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
        self.store
            .lock()
            .unwrap()
            .get(&Self::key(account_id, name))
            .cloned()
            .map(|configuration| GetAccessPointConfigurationForObjectLambdaOutput { configuration })
            .ok_or_else(Self::no_such_access_point)
    }

    async fn put_access_point_configuration_for_object_lambda(
        &self,
        input: PutAccessPointConfigurationForObjectLambdaInput,
    ) -> Result<(), ApiError> {
        *self.puts.lock().unwrap() += 1;
        let mut store = self.store.lock().unwrap();
        match store.get_mut(&Self::key(&input.account_id, &input.name)) {
            Some(slot) => {
                *slot = input.configuration;
                Ok(())
            }
            None => Err(Self::no_such_access_point()),
        }
    }

    async fn delete_access_point_for_object_lambda(
        &self,
        account_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        match self.store.lock().unwrap().remove(&Self::key(account_id, name)) {
            Some(_) => Ok(()),
            None => Err(Self::no_such_access_point()),
        }
    }
}

/// Kendra answering with canned JSON bodies
#[derive(Default)]
pub struct JsonKendra {
    describe_bodies: Mutex<HashMap<String, String>>,
    tags_body: Mutex<Option<String>>,
}

impl JsonKendra {
    pub fn with_thesaurus(self, thesaurus_id: &str, body: &str) -> Self {
        self.describe_bodies
            .lock()
            .unwrap()
            .insert(thesaurus_id.to_string(), body.to_string());
        self
    }

    pub fn with_tags(self, body: &str) -> Self {
        *self.tags_body.lock().unwrap() = Some(body.to_string());
        self
    }
}

#[async_trait]
impl KendraApi for JsonKendra {
    async fn describe_thesaurus(
        &self,
        input: DescribeThesaurusInput,
    ) -> Result<Option<DescribeThesaurusOutput>, ApiError> {
        match self.describe_bodies.lock().unwrap().get(&input.id) {
            Some(body) => parse_describe_thesaurus_response(body.as_bytes()),
            None => Err(ApiError::from_json_body(
                br#"{"__type":"com.amazonaws.kendra#ResourceNotFoundException","message":"The thesaurus does not exist"}"#,
                Some("00000000-0000-0000-0000-000000000000".to_string()),
            )),
        }
    }

    async fn list_tags_for_resource(
        &self,
        _resource_arn: &str,
    ) -> Result<ListTagsForResourceOutput, ApiError> {
        match self.tags_body.lock().unwrap().as_deref() {
            Some(body) => {
                serde_json::from_str(body).map_err(|e| ApiError::ParseError(e.to_string()))
            }
            None => Ok(ListTagsForResourceOutput::default()),
        }
    }
}

pub struct StaticSts;

#[async_trait]
impl StsApi for StaticSts {
    async fn get_caller_identity(&self) -> Result<GetCallerIdentityOutput, ApiError> {
        Ok(GetCallerIdentityOutput {
            account: Some(ACCOUNT_ID.to_string()),
            ..Default::default()
        })
    }
}
