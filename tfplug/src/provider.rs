//! Provider trait
//!
//! Providers are configured once, then hand out resource and data source
//! instances on demand. Instances receive whatever they need (API clients,
//! account metadata) through their constructors.

use crate::context::Context;
use crate::data_source::DataSource;
use crate::resource::Resource;
use crate::schema::Schema;
use crate::types::{Config, Diagnostic};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Prefix shared by every resource type name, e.g. "aws"
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    async fn configure(&mut self, ctx: Context, request: ConfigureRequest) -> ConfigureResponse;

    /// Fails with `ProviderNotConfigured` before configure succeeded and
    /// `ResourceNotFound` for unknown names
    async fn create_resource(&self, name: &str) -> Result<Box<dyn Resource>>;

    async fn create_data_source(&self, name: &str) -> Result<Box<dyn DataSource>>;

    async fn resource_schemas(&self) -> HashMap<String, Schema>;

    async fn data_source_schemas(&self) -> HashMap<String, Schema>;
}

pub struct ConfigureRequest {
    pub config: Config,
}

pub struct ConfigureResponse {
    pub diagnostics: Vec<Diagnostic>,
}
