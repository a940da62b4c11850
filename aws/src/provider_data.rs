//! Provider data structure passed to resources and data sources

use crate::api::{KendraApi, S3ControlApi};
use crate::tags::IgnoreTagsConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AwsProviderData {
    pub s3control: Arc<dyn S3ControlApi>,
    pub kendra: Arc<dyn KendraApi>,
    pub region: String,
    pub account_id: String,
    pub partition: String,
    pub ignore_tags: IgnoreTagsConfig,
}

impl AwsProviderData {
    pub fn new(
        s3control: Arc<dyn S3ControlApi>,
        kendra: Arc<dyn KendraApi>,
        region: impl Into<String>,
        account_id: impl Into<String>,
        partition: impl Into<String>,
    ) -> Self {
        Self {
            s3control,
            kendra,
            region: region.into(),
            account_id: account_id.into(),
            partition: partition.into(),
            ignore_tags: IgnoreTagsConfig::default(),
        }
    }

    pub fn with_ignore_tags(mut self, ignore_tags: IgnoreTagsConfig) -> Self {
        self.ignore_tags = ignore_tags;
        self
    }
}
