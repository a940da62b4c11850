use super::error::ApiError;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCallerIdentityOutput {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

/// Used to discover the account ID when the provider configuration
/// does not pin one
#[async_trait]
pub trait StsApi: Send + Sync {
    async fn get_caller_identity(&self) -> Result<GetCallerIdentityOutput, ApiError>;
}
