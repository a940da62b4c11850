//! AWS service API surfaces
//!
//! Each service is an async trait so the provider can be handed a real SDK
//! client in production and an in-memory fake in tests.

pub mod error;
pub mod kendra;
pub mod s3control;
pub mod sts;

#[cfg(test)]
pub mod test_helpers;

pub use error::ApiError;
pub use kendra::KendraApi;
pub use s3control::S3ControlApi;
pub use sts::StsApi;

use std::future::Future;
use tfplug::Context;

/// Run one API call under the request context. An expired deadline becomes
/// [`ApiError::Timeout`], a cancelled request [`ApiError::Cancelled`].
pub async fn call<T, F>(ctx: &Context, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    ctx.run(fut).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn call_passes_through_api_result() {
        let ctx = Context::new();

        let ok: Result<u8, ApiError> = call(&ctx, async { Ok(1) }).await;
        assert_eq!(ok.unwrap(), 1);

        let err: Result<u8, ApiError> =
            call(&ctx, async { Err(ApiError::service("Throttling", "slow down")) }).await;
        assert!(err.unwrap_err().code_equals("Throttling"));
    }

    #[tokio::test]
    async fn call_maps_deadline_to_timeout() {
        let ctx = Context::new().with_timeout(Duration::from_millis(10));

        let result: Result<(), ApiError> = call(&ctx, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(ApiError::Timeout)));
    }

    #[tokio::test]
    async fn call_on_cancelled_context_never_runs() {
        let ctx = Context::new();
        ctx.cancel();

        let result: Result<(), ApiError> = call(&ctx, async { Ok(()) }).await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }
}
