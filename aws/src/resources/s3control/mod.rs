pub mod object_lambda_flex;
pub mod resource_object_lambda_access_point;

pub use resource_object_lambda_access_point::ObjectLambdaAccessPointResource;
