pub mod s3control;

pub use s3control::ObjectLambdaAccessPointResource;
