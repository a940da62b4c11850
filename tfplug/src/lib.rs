//! tfplug - Terraform Plugin Framework for Rust
//!
//! The provider-facing half of a Terraform plugin framework: dynamic values,
//! schemas with validators, diagnostics, request contexts and the
//! provider/resource/data source traits.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod data_source;
pub mod provider;
pub mod resource;

// Helper modules
pub mod import;
pub mod validator;

// Re-exports for convenience
pub use context::Context;
pub use data_source::DataSource;
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough_id;
pub use provider::Provider;
pub use resource::Resource;
pub use schema::{AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder};
pub use types::{Config, Diagnostic, Dynamic, DynamicValue, State};
