//! Provider error types
//!
//! Handlers build a [`ProviderError`] with `?` and convert it into a
//! [`Diagnostic`] once, at the trait boundary.

use crate::api::ApiError;
use tfplug::types::{AttributePath, Diagnostic};
use tfplug::TfplugError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("unexpected format for ID ({id}), expected {expected}")]
    MalformedIdentifier { id: String, expected: String },

    #[error("{resource} ({id}) not found")]
    NotFound { resource: String, id: String },

    #[error("{action} {resource} ({id}): {source}")]
    ExternalCallFailure {
        action: &'static str,
        resource: String,
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("{action} {resource} ({id}): empty response")]
    EmptyResponse {
        action: &'static str,
        resource: String,
        id: String,
    },

    #[error("setting {attribute}: {source}")]
    StatePopulationFailure {
        attribute: String,
        #[source]
        source: TfplugError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A failure that does not name the resource it happened to
    #[error("{resource}{}: {source}", id_suffix(.id))]
    InResource {
        resource: String,
        id: String,
        #[source]
        source: Box<ProviderError>,
    },
}

fn id_suffix(id: &str) -> String {
    if id.is_empty() {
        String::new()
    } else {
        format!(" ({})", id)
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    pub fn external(
        action: &'static str,
        resource: impl Into<String>,
        id: impl Into<String>,
        source: ApiError,
    ) -> Self {
        ProviderError::ExternalCallFailure {
            action,
            resource: resource.into(),
            id: id.into(),
            source,
        }
    }

    pub fn state(attribute: &AttributePath, source: TfplugError) -> Self {
        ProviderError::StatePopulationFailure {
            attribute: attribute.to_string(),
            source,
        }
    }

    /// Attach the resource type and ID to errors raised without them.
    /// Errors that already name their resource are returned unchanged.
    pub fn for_resource(self, resource: &str, id: &str) -> Self {
        match self {
            ProviderError::MalformedIdentifier { .. }
            | ProviderError::StatePopulationFailure { .. }
            | ProviderError::InvalidConfiguration(_) => ProviderError::InResource {
                resource: resource.to_string(),
                id: id.to_string(),
                source: Box::new(self),
            },
            other => other,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProviderError::MalformedIdentifier { .. } => {
                Diagnostic::error("Invalid resource identifier", self.to_string())
                    .with_attribute(AttributePath::new("id"))
            }
            ProviderError::NotFound { resource, .. } => {
                Diagnostic::error(format!("{} not found", resource), self.to_string())
            }
            ProviderError::ExternalCallFailure {
                action,
                resource,
                id,
                ..
            }
            | ProviderError::EmptyResponse {
                action,
                resource,
                id,
            } => Diagnostic::error(
                format!("{} {} ({})", action, resource, id),
                self.to_string(),
            ),
            ProviderError::StatePopulationFailure { attribute, .. } => {
                Diagnostic::error(format!("Failed to set {}", attribute), self.to_string())
            }
            ProviderError::InvalidConfiguration(_) => {
                Diagnostic::error("Invalid provider configuration", self.to_string())
            }
            ProviderError::InResource {
                resource,
                id,
                source,
            } => match source.as_ref() {
                ProviderError::MalformedIdentifier { .. } => {
                    Diagnostic::error(format!("Invalid {} identifier", resource), self.to_string())
                        .with_attribute(AttributePath::new("id"))
                }
                ProviderError::StatePopulationFailure { attribute, .. } => Diagnostic::error(
                    format!("Failed to set {} on {}{}", attribute, resource, id_suffix(id)),
                    self.to_string(),
                ),
                ProviderError::InvalidConfiguration(_) => {
                    Diagnostic::error(format!("Invalid {} configuration", resource), self.to_string())
                }
                _ => Diagnostic::error(format!("{}{}", resource, id_suffix(id)), self.to_string()),
            },
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        err.to_diagnostic()
    }
}
