//! Typed failures accepted by the dispatcher.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProblemEngineError;
use crate::taxonomy::ErrorKind;

/// One validation failure as reported by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Field path, e.g. "email" or "user.email"
    pub field: String,
    pub message: String,
    /// Optional machine-readable validator code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationFailure {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }
}

/// Failures of a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorGroup {
    pub property_name: String,
    pub errors: Vec<ValidationFailure>,
}

impl From<&ValidationFailure> for Value {
    fn from(failure: &ValidationFailure) -> Self {
        let mut entry = Map::new();
        entry.insert("field".to_owned(), Value::from(failure.field.as_str()));
        entry.insert("message".to_owned(), Value::from(failure.message.as_str()));
        if let Some(code) = &failure.code {
            entry.insert("code".to_owned(), Value::from(code.as_str()));
        }
        Value::Object(entry)
    }
}

impl From<&ValidationErrorGroup> for Value {
    fn from(group: &ValidationErrorGroup) -> Self {
        let mut entry = Map::new();
        entry.insert(
            "propertyName".to_owned(),
            Value::from(group.property_name.as_str()),
        );
        entry.insert(
            "errors".to_owned(),
            Value::Array(group.errors.iter().map(Value::from).collect()),
        );
        Value::Object(entry)
    }
}

/// Groups failures by field: groups in first-seen order, failures in input
/// order within each group.
#[must_use]
pub fn group_failures(failures: &[ValidationFailure]) -> Vec<ValidationErrorGroup> {
    let mut groups: Vec<ValidationErrorGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for failure in failures {
        let slot = *index.entry(failure.field.as_str()).or_insert_with(|| {
            groups.push(ValidationErrorGroup {
                property_name: failure.field.clone(),
                errors: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].errors.push(failure.clone());
    }

    groups
}

/// A failure raised while handling a request, one variant per [`ErrorKind`].
///
/// `message` is the raw, non-localized description that ends up in the
/// `error-message` extension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProblemError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    /// `resource` defaults to the request instance when absent.
    #[error("{message}")]
    Unauthorized {
        message: String,
        resource: Option<String>,
    },

    #[error("{message}")]
    ResourceNotFound {
        message: String,
        resource: String,
        property_name: String,
        property_value: String,
    },

    #[error("{message}")]
    ResourceAlreadyExists {
        message: String,
        resource: String,
        property_name: String,
        property_value: String,
    },

    #[error("{message}")]
    ResourceCreateFailed {
        message: String,
        resource: String,
        new_resource: Value,
        reasons: Vec<String>,
    },

    #[error("{message}")]
    ResourceUpdateFailed {
        message: String,
        resource: String,
        updated_resource: Value,
        reasons: Vec<String>,
    },

    #[error("{message}")]
    ResourcePatchFailed {
        message: String,
        resource: String,
        /// Property name and attempted value, in the caller's order.
        patches: Vec<(String, Option<String>)>,
    },

    #[error("{message}")]
    ResourceDeleteFailed {
        message: String,
        resource: String,
        reasons: Vec<String>,
    },

    #[error("{message}")]
    ValidationFailed {
        message: String,
        failures: Vec<ValidationFailure>,
    },

    #[error("{message}")]
    TaskCancelled { message: String },

    #[error("{message}")]
    Unexpected { message: String },
}

impl ProblemError {
    /// Wraps any failure as an unexpected error, keeping its text verbatim.
    #[must_use]
    pub fn unexpected(failure: impl std::fmt::Display) -> Self {
        Self::Unexpected {
            message: failure.to_string(),
        }
    }

    #[must_use]
    pub fn not_found(
        resource: impl Into<String>,
        property_name: impl Into<String>,
        property_value: impl Into<String>,
    ) -> Self {
        let resource = resource.into();
        let property_name = property_name.into();
        let property_value = property_value.into();
        Self::ResourceNotFound {
            message: format!("{resource} with {property_name} '{property_value}' not found"),
            resource,
            property_name,
            property_value,
        }
    }

    #[must_use]
    pub fn validation(failures: Vec<ValidationFailure>) -> Self {
        Self::ValidationFailed {
            message: format!("{} validation failure(s)", failures.len()),
            failures,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            Self::ResourceAlreadyExists { .. } => ErrorKind::ResourceAlreadyExists,
            Self::ResourceCreateFailed { .. } => ErrorKind::ResourceCreateFailed,
            Self::ResourceUpdateFailed { .. } => ErrorKind::ResourceUpdateFailed,
            Self::ResourcePatchFailed { .. } => ErrorKind::ResourcePatchFailed,
            Self::ResourceDeleteFailed { .. } => ErrorKind::ResourceDeleteFailed,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::TaskCancelled { .. } => ErrorKind::TaskCancelled,
            Self::Unexpected { .. } => ErrorKind::UnexpectedError,
        }
    }

    /// The raw description.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::Forbidden { message }
            | Self::Unauthorized { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::ResourceAlreadyExists { message, .. }
            | Self::ResourceCreateFailed { message, .. }
            | Self::ResourceUpdateFailed { message, .. }
            | Self::ResourcePatchFailed { message, .. }
            | Self::ResourceDeleteFailed { message, .. }
            | Self::ValidationFailed { message, .. }
            | Self::TaskCancelled { message }
            | Self::Unexpected { message } => message,
        }
    }
}

impl From<anyhow::Error> for ProblemError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<ProblemError>() {
            Ok(problem) => problem,
            Err(e) => Self::unexpected(e),
        }
    }
}

impl From<ProblemEngineError> for ProblemError {
    fn from(e: ProblemEngineError) -> Self {
        Self::unexpected(e)
    }
}
