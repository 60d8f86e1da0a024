//! Structured result errors: a kind code, a description and an untyped
//! context map.
//!
//! This is the only place where missing data degrades gracefully. Each
//! expected context key is read once; absent or mistyped values become empty
//! strings, empty lists, empty maps or JSON null.

use serde_json::{Map, Value};

use crate::failure::{ProblemError, ValidationFailure};
use crate::problem::keys;
use crate::taxonomy::ErrorKind;

/// Error half of a structured result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredError {
    /// Raw kind code; may be outside the registered set.
    pub code: i32,
    pub description: String,
    pub context: Map<String, Value>,
}

impl StructuredError {
    #[must_use]
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Self {
        Self::from_code(kind.code(), description)
    }

    #[must_use]
    pub fn from_code(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            context: Map::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Registered kind, if the code is one.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::try_from(self.code).ok()
    }

    fn text(&self, key: &str) -> String {
        match self.context.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn value(&self, key: &str) -> Value {
        self.context.get(key).cloned().unwrap_or(Value::Null)
    }

    fn strings(&self, key: &str) -> Vec<String> {
        let Some(Value::Array(items)) = self.context.get(key) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect()
    }

    fn failures(&self) -> Vec<ValidationFailure> {
        let Some(Value::Array(items)) = self.context.get(keys::ERRORS) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }

    fn patches(&self) -> Vec<(String, Option<String>)> {
        let Some(Value::Object(entries)) = self.context.get(keys::PATCHES) else {
            return Vec::new();
        };
        entries
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

impl ProblemError {
    /// Converts a structured error into its typed variant.
    ///
    /// Unregistered codes become [`ProblemError::Unexpected`] with the
    /// description kept verbatim.
    #[must_use]
    pub fn from_structured(error: &StructuredError) -> Self {
        let message = error.description.clone();
        let Some(kind) = error.kind() else {
            return Self::Unexpected { message };
        };

        match kind {
            ErrorKind::BadRequest => Self::BadRequest { message },
            ErrorKind::Forbidden => Self::Forbidden { message },
            ErrorKind::Unauthorized => {
                let resource = error.text(keys::RESOURCE);
                Self::Unauthorized {
                    message,
                    resource: (!resource.trim().is_empty()).then_some(resource),
                }
            }
            ErrorKind::ResourceNotFound => Self::ResourceNotFound {
                message,
                resource: error.text(keys::RESOURCE),
                property_name: error.text(keys::PROPERTY_NAME),
                property_value: error.text(keys::PROPERTY_VALUE),
            },
            ErrorKind::ResourceAlreadyExists => Self::ResourceAlreadyExists {
                message,
                resource: error.text(keys::RESOURCE),
                property_name: error.text(keys::PROPERTY_NAME),
                property_value: error.text(keys::PROPERTY_VALUE),
            },
            ErrorKind::ResourceCreateFailed => Self::ResourceCreateFailed {
                message,
                resource: error.text(keys::RESOURCE),
                new_resource: error.value(keys::NEW_RESOURCE),
                reasons: error.strings(keys::REASONS),
            },
            ErrorKind::ResourceUpdateFailed => Self::ResourceUpdateFailed {
                message,
                resource: error.text(keys::RESOURCE),
                updated_resource: error.value(keys::UPDATED_RESOURCE),
                reasons: error.strings(keys::REASONS),
            },
            ErrorKind::ResourcePatchFailed => Self::ResourcePatchFailed {
                message,
                resource: error.text(keys::RESOURCE),
                patches: error.patches(),
            },
            ErrorKind::ResourceDeleteFailed => Self::ResourceDeleteFailed {
                message,
                resource: error.text(keys::RESOURCE),
                reasons: error.strings(keys::REASONS),
            },
            ErrorKind::ValidationFailed => Self::ValidationFailed {
                message,
                failures: error.failures(),
            },
            ErrorKind::TaskCancelled => Self::TaskCancelled { message },
            ErrorKind::UnexpectedError => Self::Unexpected { message },
        }
    }
}

impl From<&StructuredError> for ProblemError {
    fn from(error: &StructuredError) -> Self {
        Self::from_structured(error)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_typed_fields_from_context() {
        let error = StructuredError::new(ErrorKind::ResourceCreateFailed, "insert failed")
            .with_context("resource", "Order")
            .with_context("new-resource", json!({ "id": 7 }))
            .with_context("reasons", json!(["duplicate sku", 3]));

        assert_eq!(
            ProblemError::from_structured(&error),
            ProblemError::ResourceCreateFailed {
                message: "insert failed".to_owned(),
                resource: "Order".to_owned(),
                new_resource: json!({ "id": 7 }),
                reasons: vec!["duplicate sku".to_owned(), "3".to_owned()],
            }
        );
    }

    #[test]
    fn missing_keys_become_empty_defaults() {
        let error = StructuredError::new(ErrorKind::ResourceUpdateFailed, "boom");
        assert_eq!(
            ProblemError::from_structured(&error),
            ProblemError::ResourceUpdateFailed {
                message: "boom".to_owned(),
                resource: String::new(),
                updated_resource: Value::Null,
                reasons: Vec::new(),
            }
        );

        let error = StructuredError::new(ErrorKind::ResourcePatchFailed, "boom")
            .with_context("patches", "not-an-object");
        assert!(matches!(
            ProblemError::from_structured(&error),
            ProblemError::ResourcePatchFailed { ref patches, .. } if patches.is_empty()
        ));
    }

    #[test]
    fn non_string_scalars_are_stringified() {
        let error = StructuredError::new(ErrorKind::ResourceNotFound, "missing")
            .with_context("resource", "User")
            .with_context("property-name", "id")
            .with_context("property-value", 42);
        let ProblemError::ResourceNotFound { property_value, .. } =
            ProblemError::from_structured(&error)
        else {
            panic!("wrong variant");
        };
        assert_eq!(property_value, "42");
    }

    #[test]
    fn patches_keep_nulls() {
        let error = StructuredError::new(ErrorKind::ResourcePatchFailed, "patch failed")
            .with_context("resource", "User")
            .with_context("patches", json!({ "name": "bob", "alias": null }));
        let ProblemError::ResourcePatchFailed { patches, .. } =
            ProblemError::from_structured(&error)
        else {
            panic!("wrong variant");
        };
        assert_eq!(
            patches,
            vec![
                ("name".to_owned(), Some("bob".to_owned())),
                ("alias".to_owned(), None),
            ]
        );
    }

    #[test]
    fn patches_keep_caller_order() {
        let error = StructuredError::new(ErrorKind::ResourcePatchFailed, "patch failed")
            .with_context("resource", "User")
            .with_context("patches", json!({ "zeta": "1", "alpha": null, "mid": 2 }));
        let ProblemError::ResourcePatchFailed { patches, .. } =
            ProblemError::from_structured(&error)
        else {
            panic!("wrong variant");
        };
        let names: Vec<&str> = patches.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn validation_failures_skip_malformed_entries() {
        let error = StructuredError::new(ErrorKind::ValidationFailed, "invalid")
            .with_context(
                "errors",
                json!([{ "field": "name", "message": "required" }, "garbage"]),
            );
        let ProblemError::ValidationFailed { failures, .. } = ProblemError::from_structured(&error)
        else {
            panic!("wrong variant");
        };
        assert_eq!(failures, vec![ValidationFailure::new("name", "required")]);
    }

    #[test]
    fn blank_unauthorized_resource_is_absent() {
        let error = StructuredError::new(ErrorKind::Unauthorized, "no token")
            .with_context("resource", "  ");
        assert!(matches!(
            ProblemError::from_structured(&error),
            ProblemError::Unauthorized { resource: None, .. }
        ));
    }

    #[test]
    fn unknown_code_is_unexpected() {
        let error = StructuredError::from_code(404_404, "legacy failure");
        assert_eq!(error.kind(), None);
        assert_eq!(
            ProblemError::from(&error),
            ProblemError::Unexpected {
                message: "legacy failure".to_owned()
            }
        );
    }
}
