//! Error dispatcher: typed failure -> localized problem document.

use serde_json::{Map, Value};

use crate::assembler::{assemble, mandatory_extensions};
use crate::error::ProblemEngineError;
use crate::failure::{ProblemError, ValidationFailure, group_failures};
use crate::messages::Messages;
use crate::problem::{Extensions, ProblemDocument, keys};
use crate::request::RequestMetadata;
use crate::structured::StructuredError;
use crate::translation::{Locale, Translator};

/// Caller-supplied title and detail.
///
/// A supplied field is used verbatim: it is neither translated nor checked
/// against the kind's message parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl Overrides {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Resolved detail and kind-specific extensions.
struct Rendered {
    detail: String,
    extensions: Extensions,
}

impl Rendered {
    fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.to_owned(), value.into());
        self
    }

    fn with_lookup(self, resource: &str, property_name: &str, property_value: &str) -> Self {
        self.with(keys::RESOURCE, resource)
            .with(keys::PROPERTY_NAME, property_name)
            .with(keys::PROPERTY_VALUE, property_value)
    }
}

/// Renders `error` as a problem document in `locale`.
///
/// # Errors
/// Returns `ProblemEngineError::InvalidParameter` when a field required by
/// the kind's message is blank (or, for validation failures, the list is
/// empty).
pub fn dispatch(
    error: &ProblemError,
    translator: &dyn Translator,
    locale: &Locale,
    request: &RequestMetadata,
) -> Result<ProblemDocument, ProblemEngineError> {
    dispatch_with(error, translator, locale, request, &Overrides::default())
}

/// Like [`dispatch`], with the title and/or detail supplied by the caller.
///
/// # Errors
/// Same as [`dispatch`]. A supplied detail is never validated, so it never
/// fails.
pub fn dispatch_with(
    error: &ProblemError,
    translator: &dyn Translator,
    locale: &Locale,
    request: &RequestMetadata,
    overrides: &Overrides,
) -> Result<ProblemDocument, ProblemEngineError> {
    let messages = Messages::new(translator, locale);
    let instance = request.instance();
    let kind = error.kind();

    let rendered = render(error, &messages, overrides.detail.as_deref(), request, &instance)?;
    let title = overrides
        .title
        .clone()
        .unwrap_or_else(|| messages.title(kind));
    if matches!(error, ProblemError::Unexpected { .. }) {
        tracing::warn!(error = %error.message(), "rendering unexpected failure");
    }

    let document = assemble(
        kind,
        title,
        rendered.detail,
        instance,
        mandatory_extensions(&request.trace_id, kind, error.message()),
        rendered.extensions,
    );
    tracing::debug!(
        kind = %kind,
        status = document.status().as_u16(),
        locale = %locale,
        "rendered problem document"
    );
    Ok(document)
}

/// Renders a structured result error.
///
/// # Errors
/// Same as [`dispatch`]. Unregistered codes never fail; they render as an
/// unexpected error.
pub fn dispatch_structured(
    error: &StructuredError,
    translator: &dyn Translator,
    locale: &Locale,
    request: &RequestMetadata,
) -> Result<ProblemDocument, ProblemEngineError> {
    if error.kind().is_none() {
        tracing::warn!(code = error.code, "unsupported error kind code, rendering as unexpected");
    }
    dispatch(
        &ProblemError::from_structured(error),
        translator,
        locale,
        request,
    )
}

/// Renders the error side of a structured result; `Ok` yields `None`.
///
/// # Errors
/// Same as [`dispatch_structured`].
pub fn dispatch_result<T>(
    result: &Result<T, StructuredError>,
    translator: &dyn Translator,
    locale: &Locale,
    request: &RequestMetadata,
) -> Result<Option<ProblemDocument>, ProblemEngineError> {
    match result {
        Ok(_) => Ok(None),
        Err(error) => dispatch_structured(error, translator, locale, request).map(Some),
    }
}

/// Renders an arbitrary failure. A [`ProblemError`] wrapped in `failure` is
/// rendered as such; anything else is an unexpected error carrying the
/// failure's text verbatim.
///
/// # Errors
/// Same as [`dispatch`].
pub fn dispatch_any(
    failure: &anyhow::Error,
    translator: &dyn Translator,
    locale: &Locale,
    request: &RequestMetadata,
) -> Result<ProblemDocument, ProblemEngineError> {
    if let Some(error) = failure.downcast_ref::<ProblemError>() {
        return dispatch(error, translator, locale, request);
    }
    dispatch(&ProblemError::unexpected(failure), translator, locale, request)
}

fn render(
    error: &ProblemError,
    messages: &Messages<'_>,
    supplied: Option<&str>,
    request: &RequestMetadata,
    instance: &str,
) -> Result<Rendered, ProblemEngineError> {
    let detail = |resolve: &dyn Fn() -> Result<String, ProblemEngineError>| {
        let detail = match supplied {
            Some(detail) => detail.to_owned(),
            None => resolve()?,
        };
        Ok::<_, ProblemEngineError>(Rendered {
            detail,
            extensions: Extensions::new(),
        })
    };

    let rendered = match error {
        ProblemError::BadRequest { .. } => {
            detail(&|| messages.bad_request(&request.method, &request.path))?
        }
        ProblemError::Forbidden { .. } => {
            detail(&|| Ok(messages.forbidden()))?.with(keys::RESOURCE, instance)
        }
        ProblemError::Unauthorized { resource, .. } => {
            let resource = resource.as_deref().unwrap_or(instance);
            detail(&|| messages.unauthorized(resource))?.with(keys::RESOURCE, resource)
        }
        ProblemError::ResourceNotFound {
            resource,
            property_name,
            property_value,
            ..
        } => detail(&|| messages.resource_not_found(resource, property_name, property_value))?
            .with_lookup(resource, property_name, property_value),
        ProblemError::ResourceAlreadyExists {
            resource,
            property_name,
            property_value,
            ..
        } => detail(&|| {
            messages.resource_already_exists(resource, property_name, property_value)
        })?
        .with_lookup(resource, property_name, property_value),
        ProblemError::ResourceCreateFailed {
            resource,
            new_resource,
            reasons,
            ..
        } => detail(&|| messages.resource_create_failed(resource))?
            .with(keys::RESOURCE, resource.as_str())
            .with(keys::NEW_RESOURCE, new_resource.clone())
            .with(keys::REASONS, reasons.clone()),
        ProblemError::ResourceUpdateFailed {
            resource,
            updated_resource,
            reasons,
            ..
        } => detail(&|| messages.resource_update_failed(resource))?
            .with(keys::RESOURCE, resource.as_str())
            .with(keys::UPDATED_RESOURCE, updated_resource.clone())
            .with(keys::REASONS, reasons.clone()),
        ProblemError::ResourcePatchFailed {
            resource, patches, ..
        } => detail(&|| messages.resource_patch_failed(resource))?
            .with(keys::RESOURCE, resource.as_str())
            .with(keys::PATCHES, patches_value(patches)),
        ProblemError::ResourceDeleteFailed {
            resource, reasons, ..
        } => detail(&|| messages.resource_delete_failed(resource))?
            .with(keys::RESOURCE, resource.as_str())
            .with(keys::REASONS, reasons.clone()),
        ProblemError::ValidationFailed { failures, .. } => {
            let total = i64::try_from(failures.len()).unwrap_or(i64::MAX);
            detail(&|| messages.validation_errors(total))?
                .with(keys::ERRORS, validation_groups(failures))
        }
        ProblemError::TaskCancelled { .. } => detail(&|| messages.task_cancelled(instance))?,
        ProblemError::Unexpected { .. } => detail(&|| Ok(messages.unexpected_error()))?,
    };
    Ok(rendered)
}

/// Patch entries as a JSON object, in the caller's order.
fn patches_value(patches: &[(String, Option<String>)]) -> Value {
    let entries: Map<String, Value> = patches
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value.clone())))
        .collect();
    Value::Object(entries)
}

fn validation_groups(failures: &[ValidationFailure]) -> Value {
    Value::Array(group_failures(failures).iter().map(Value::from).collect())
}
