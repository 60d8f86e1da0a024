//! Problem document construction.

use serde_json::Value;

use crate::problem::{Extensions, ProblemDocument, keys};
use crate::taxonomy::{ErrorKind, classification_for};

/// The extension members every document carries, in emission order.
#[must_use]
pub fn mandatory_extensions(trace_id: &str, kind: ErrorKind, error_message: &str) -> Extensions {
    let mut extensions = Extensions::new();
    extensions.insert(keys::TRACE_ID.to_owned(), Value::from(trace_id));
    extensions.insert(keys::ERROR_CODE.to_owned(), Value::from(kind.code()));
    extensions.insert(keys::ERROR_MESSAGE.to_owned(), Value::from(error_message));
    extensions
}

/// Builds a problem document for `kind`.
///
/// `type` and `status` come from the classification registry. Extensions are
/// `base` followed by the members of `extra` whose names are not taken yet.
pub fn assemble(
    kind: ErrorKind,
    title: String,
    detail: String,
    instance: String,
    base: Extensions,
    extra: Extensions,
) -> ProblemDocument {
    let classification = classification_for(kind);

    let mut extensions = base;
    for (key, value) in extra {
        extensions.entry(key).or_insert(value);
    }

    ProblemDocument::new(
        classification.type_url,
        title,
        detail,
        classification.status_code(),
        instance,
        extensions,
    )
}
