//! RFC 9457 problem document (pure data model, no HTTP framework dependencies).

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type for problem documents.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Insertion-ordered extension members.
pub type Extensions = serde_json::Map<String, serde_json::Value>;

/// Extension keys written by the engine.
pub mod keys {
    pub const TRACE_ID: &str = "traceId";
    pub const ERROR_CODE: &str = "error-code";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const RESOURCE: &str = "resource";
    pub const PROPERTY_NAME: &str = "property-name";
    pub const PROPERTY_VALUE: &str = "property-value";
    pub const NEW_RESOURCE: &str = "new-resource";
    pub const UPDATED_RESOURCE: &str = "updated-resource";
    pub const REASONS: &str = "reasons";
    pub const PATCHES: &str = "patches";
    pub const ERRORS: &str = "errors";

    /// Keys present on every document, in emission order.
    pub const MANDATORY: [&str; 3] = [TRACE_ID, ERROR_CODE, ERROR_MESSAGE];
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

fn about_blank() -> String {
    "about:blank".to_owned()
}

/// A rendered problem document.
///
/// Built by [`crate::assembler::assemble`]; read-only afterwards. Extension
/// members serialize at the top level, after the standard members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ProblemDocument {
    #[serde(rename = "type", default = "about_blank")]
    type_url: String,
    #[serde(default)]
    title: String,
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    status: StatusCode,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    instance: String,
    #[serde(flatten)]
    extensions: Extensions,
}

impl ProblemDocument {
    pub(crate) fn new(
        type_url: &str,
        title: String,
        detail: String,
        status: StatusCode,
        instance: String,
        extensions: Extensions,
    ) -> Self {
        Self {
            type_url: type_url.to_owned(),
            title,
            status,
            detail,
            instance,
            extensions,
        }
    }

    /// Problem type URI.
    #[must_use]
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.get(key)
    }

    /// Whether `json` parses as a problem document object.
    #[must_use]
    pub fn is_valid_json(json: &str) -> bool {
        serde_json::from_str::<ProblemDocument>(json).is_ok()
    }
}

/// Responds with the document's status and `application/problem+json`.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemDocument {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        let content_type = [(axum::http::header::CONTENT_TYPE, APPLICATION_PROBLEM_JSON)];
        (status, content_type, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ProblemDocument {
        let mut extensions = Extensions::new();
        extensions.insert(keys::TRACE_ID.to_owned(), json!("trace-1"));
        extensions.insert(keys::ERROR_CODE.to_owned(), json!(4));
        extensions.insert(keys::ERROR_MESSAGE.to_owned(), json!("missing"));
        extensions.insert(keys::RESOURCE.to_owned(), json!("User"));
        ProblemDocument::new(
            "https://example.com/problems/resource-not-found",
            "Resource not found!".to_owned(),
            "detail".to_owned(),
            StatusCode::NOT_FOUND,
            "HTTP/1.1 GET /users/42".to_owned(),
            extensions,
        )
    }

    #[test]
    fn serializes_status_as_u16_and_flattens_extensions() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["status"], json!(404));
        assert_eq!(value["type"], json!("https://example.com/problems/resource-not-found"));
        assert_eq!(value["traceId"], json!("trace-1"));
        assert_eq!(value["resource"], json!("User"));
    }

    #[test]
    fn serialized_member_order_is_stable() {
        let text = serde_json::to_string(&sample()).unwrap();
        let order: Vec<usize> = [
            "\"type\"",
            "\"title\"",
            "\"status\"",
            "\"traceId\"",
            "\"error-code\"",
            "\"resource\"",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap())
        .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{text}");
    }

    #[test]
    fn deserializes_back() {
        let text = serde_json::to_string(&sample()).unwrap();
        let parsed: ProblemDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn is_valid_json() {
        let text = serde_json::to_string(&sample()).unwrap();
        assert!(ProblemDocument::is_valid_json(&text));
        assert!(!ProblemDocument::is_valid_json("[]"));
        assert!(!ProblemDocument::is_valid_json("invalid-syntax"));
        assert!(!ProblemDocument::is_valid_json(r#"{"status": 1000}"#));
    }
}
