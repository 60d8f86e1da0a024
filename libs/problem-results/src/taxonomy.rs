//! Closed error taxonomy and its classification registry.
//!
//! Every [`ErrorKind`] maps to exactly one [`ClassificationEntry`] holding the
//! problem `type` URI and HTTP status. The table is static and read-only.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ProblemEngineError;

macro_rules! problem_type_base {
    () => {
        "https://support.sondor-technology.co.uk/problems/"
    };
}

/// Base URI for all problem types.
pub const PROBLEM_TYPE_BASE: &str = problem_type_base!();

/// Non-standard "client closed request" status used for cancelled tasks.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// The closed set of failure categories the engine renders.
///
/// The discriminant is the stable integer code carried in the `error-code`
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum ErrorKind {
    BadRequest = 1,
    Forbidden = 2,
    Unauthorized = 3,
    ResourceNotFound = 4,
    ResourceAlreadyExists = 5,
    ResourceCreateFailed = 6,
    ResourceUpdateFailed = 7,
    ResourcePatchFailed = 8,
    ResourceDeleteFailed = 9,
    ValidationFailed = 10,
    TaskCancelled = 11,
    UnexpectedError = 12,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 12] = [
        ErrorKind::BadRequest,
        ErrorKind::Forbidden,
        ErrorKind::Unauthorized,
        ErrorKind::ResourceNotFound,
        ErrorKind::ResourceAlreadyExists,
        ErrorKind::ResourceCreateFailed,
        ErrorKind::ResourceUpdateFailed,
        ErrorKind::ResourcePatchFailed,
        ErrorKind::ResourceDeleteFailed,
        ErrorKind::ValidationFailed,
        ErrorKind::TaskCancelled,
        ErrorKind::UnexpectedError,
    ];

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Stable symbolic name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            Self::ResourceCreateFailed => "RESOURCE_CREATE_FAILED",
            Self::ResourceUpdateFailed => "RESOURCE_UPDATE_FAILED",
            Self::ResourcePatchFailed => "RESOURCE_PATCH_FAILED",
            Self::ResourceDeleteFailed => "RESOURCE_DELETE_FAILED",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::TaskCancelled => "TASK_CANCELLED",
            Self::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorKind> for i32 {
    fn from(kind: ErrorKind) -> Self {
        kind.code()
    }
}

impl TryFrom<i32> for ErrorKind {
    type Error = ProblemEngineError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(ProblemEngineError::UnsupportedErrorKind { code })
    }
}

/// Static classification of one error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationEntry {
    pub kind: ErrorKind,
    pub type_url: &'static str,
    pub status: u16,
}

impl ClassificationEntry {
    /// HTTP status as a [`StatusCode`].
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        // Every table status is within 100..=999, the fallback is unreachable.
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

macro_rules! classification {
    ($kind:ident, $suffix:literal, $status:expr) => {
        ClassificationEntry {
            kind: ErrorKind::$kind,
            type_url: concat!(problem_type_base!(), $suffix),
            status: $status,
        }
    };
}

/// Classification table, indexed by `code - 1`.
static CLASSIFICATIONS: [ClassificationEntry; 12] = [
    classification!(BadRequest, "bad-request", 400),
    classification!(Forbidden, "forbidden", 403),
    classification!(Unauthorized, "unauthorized", 401),
    classification!(ResourceNotFound, "resource-not-found", 404),
    classification!(ResourceAlreadyExists, "conflict", 409),
    classification!(ResourceCreateFailed, "resource-creation-failed", 422),
    classification!(ResourceUpdateFailed, "resource-update-failed", 422),
    classification!(ResourcePatchFailed, "resource-patch-failed", 422),
    classification!(ResourceDeleteFailed, "resource-delete-failed", 404),
    // Validation failures share the bad request classification.
    classification!(ValidationFailed, "bad-request", 400),
    classification!(TaskCancelled, "request-cancelled", CLIENT_CLOSED_REQUEST),
    classification!(UnexpectedError, "unexpected-error", 500),
];

/// Looks up the classification of a kind.
#[must_use]
pub fn classification_for(kind: ErrorKind) -> &'static ClassificationEntry {
    match kind {
        ErrorKind::BadRequest => &CLASSIFICATIONS[0],
        ErrorKind::Forbidden => &CLASSIFICATIONS[1],
        ErrorKind::Unauthorized => &CLASSIFICATIONS[2],
        ErrorKind::ResourceNotFound => &CLASSIFICATIONS[3],
        ErrorKind::ResourceAlreadyExists => &CLASSIFICATIONS[4],
        ErrorKind::ResourceCreateFailed => &CLASSIFICATIONS[5],
        ErrorKind::ResourceUpdateFailed => &CLASSIFICATIONS[6],
        ErrorKind::ResourcePatchFailed => &CLASSIFICATIONS[7],
        ErrorKind::ResourceDeleteFailed => &CLASSIFICATIONS[8],
        ErrorKind::ValidationFailed => &CLASSIFICATIONS[9],
        ErrorKind::TaskCancelled => &CLASSIFICATIONS[10],
        ErrorKind::UnexpectedError => &CLASSIFICATIONS[11],
    }
}

/// Looks up the classification of a raw integer code.
///
/// # Errors
/// Returns [`ProblemEngineError::UnsupportedErrorKind`] when `code` is not a
/// registered kind.
pub fn classification_for_code(
    code: i32,
) -> Result<&'static ClassificationEntry, ProblemEngineError> {
    ErrorKind::try_from(code).map(classification_for)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_entry() {
        for kind in ErrorKind::ALL {
            let entry = classification_for(kind);
            assert_eq!(entry.kind, kind);
            assert!(entry.type_url.starts_with(PROBLEM_TYPE_BASE));
            assert!(entry.type_url.len() > PROBLEM_TYPE_BASE.len());
            assert!(std::ptr::eq(entry, classification_for(kind)));
        }
    }

    #[test]
    fn status_table() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::ValidationFailed, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::ResourceNotFound, 404),
            (ErrorKind::ResourceDeleteFailed, 404),
            (ErrorKind::ResourceAlreadyExists, 409),
            (ErrorKind::ResourceCreateFailed, 422),
            (ErrorKind::ResourceUpdateFailed, 422),
            (ErrorKind::ResourcePatchFailed, 422),
            (ErrorKind::TaskCancelled, 499),
            (ErrorKind::UnexpectedError, 500),
        ];
        for (kind, status) in expected {
            assert_eq!(classification_for(kind).status, status, "{kind}");
            assert_eq!(classification_for(kind).status_code().as_u16(), status);
        }
    }

    #[test]
    fn type_urls_extend_the_shared_base() {
        let url = classification_for(ErrorKind::TaskCancelled).type_url;
        assert_eq!(url.strip_prefix(PROBLEM_TYPE_BASE), Some("request-cancelled"));
        assert_eq!(
            classification_for(ErrorKind::ResourceAlreadyExists).type_url,
            format!("{PROBLEM_TYPE_BASE}conflict")
        );
    }

    #[test]
    fn validation_failed_shares_bad_request_type() {
        assert_eq!(
            classification_for(ErrorKind::ValidationFailed).type_url,
            classification_for(ErrorKind::BadRequest).type_url
        );
    }

    #[test]
    fn codes_round_trip_through_try_from() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::try_from(kind.code()), Ok(kind));
        }
    }

    #[test]
    fn unknown_codes_are_unsupported() {
        for code in [0, -1, 13, 999] {
            assert_eq!(
                classification_for_code(code),
                Err(ProblemEngineError::UnsupportedErrorKind { code })
            );
        }
    }

    #[test]
    fn kind_serializes_as_code() {
        let json = serde_json::to_value(ErrorKind::TaskCancelled).unwrap();
        assert_eq!(json, serde_json::json!(11));
        let kind: ErrorKind = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(kind, ErrorKind::ResourceNotFound);
        assert!(serde_json::from_value::<ErrorKind>(serde_json::json!(77)).is_err());
    }
}
