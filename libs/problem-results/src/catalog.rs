//! Message catalog: one translation key and default-language template per
//! user-facing title or detail.

/// Identifies a catalog message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    BadRequest,
    BadRequestTitle,
    Forbidden,
    ForbiddenTitle,
    ResourceAlreadyExists,
    ResourceAlreadyExistsTitle,
    ResourceCreateFailed,
    ResourceCreateFailedTitle,
    ResourceDeleteFailed,
    ResourceDeleteFailedTitle,
    ResourceNotFound,
    ResourceNotFoundTitle,
    ResourcePatchFailed,
    ResourcePatchFailedTitle,
    ResourceUpdateFailed,
    ResourceUpdateFailedTitle,
    Unauthorized,
    UnauthorizedTitle,
    UnexpectedError,
    UnexpectedErrorTitle,
    ValidationError,
    ValidationErrorTitle,
    TaskCancelled,
    TaskCancelledTitle,
}

/// Translation key plus default template with `{0}`-style placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    pub key: &'static str,
    pub default_template: &'static str,
}

const fn template(key: &'static str, default_template: &'static str) -> MessageTemplate {
    MessageTemplate {
        key,
        default_template,
    }
}

/// Every catalog entry, in `MessageId` declaration order.
pub static TEMPLATES: [(MessageId, MessageTemplate); 24] = [
    (
        MessageId::BadRequest,
        template("BAD_REQUEST", "Unfortunately, '{0}' '{1}' request is invalid."),
    ),
    (
        MessageId::BadRequestTitle,
        template("BAD_REQUEST_TITLE", "Bad request!"),
    ),
    (
        MessageId::Forbidden,
        template(
            "FORBIDDEN",
            "Unfortunately, you do not have access to the requested resource.",
        ),
    ),
    (
        MessageId::ForbiddenTitle,
        template("FORBIDDEN_TITLE", "Access forbidden!"),
    ),
    (
        MessageId::ResourceAlreadyExists,
        template(
            "RESOURCE_ALREADY_EXISTS",
            "Unfortunately, an '{0}' with an '{1}' of '{2}' already exists.",
        ),
    ),
    (
        MessageId::ResourceAlreadyExistsTitle,
        template("RESOURCE_ALREADY_EXISTS_TITLE", "Resource already exists!"),
    ),
    (
        MessageId::ResourceCreateFailed,
        template(
            "RESOURCE_CREATE_FAILED",
            "Unfortunately, the create '{0}' resource request failed.",
        ),
    ),
    (
        MessageId::ResourceCreateFailedTitle,
        template("RESOURCE_CREATE_FAILED_TITLE", "Resource creation failed!"),
    ),
    (
        MessageId::ResourceDeleteFailed,
        template(
            "RESOURCE_DELETE_FAILED",
            "Unfortunately, the delete '{0}' request failed.",
        ),
    ),
    (
        MessageId::ResourceDeleteFailedTitle,
        template("RESOURCE_DELETE_FAILED_TITLE", "Resource deletion failed!"),
    ),
    (
        MessageId::ResourceNotFound,
        template(
            "RESOURCE_NOT_FOUND",
            "Unfortunately, an '{0}' with an '{1}' of '{2}' was not found.",
        ),
    ),
    (
        MessageId::ResourceNotFoundTitle,
        template("RESOURCE_NOT_FOUND_TITLE", "Resource not found!"),
    ),
    (
        MessageId::ResourcePatchFailed,
        template(
            "RESOURCE_PATCH_FAILED",
            "Unfortunately, the patch '{0}' request failed.",
        ),
    ),
    (
        MessageId::ResourcePatchFailedTitle,
        template("RESOURCE_PATCH_FAILED_TITLE", "Resource patch failed!"),
    ),
    (
        MessageId::ResourceUpdateFailed,
        template(
            "RESOURCE_UPDATE_FAILED",
            "Unfortunately, the update '{0}' request failed.",
        ),
    ),
    (
        MessageId::ResourceUpdateFailedTitle,
        template("RESOURCE_UPDATE_FAILED_TITLE", "Resource update failed!"),
    ),
    (
        MessageId::Unauthorized,
        template(
            "UNAUTHORIZED",
            "Unfortunately, you're not authorized to access '{0}'.",
        ),
    ),
    (
        MessageId::UnauthorizedTitle,
        template("UNAUTHORIZED_TITLE", "Access denied!"),
    ),
    (
        MessageId::UnexpectedError,
        template(
            "UNEXPECTED_ERROR",
            "Unfortunately, an unexpected error has occurred!",
        ),
    ),
    (
        MessageId::UnexpectedErrorTitle,
        template("UNEXPECTED_ERROR_TITLE", "An error has occurred!"),
    ),
    (
        MessageId::ValidationError,
        template(
            "VALIDATION_ERROR",
            "Unfortunately, '{0}' validation errors have occurred.",
        ),
    ),
    (
        MessageId::ValidationErrorTitle,
        template("VALIDATION_ERROR_TITLE", "Request validation failed!"),
    ),
    (
        MessageId::TaskCancelled,
        template(
            "TASK_CANCELLED",
            "Unfortunately, the '{0}' task has been cancelled.",
        ),
    ),
    (
        MessageId::TaskCancelledTitle,
        template("TASK_CANCELLED_TITLE", "Task cancelled!"),
    ),
];

impl MessageId {
    /// The catalog entry for this message.
    #[must_use]
    pub fn template(self) -> &'static MessageTemplate {
        // TEMPLATES is declared in variant order.
        &TEMPLATES[self as usize].1
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        self.template().key
    }

    #[must_use]
    pub fn default_template(self) -> &'static str {
        self.template().default_template
    }
}
