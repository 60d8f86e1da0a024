//! Typed title/detail resolution for each problem kind.
//!
//! Required parameters are validated here, before the translator is asked,
//! so a blank resource name never produces text like "resource '' was not
//! found".

use crate::catalog::MessageId;
use crate::error::{ProblemEngineError, require_non_blank};
use crate::taxonomy::ErrorKind;
use crate::translation::{Locale, Translator};

/// Message resolution bound to one translator and one request locale.
#[derive(Clone, Copy)]
pub struct Messages<'a> {
    translator: &'a dyn Translator,
    locale: &'a Locale,
}

impl<'a> Messages<'a> {
    #[must_use]
    pub fn new(translator: &'a dyn Translator, locale: &'a Locale) -> Self {
        Self { translator, locale }
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        self.locale
    }

    /// Resolves an arbitrary catalog message without parameter checks.
    #[must_use]
    pub fn text(&self, id: MessageId, params: &[&str]) -> String {
        let template = id.template();
        self.translator
            .resolve(template.key, template.default_template, self.locale, params)
    }

    /// Title of `kind`.
    #[must_use]
    pub fn title(&self, kind: ErrorKind) -> String {
        let id = match kind {
            ErrorKind::BadRequest => MessageId::BadRequestTitle,
            ErrorKind::Forbidden => MessageId::ForbiddenTitle,
            ErrorKind::Unauthorized => MessageId::UnauthorizedTitle,
            ErrorKind::ResourceNotFound => MessageId::ResourceNotFoundTitle,
            ErrorKind::ResourceAlreadyExists => MessageId::ResourceAlreadyExistsTitle,
            ErrorKind::ResourceCreateFailed => MessageId::ResourceCreateFailedTitle,
            ErrorKind::ResourceUpdateFailed => MessageId::ResourceUpdateFailedTitle,
            ErrorKind::ResourcePatchFailed => MessageId::ResourcePatchFailedTitle,
            ErrorKind::ResourceDeleteFailed => MessageId::ResourceDeleteFailedTitle,
            ErrorKind::ValidationFailed => MessageId::ValidationErrorTitle,
            ErrorKind::TaskCancelled => MessageId::TaskCancelledTitle,
            ErrorKind::UnexpectedError => MessageId::UnexpectedErrorTitle,
        };
        self.text(id, &[])
    }

    #[must_use]
    pub fn bad_request_title(&self) -> String {
        self.text(MessageId::BadRequestTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `method` or `path` is blank.
    pub fn bad_request(&self, method: &str, path: &str) -> Result<String, ProblemEngineError> {
        require_non_blank("method", method)?;
        require_non_blank("path", path)?;
        let method = method.to_uppercase();
        Ok(self.text(MessageId::BadRequest, &[method.as_str(), path]))
    }

    #[must_use]
    pub fn forbidden_title(&self) -> String {
        self.text(MessageId::ForbiddenTitle, &[])
    }

    #[must_use]
    pub fn forbidden(&self) -> String {
        self.text(MessageId::Forbidden, &[])
    }

    #[must_use]
    pub fn unauthorized_title(&self) -> String {
        self.text(MessageId::UnauthorizedTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `resource` is blank.
    pub fn unauthorized(&self, resource: &str) -> Result<String, ProblemEngineError> {
        require_non_blank("resource", resource)?;
        Ok(self.text(MessageId::Unauthorized, &[resource]))
    }

    #[must_use]
    pub fn resource_not_found_title(&self) -> String {
        self.text(MessageId::ResourceNotFoundTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if any argument is blank.
    pub fn resource_not_found(
        &self,
        resource: &str,
        property_name: &str,
        property_value: &str,
    ) -> Result<String, ProblemEngineError> {
        require_non_blank("resource", resource)?;
        require_non_blank("property_name", property_name)?;
        require_non_blank("property_value", property_value)?;
        Ok(self.text(
            MessageId::ResourceNotFound,
            &[resource, property_name, property_value],
        ))
    }

    #[must_use]
    pub fn resource_already_exists_title(&self) -> String {
        self.text(MessageId::ResourceAlreadyExistsTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if any argument is blank.
    pub fn resource_already_exists(
        &self,
        resource: &str,
        property_name: &str,
        property_value: &str,
    ) -> Result<String, ProblemEngineError> {
        require_non_blank("resource", resource)?;
        require_non_blank("property_name", property_name)?;
        require_non_blank("property_value", property_value)?;
        Ok(self.text(
            MessageId::ResourceAlreadyExists,
            &[resource, property_name, property_value],
        ))
    }

    #[must_use]
    pub fn resource_create_failed_title(&self) -> String {
        self.text(MessageId::ResourceCreateFailedTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `resource` is blank.
    pub fn resource_create_failed(&self, resource: &str) -> Result<String, ProblemEngineError> {
        self.resource_message(MessageId::ResourceCreateFailed, resource)
    }

    #[must_use]
    pub fn resource_update_failed_title(&self) -> String {
        self.text(MessageId::ResourceUpdateFailedTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `resource` is blank.
    pub fn resource_update_failed(&self, resource: &str) -> Result<String, ProblemEngineError> {
        self.resource_message(MessageId::ResourceUpdateFailed, resource)
    }

    #[must_use]
    pub fn resource_patch_failed_title(&self) -> String {
        self.text(MessageId::ResourcePatchFailedTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `resource` is blank.
    pub fn resource_patch_failed(&self, resource: &str) -> Result<String, ProblemEngineError> {
        self.resource_message(MessageId::ResourcePatchFailed, resource)
    }

    #[must_use]
    pub fn resource_delete_failed_title(&self) -> String {
        self.text(MessageId::ResourceDeleteFailedTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `resource` is blank.
    pub fn resource_delete_failed(&self, resource: &str) -> Result<String, ProblemEngineError> {
        self.resource_message(MessageId::ResourceDeleteFailed, resource)
    }

    #[must_use]
    pub fn validation_errors_title(&self) -> String {
        self.text(MessageId::ValidationErrorTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` unless `total_errors` is positive.
    pub fn validation_errors(&self, total_errors: i64) -> Result<String, ProblemEngineError> {
        if total_errors <= 0 {
            return Err(ProblemEngineError::InvalidParameter {
                name: "total_errors",
                reason: format!("must be greater than 0, got {total_errors}"),
            });
        }
        let count = total_errors.to_string();
        Ok(self.text(MessageId::ValidationError, &[count.as_str()]))
    }

    #[must_use]
    pub fn task_cancelled_title(&self) -> String {
        self.text(MessageId::TaskCancelledTitle, &[])
    }

    /// # Errors
    /// `InvalidParameter` if `task` is blank.
    pub fn task_cancelled(&self, task: &str) -> Result<String, ProblemEngineError> {
        require_non_blank("task", task)?;
        Ok(self.text(MessageId::TaskCancelled, &[task]))
    }

    #[must_use]
    pub fn unexpected_error_title(&self) -> String {
        self.text(MessageId::UnexpectedErrorTitle, &[])
    }

    #[must_use]
    pub fn unexpected_error(&self) -> String {
        self.text(MessageId::UnexpectedError, &[])
    }

    fn resource_message(
        &self,
        id: MessageId,
        resource: &str,
    ) -> Result<String, ProblemEngineError> {
        require_non_blank("resource", resource)?;
        Ok(self.text(id, &[resource]))
    }
}
