//! Localized problem documents for API failures
//!
//! This crate turns failures raised while handling a request into RFC 9457
//! problem documents. It provides:
//! - A closed error taxonomy with a static classification registry (`taxonomy`)
//! - A message catalog with default-language templates (`catalog`)
//! - The translator contract and built-in resolvers (`translation`)
//! - The problem document model and assembler (`problem`, `assembler`)
//! - The dispatcher for typed and structured failures (`dispatch`)
//!
//! Everything is a pure function of its inputs; the locale is passed
//! explicitly on every call.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod failure;
pub mod messages;
pub mod problem;
pub mod request;
pub mod structured;
pub mod taxonomy;
pub mod translation;

// Re-export commonly used types
pub use assembler::{assemble, mandatory_extensions};
pub use catalog::{MessageId, MessageTemplate};
pub use config::{ConfigError, ProblemsConfig};
pub use dispatch::{
    Overrides, dispatch, dispatch_any, dispatch_result, dispatch_structured, dispatch_with,
};
pub use error::ProblemEngineError;
pub use failure::{ProblemError, ValidationErrorGroup, ValidationFailure, group_failures};
pub use messages::Messages;
pub use problem::{APPLICATION_PROBLEM_JSON, Extensions, ProblemDocument};
pub use request::RequestMetadata;
pub use structured::StructuredError;
pub use taxonomy::{ClassificationEntry, ErrorKind, classification_for, classification_for_code};
pub use translation::{CatalogTranslator, DefaultTranslator, Locale, Translator, format_template};
