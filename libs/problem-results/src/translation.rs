//! Translation resolver contract and the two built-in resolvers.
//!
//! Resolution never fails: a locale or key without a catalog entry falls back
//! to the default template, formatted with the same positional parameters.

use std::collections::HashMap;

use crate::config::{ConfigError, ProblemsConfig};

/// A normalized BCP 47-ish language tag (`fr`, `pt-br`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Normalizes `tag`: trimmed, lower-cased, `_` replaced by `-`.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().replace('_', "-").to_ascii_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`pt` for `pt-br`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves localized text for a message key.
///
/// Implementations must fall back to `format_template(default_template,
/// params)` when they have nothing for `locale` and `key`.
pub trait Translator: Send + Sync {
    fn resolve(
        &self,
        key: &str,
        default_template: &str,
        locale: &Locale,
        params: &[&str],
    ) -> String;
}

/// Substitutes `{n}` placeholders with `params[n]`.
///
/// `{{` and `}}` produce literal braces. Placeholders that are malformed or
/// out of range are kept verbatim.
#[must_use]
pub fn format_template(template: &str, params: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            let value = tail.find('}').and_then(|end| {
                tail[1..end]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| params.get(index))
                    .map(|value| (end, *value))
            });
            if let Some((end, value)) = value {
                out.push_str(value);
                rest = &tail[end + 1..];
                continue;
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Resolver without catalogs: always formats the default template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn resolve(
        &self,
        _key: &str,
        default_template: &str,
        _locale: &Locale,
        params: &[&str],
    ) -> String {
        format_template(default_template, params)
    }
}

/// In-memory per-locale catalogs.
///
/// Lookup order: exact locale tag, then its language subtag, then the
/// default template. Locales outside `supported` always get the default.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    supported: Vec<Locale>,
    catalogs: HashMap<Locale, HashMap<String, String>>,
}

impl CatalogTranslator {
    /// Empty translator accepting every locale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &ProblemsConfig) -> Self {
        let mut translator =
            Self::new().with_supported_locales(config.supported_locales.as_slice());
        for (tag, messages) in &config.catalogs {
            translator = translator.with_messages(
                &Locale::new(tag),
                messages.iter().map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        translator
    }

    /// Restricts the locales whose catalogs are consulted. Empty means all.
    #[must_use]
    pub fn with_supported_locales<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.supported = tags.iter().map(|tag| Locale::new(tag.as_ref())).collect();
        self
    }

    /// Adds (or overrides) messages for `locale`.
    #[must_use]
    pub fn with_messages<I>(mut self, locale: &Locale, messages: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.catalogs
            .entry(locale.clone())
            .or_default()
            .extend(messages);
        self
    }

    /// Adds messages for `locale` from a flat JSON object (`{"KEY": "template"}`).
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidCatalog` if `json` is not such an object.
    pub fn with_json_catalog(self, locale: &Locale, json: &str) -> Result<Self, ConfigError> {
        let messages: HashMap<String, String> =
            serde_json::from_str(json).map_err(|source| ConfigError::InvalidCatalog {
                locale: locale.to_string(),
                source,
            })?;
        Ok(self.with_messages(locale, messages))
    }

    #[must_use]
    pub fn is_supported(&self, locale: &Locale) -> bool {
        self.supported.is_empty()
            || self
                .supported
                .iter()
                .any(|s| s == locale || s.as_str() == locale.language())
    }

    fn lookup(&self, key: &str, locale: &Locale) -> Option<&str> {
        if !self.is_supported(locale) {
            return None;
        }
        let exact = self.catalogs.get(locale).and_then(|c| c.get(key));
        exact
            .or_else(|| {
                self.catalogs
                    .get(&Locale::new(locale.language()))
                    .and_then(|c| c.get(key))
            })
            .map(String::as_str)
    }
}

impl Translator for CatalogTranslator {
    fn resolve(
        &self,
        key: &str,
        default_template: &str,
        locale: &Locale,
        params: &[&str],
    ) -> String {
        let template = self.lookup(key, locale).unwrap_or(default_template);
        format_template(template, params)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn locale_normalization() {
        let locale = Locale::new(" pt_BR ");
        assert_eq!(locale.as_str(), "pt-br");
        assert_eq!(locale.language(), "pt");
        assert_eq!(Locale::new("fr").language(), "fr");
    }

    #[test]
    fn formats_positional_placeholders() {
        assert_eq!(
            format_template("an '{0}' with an '{1}' of '{2}'", &["User", "id", "42"]),
            "an 'User' with an 'id' of '42'"
        );
        assert_eq!(format_template("{1}-{0}-{1}", &["a", "b"]), "b-a-b");
    }

    #[test]
    fn keeps_unresolvable_placeholders() {
        assert_eq!(format_template("{0} {1}", &["x"]), "x {1}");
        assert_eq!(format_template("{name} {0}", &["x"]), "{name} x");
        assert_eq!(format_template("open { brace", &[]), "open { brace");
        assert_eq!(format_template("dangling {0", &["x"]), "dangling {0");
    }

    #[test]
    fn escaped_braces() {
        assert_eq!(format_template("{{0}} is {0}", &["x"]), "{0} is x");
        assert_eq!(format_template("}}", &[]), "}");
    }

    #[test]
    fn default_translator_formats_default() {
        let text = DefaultTranslator.resolve("KEY", "hello '{0}'", &Locale::new("de"), &["w"]);
        assert_eq!(text, "hello 'w'");
    }

    #[test]
    fn catalog_lookup_order() {
        let translator = CatalogTranslator::new()
            .with_messages(
                &Locale::new("fr"),
                [("GREETING".to_owned(), "bonjour '{0}'".to_owned())],
            )
            .with_messages(
                &Locale::new("fr-ca"),
                [("GREETING".to_owned(), "allo '{0}'".to_owned())],
            );

        let resolve = |tag: &str| {
            translator.resolve("GREETING", "hello '{0}'", &Locale::new(tag), &["x"])
        };
        assert_eq!(resolve("fr-CA"), "allo 'x'");
        assert_eq!(resolve("fr-BE"), "bonjour 'x'");
        assert_eq!(resolve("de"), "hello 'x'");
        assert_eq!(
            translator.resolve("OTHER", "other {0}", &Locale::new("fr"), &["y"]),
            "other y"
        );
    }

    #[test]
    fn unsupported_locale_uses_default_even_with_catalog() {
        let translator = CatalogTranslator::new()
            .with_supported_locales(&["en"])
            .with_messages(&Locale::new("fr"), [("K".to_owned(), "fr".to_owned())]);
        assert!(!translator.is_supported(&Locale::new("fr")));
        assert!(translator.is_supported(&Locale::new("en-GB")));
        assert_eq!(translator.resolve("K", "en", &Locale::new("fr"), &[]), "en");
    }

    #[test]
    fn json_catalog() {
        let translator = CatalogTranslator::new()
            .with_json_catalog(&Locale::new("de"), r#"{"K": "Hallo {0}"}"#)
            .unwrap();
        assert_eq!(
            translator.resolve("K", "Hello {0}", &Locale::new("de"), &["Welt"]),
            "Hallo Welt"
        );

        let err = CatalogTranslator::new()
            .with_json_catalog(&Locale::new("de"), "[1, 2]")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCatalog { ref locale, .. } if locale == "de"));
    }

    #[test]
    fn from_config_builds_catalogs() {
        let raw = serde_json::json!({
            "supported_locales": ["en", "fr"],
            "catalogs": { "fr": { "K": "salut {0}" }, "de": { "K": "hallo {0}" } }
        });
        let config = ProblemsConfig::from_section(Some(&raw)).unwrap();
        let translator = CatalogTranslator::from_config(&config);
        assert_eq!(translator.resolve("K", "hi {0}", &Locale::new("fr"), &["a"]), "salut a");
        // de has a catalog but is not supported.
        assert_eq!(translator.resolve("K", "hi {0}", &Locale::new("de"), &["a"]), "hi a");
    }
}
