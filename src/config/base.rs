//! `[base]` section configuration.
//!
//! Contains basic site information: author, title, description and locales.

use super::error::{ConfigError, require_non_empty};
use crate::log;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in fieldnotes.toml - basic site metadata.
///
/// Every field is required. Missing keys deserialize to empty strings so that
/// validation can report them by name instead of failing inside the parser.
///
/// # Example
/// ```toml
/// [base]
/// author = "Alice"
/// title = "Field Notes"
/// description = "A personal blog about Rust"
/// lang = "en-IN"
/// og_locale = "en_IN"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BaseConfig {
    /// Author name for attribution metadata and social preview images.
    pub author: String,

    /// Site-wide display name.
    pub title: String,

    /// Fallback description for pages lacking one.
    pub description: String,

    /// Document language tag (e.g., "en-IN").
    #[serde(alias = "language")]
    pub lang: String,

    /// Social preview locale (e.g., "en_IN"). Maintained independently of `lang`.
    #[serde(alias = "ogLocale", rename(serialize = "ogLocale"))]
    pub og_locale: String,
}

impl BaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.author, "base.author")?;
        require_non_empty(&self.title, "base.title")?;
        require_non_empty(&self.description, "base.description")?;
        require_non_empty(&self.lang, "base.lang")?;
        require_non_empty(&self.og_locale, "base.og_locale")?;

        if !locales_agree(&self.lang, &self.og_locale) {
            log!(
                "warn";
                "base.lang `{}` and base.og_locale `{}` name different locales",
                self.lang,
                self.og_locale
            );
        }
        Ok(())
    }
}

/// Whether a hyphenated language tag and an underscored locale name the same locale.
///
/// `en-IN` agrees with `en_IN`; comparison ignores case.
pub fn locales_agree(lang: &str, og_locale: &str) -> bool {
    lang.replace('-', "_").eq_ignore_ascii_case(og_locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<BaseConfig, toml::de::Error> {
        toml::from_str(s)
    }

    #[test]
    fn test_base_config_full() {
        let config = parse(
            r#"
            author = "Alice"
            title = "Field Notes"
            description = "Alice's Blog"
            lang = "en-IN"
            og_locale = "en_IN"
        "#,
        )
        .unwrap();

        assert_eq!(config.author, "Alice");
        assert_eq!(config.title, "Field Notes");
        assert_eq!(config.description, "Alice's Blog");
        assert_eq!(config.lang, "en-IN");
        assert_eq!(config.og_locale, "en_IN");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_camel_case_and_language_aliases() {
        let config = parse(
            r#"
            author = "A"
            title = "T"
            description = "D"
            language = "en-US"
            ogLocale = "en_US"
        "#,
        )
        .unwrap();

        assert_eq!(config.lang, "en-US");
        assert_eq!(config.og_locale, "en_US");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let config = parse(r#"title = "Only title""#).unwrap();
        assert_eq!(config.author, "");

        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("base.author"));
    }

    #[test]
    fn test_each_required_field_is_named() {
        let valid = BaseConfig {
            author: "A".into(),
            title: "T".into(),
            description: "D".into(),
            lang: "en-IN".into(),
            og_locale: "en_IN".into(),
        };

        let cases: [(&str, fn(&mut BaseConfig)); 5] = [
            ("base.author", |c| c.author.clear()),
            ("base.title", |c| c.title.clear()),
            ("base.description", |c| c.description.clear()),
            ("base.lang", |c| c.lang.clear()),
            ("base.og_locale", |c| c.og_locale.clear()),
        ];

        for (field, clear) in cases {
            let mut config = valid.clone();
            clear(&mut config);
            let err = config.validate().unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result = parse(
            r#"
            title = "Test"
            unknown_field = "should_fail"
        "#,
        );

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn test_locales_agree() {
        assert!(locales_agree("en-IN", "en_IN"));
        assert!(locales_agree("en-in", "en_IN"));
        assert!(locales_agree("fr", "fr"));
        assert!(!locales_agree("en-IN", "en_GB"));
        assert!(!locales_agree("en-US", "de_DE"));
    }

    #[test]
    fn test_mismatched_locales_still_validate() {
        let config = BaseConfig {
            author: "A".into(),
            title: "T".into(),
            description: "D".into(),
            lang: "en-IN".into(),
            og_locale: "en_GB".into(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serializes_og_locale_camel_case() {
        let config = BaseConfig {
            og_locale: "en_IN".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["ogLocale"], "en_IN");
    }
}
