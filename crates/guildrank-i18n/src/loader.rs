//! Embedded Fluent resources and bundle construction.

use crate::error::{I18nError, I18nResult};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Locale used when none is requested or the requested one is unknown.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Thread-safe bundle shared by every command invocation.
pub type MessageBundle = FluentBundle<FluentResource>;

const EMBEDDED: &[(&str, &str)] = &[("en-US", include_str!("../locales/en-US/main.ftl"))];

/// Locales compiled into the binary.
pub fn available_locales() -> impl Iterator<Item = &'static str> {
    EMBEDDED.iter().map(|(locale, _)| *locale)
}

/// Fluent source for `locale`, if embedded.
pub fn embedded_source(locale: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(candidate, _)| *candidate == locale)
        .map(|(_, source)| *source)
}

/// Parses a language tag such as `en-US`.
pub fn parse_locale(locale: &str) -> I18nResult<LanguageIdentifier> {
    locale
        .parse()
        .map_err(|_| I18nError::InvalidLanguageId(locale.to_string()))
}

/// Parses `source` into a bundle for `locale`.
pub fn build_bundle(locale: &LanguageIdentifier, source: &str) -> I18nResult<MessageBundle> {
    let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
        I18nError::FluentParse {
            locale: locale.to_string(),
            errors: errors.iter().map(|e| format!("{e:?}")).collect(),
        }
    })?;

    let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
    // Unicode isolation marks render as garbage in Discord
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| I18nError::FluentParse {
            locale: locale.to_string(),
            errors: errors.iter().map(|e| format!("{e:?}")).collect(),
        })?;

    debug!("Built message bundle for {}", locale);
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_embedded() {
        assert!(embedded_source(DEFAULT_LOCALE).is_some());
        assert!(available_locales().any(|l| l == DEFAULT_LOCALE));
    }

    #[test]
    fn test_invalid_locale() {
        assert!(matches!(
            parse_locale("not a locale!"),
            Err(I18nError::InvalidLanguageId(_))
        ));
    }

    #[test]
    fn test_broken_resource_rejected() {
        let locale = parse_locale(DEFAULT_LOCALE).unwrap();
        let result = build_bundle(&locale, "valid = ok\nbroken = { $\n");
        assert!(matches!(result, Err(I18nError::FluentParse { .. })));
    }
}
