//! Message lookup and formatting.

use crate::error::{I18nError, I18nResult};
use crate::loader::{build_bundle, embedded_source, parse_locale, MessageBundle, DEFAULT_LOCALE};
use fluent_bundle::FluentArgs;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Formatted access to the message catalogue.
pub struct Messages {
    locale: LanguageIdentifier,
    bundle: MessageBundle,
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Messages {
    /// Loads the embedded catalogue for `locale`, falling back to
    /// [`DEFAULT_LOCALE`] when it is not compiled in.
    pub fn new(locale: &str) -> I18nResult<Self> {
        let (tag, source) = match embedded_source(locale) {
            Some(source) => (locale, source),
            None => {
                warn!("Locale {} is not available, using {}", locale, DEFAULT_LOCALE);
                let source = embedded_source(DEFAULT_LOCALE).ok_or_else(|| {
                    I18nError::InvalidLanguageId(DEFAULT_LOCALE.to_string())
                })?;
                (DEFAULT_LOCALE, source)
            }
        };

        Self::from_source(tag, source)
    }

    /// Builds a catalogue from Fluent source text.
    pub fn from_source(locale: &str, source: &str) -> I18nResult<Self> {
        let locale = parse_locale(locale)?;
        let bundle = build_bundle(&locale, source)?;
        Ok(Self { locale, bundle })
    }

    /// Active locale.
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Whether `key` has a value in the catalogue.
    pub fn has(&self, key: &str) -> bool {
        self.bundle
            .get_message(key)
            .is_some_and(|message| message.value().is_some())
    }

    /// Formats `key`, reporting missing messages and formatter errors.
    pub fn try_get(&self, key: &str, args: Option<&FluentArgs<'_>>) -> I18nResult<String> {
        let pattern = self
            .bundle
            .get_message(key)
            .and_then(|message| message.value())
            .ok_or_else(|| I18nError::MessageNotFound {
                key: key.to_string(),
            })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            return Err(I18nError::MessageFormat {
                key: key.to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            });
        }

        Ok(formatted.into_owned())
    }

    /// Formats `key`; a missing or broken message renders as the key itself.
    pub fn get(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        self.try_get(key, args).unwrap_or_else(|e| {
            warn!("{}", e);
            key.to_string()
        })
    }

    /// Formats `key` without arguments.
    pub fn text(&self, key: &str) -> String {
        self.get(key, None)
    }
}
