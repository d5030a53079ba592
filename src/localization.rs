//! Static message catalog for the two supported interface scripts.
//!
//! One fluent bundle per language, loaded once from the embedded `.ftl`
//! catalogs. Lookups fall back to the default language and finally to the
//! raw key itself, so rendering never fails.

use anyhow::{anyhow, Result};
use fluent::{FluentArgs, FluentResource};
use fluent_bundle::concurrent::FluentBundle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;
use unic_langid::LanguageIdentifier;

const UZ_LATN_FTL: &str = include_str!("../locales/uz-latn/main.ftl");
const UZ_CYRL_FTL: &str = include_str!("../locales/uz-cyrl/main.ftl");

/// Interface language chosen by a user. Latin is the default and the
/// fallback for missing translations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Latin,
    Cyrillic,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Latin, Language::Cyrillic];

    /// Stable code stored in the users table.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Latin => "uz-latn",
            Language::Cyrillic => "uz-cyrl",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "uz-latn" => Some(Language::Latin),
            "uz-cyrl" => Some(Language::Cyrillic),
            _ => None,
        }
    }
}

/// Immutable message catalog for all supported languages.
pub struct Catalog {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl Catalog {
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for (language, source) in [
            (Language::Latin, UZ_LATN_FTL),
            (Language::Cyrillic, UZ_CYRL_FTL),
        ] {
            bundles.insert(language, Self::create_bundle(language, source)?);
        }
        Ok(Self { bundles })
    }

    fn create_bundle(language: Language, source: &str) -> Result<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = language.code().parse()?;
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            anyhow!("failed to parse {} catalog: {errors:?}", language.code())
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Chat output is plain text; Unicode isolation marks would leak
        // into messages and button labels.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            anyhow!("duplicate messages in {} catalog: {errors:?}", language.code())
        })?;

        Ok(bundle)
    }

    /// Resolve a message key for a language. Falls back to the default
    /// language's bundle, and finally to the key itself.
    pub fn resolve(&self, language: Language, key: &str, args: Option<&FluentArgs>) -> String {
        for candidate in [language, Language::default()] {
            let Some(bundle) = self.bundles.get(&candidate) else {
                continue;
            };
            let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
                continue;
            };

            let mut errors = vec![];
            let value = bundle.format_pattern(pattern, args, &mut errors).into_owned();
            if !errors.is_empty() {
                warn!(key, lang = candidate.code(), ?errors, "message formatting errors");
            }
            return value;
        }

        warn!(key, lang = language.code(), "missing translation");
        key.to_string()
    }
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Load the global catalog eagerly so a broken catalog fails at startup.
pub fn init() -> Result<()> {
    if CATALOG.get().is_none() {
        let _ = CATALOG.set(Catalog::new()?);
    }
    Ok(())
}

/// Global catalog accessor.
pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| Catalog::new().expect("embedded message catalogs are valid"))
}

/// Resolve a message key for a language.
pub fn t(language: Language, key: &str) -> String {
    catalog().resolve(language, key, None)
}

/// Resolve a message key with named placeholder values.
pub fn t_args(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, *value);
    }
    catalog().resolve(language, key, Some(&fluent_args))
}
