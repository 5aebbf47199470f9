//! Mapping from project locales to DeepL target language codes.
//!
//! Project locales use the `ll_CC` form (e.g. `en_US`). DeepL wants its own
//! codes, which only carry a region for the variants it distinguishes.

/// A project locale and the DeepL code it translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleMapping {
    /// Project locale (e.g. "pt_PT")
    pub locale: &'static str,
    /// DeepL `target_lang` value (e.g. "PT-PT")
    pub deepl_code: &'static str,
}

/// Locales whose DeepL code differs from the bare uppercased language.
const DEEPL_LOCALES: &[LocaleMapping] = &[
    LocaleMapping { locale: "en_US", deepl_code: "EN-US" },
    LocaleMapping { locale: "en_GB", deepl_code: "EN-GB" },
    LocaleMapping { locale: "de_DE", deepl_code: "DE" },
    LocaleMapping { locale: "es_ES", deepl_code: "ES" },
    LocaleMapping { locale: "it_IT", deepl_code: "IT" },
    LocaleMapping { locale: "pt_PT", deepl_code: "PT-PT" },
    LocaleMapping { locale: "nl_NL", deepl_code: "NL" },
    LocaleMapping { locale: "pl_PL", deepl_code: "PL" },
    LocaleMapping { locale: "ru_RU", deepl_code: "RU" },
];

/// Look up an explicit mapping for a locale.
pub fn lookup(locale: &str) -> Option<&'static LocaleMapping> {
    DEEPL_LOCALES.iter().find(|m| m.locale == locale)
}

/// DeepL target language for a project locale.
///
/// Unmapped locales fall back to the uppercased language part, so `ja_JP`
/// becomes `JA`.
pub fn deepl_target_lang(locale: &str) -> String {
    match lookup(locale) {
        Some(mapping) => mapping.deepl_code.to_string(),
        None => locale
            .split('_')
            .next()
            .unwrap_or(locale)
            .to_uppercase(),
    }
}
