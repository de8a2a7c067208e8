/// One entry of the supported-language catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub label: &'static str,
}

/// Fixed, ordered catalog of supported languages. Selection UI renders
/// it in this order; it is not extensible at runtime.
pub const CATALOG: &[Language] = &[
    Language { code: "en", label: "English" },
    Language { code: "ru", label: "Русский" },
    Language { code: "de", label: "Deutsch" },
    Language { code: "fr", label: "Français" },
    Language { code: "es", label: "Español" },
    Language { code: "it", label: "Italiano" },
    Language { code: "ja", label: "日本語" },
    Language { code: "ko", label: "한국어" },
    Language { code: "zh", label: "中文" },
];

pub fn lookup(code: &str) -> Option<&'static Language> {
    CATALOG.iter().find(|lang| lang.code == code)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),
}

/// The currently selected source/target language codes.
///
/// Both sides always reference a catalog entry; a rejected update
/// leaves the prior selection untouched. Identity pairs (source equal
/// to target) are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    source: &'static Language,
    target: &'static Language,
}

impl LanguagePair {
    pub fn new(source: &str, target: &str) -> Result<Self, SelectionError> {
        let source =
            lookup(source).ok_or_else(|| SelectionError::UnknownLanguage(source.to_string()))?;
        let target =
            lookup(target).ok_or_else(|| SelectionError::UnknownLanguage(target.to_string()))?;
        Ok(Self { source, target })
    }

    pub fn set_source(&mut self, code: &str) -> Result<(), SelectionError> {
        self.source = lookup(code).ok_or_else(|| SelectionError::UnknownLanguage(code.to_string()))?;
        Ok(())
    }

    pub fn set_target(&mut self, code: &str) -> Result<(), SelectionError> {
        self.target = lookup(code).ok_or_else(|| SelectionError::UnknownLanguage(code.to_string()))?;
        Ok(())
    }

    pub fn source(&self) -> &str {
        self.source.code
    }

    pub fn target(&self) -> &str {
        self.target.code
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("en", "ru").expect("default languages are in the catalog")
    }
}
