//! Locale defaults for number formatting

use std::fmt::Debug;

use super::document::NumberFormat;

/// Source of per-language number formatting defaults
pub trait LocaleDefaults: Debug {
    /// Separators for a base language (`en`, `es`, ...), `None` if unknown
    fn number_format_defaults_for(&self, language_base: &str) -> Option<NumberFormat>;
}

/// Format used when the locale source has nothing for a language
///
/// Matches the default language (Spanish).
pub fn fallback_number_format() -> NumberFormat {
    NumberFormat::new(".", ",")
}

/// Built-in table of common locales
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocaleTable;

/// (language, thousands, decimal)
const LOCALE_TABLE: &[(&str, &str, &str)] = &[
    ("es", ".", ","),
    ("en", ",", "."),
    ("fr", "\u{202f}", ","),
    ("de", ".", ","),
    ("it", ".", ","),
    ("pt", ".", ","),
    ("nl", ".", ","),
    ("ru", "\u{a0}", ","),
    ("pl", "\u{a0}", ","),
    ("sv", "\u{a0}", ","),
    ("tr", ".", ","),
    ("ja", ",", "."),
    ("zh", ",", "."),
    ("ko", ",", "."),
];

impl LocaleDefaults for BuiltinLocaleTable {
    fn number_format_defaults_for(&self, language_base: &str) -> Option<NumberFormat> {
        LOCALE_TABLE
            .iter()
            .find(|(lang, _, _)| *lang == language_base)
            .map(|(_, thousands, decimal)| NumberFormat::new(*thousands, *decimal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_lookup() {
        let table = BuiltinLocaleTable;
        assert_eq!(
            table.number_format_defaults_for("en"),
            Some(NumberFormat::new(",", "."))
        );
        assert_eq!(
            table.number_format_defaults_for("es"),
            Some(NumberFormat::new(".", ","))
        );
        assert_eq!(table.number_format_defaults_for("xx"), None);
    }

    #[test]
    fn test_fallback_matches_default_language() {
        assert_eq!(
            Some(fallback_number_format()),
            BuiltinLocaleTable.number_format_defaults_for(crate::types::DEFAULT_LANGUAGE)
        );
    }
}
