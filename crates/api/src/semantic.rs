use crate::hierarchy::TypeHierarchy;
use crate::models::SymbolQuery;

/// Translates community-namespace symbols into canonical names.
///
/// Translation is fail-soft: `None` means "keep the original text".
pub trait SymbolTranslator {
    fn translate(&self, query: &SymbolQuery, hierarchy: &dyn TypeHierarchy) -> Option<String>;

    /// Translated text, or the query's own text when nothing is known.
    fn translate_or_original(&self, query: &SymbolQuery, hierarchy: &dyn TypeHierarchy) -> String {
        self.translate(query, hierarchy)
            .unwrap_or_else(|| query.original_text().to_string())
    }
}
