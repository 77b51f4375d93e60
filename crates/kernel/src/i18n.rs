//! Interface string lookup.
//!
//! Only pass-through lookup is provided: a translator maps a source string to
//! its display form and falls back to the source when it has no entry.

use std::collections::HashMap;

/// Source-string translation lookup.
pub trait Translator: Send + Sync {
    /// Translate a source string. Must always return a string.
    fn translate(&self, source: &str) -> String;
}

/// Translator that returns every source string unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Translator for PassThrough {
    fn translate(&self, source: &str) -> String {
        source.to_string()
    }
}

impl Translator for HashMap<String, String> {
    fn translate(&self, source: &str) -> String {
        self.get(source)
            .cloned()
            .unwrap_or_else(|| source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        assert_eq!(PassThrough.translate("Warning"), "Warning");
    }

    #[test]
    fn test_table_falls_back_to_source() {
        let table: HashMap<String, String> =
            [("Warning".to_string(), "Avertissement".to_string())].into();
        assert_eq!(table.translate("Warning"), "Avertissement");
        assert_eq!(table.translate("Error"), "Error");
    }
}
