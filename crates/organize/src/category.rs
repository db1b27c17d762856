//! Extension-to-category classification table
//!
//! The table is built once from a category → extension-list mapping and
//! stays immutable for the run. Classification is a pure lookup: the same
//! extension always lands in the same category, regardless of file name.

use ahash::AHashMap;
use std::path::Path;
use tracing::debug;

/// Reserved category for unmatched extensions
pub const OTHER_CATEGORY: &str = "other";

/// Immutable reverse mapping from lowercase extension (no dot) to category
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    map: AHashMap<String, String>,
}

impl ExtensionTable {
    /// Build the table from (category, extensions) pairs
    ///
    /// Extensions are normalized to lowercase without the leading dot.
    /// Every extension maps to exactly one category: the first registration
    /// wins and later duplicates are ignored.
    pub fn from_categories<I, S, E>(categories: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<E>)>,
        S: Into<String>,
        E: AsRef<str>,
    {
        let mut map = AHashMap::new();
        for (category, extensions) in categories {
            let category: String = category.into();
            for ext in &extensions {
                let key = ext.as_ref().trim_start_matches('.').to_lowercase();
                if key.is_empty() {
                    continue;
                }
                if let Some(existing) = map.get(&key) {
                    debug!(extension = %key, kept = %existing, ignored = %category, "duplicate extension registration");
                    continue;
                }
                map.insert(key, category.clone());
            }
        }
        Self { map }
    }

    /// The built-in category table
    pub fn default_table() -> Self {
        Self::from_categories([
            ("documents", vec!["pdf", "doc", "docx", "txt", "odt"]),
            ("images", vec!["jpg", "jpeg", "png", "gif", "bmp", "svg"]),
            ("videos", vec!["mp4", "avi", "mkv", "mov", "flv"]),
            ("audio", vec!["mp3", "wav", "flac", "aac", "ogg"]),
            ("archives", vec!["zip", "rar", "7z", "tar", "gz"]),
            ("spreadsheets", vec!["xls", "xlsx", "csv"]),
            ("code", vec!["py", "java", "js", "go", "cpp", "c", "h", "rs"]),
        ])
    }

    /// Classify a file name by its extension
    ///
    /// The extension is lowercased before lookup; files without an
    /// extension or with an unknown one classify as [`OTHER_CATEGORY`].
    pub fn classify(&self, file_name: &str) -> &str {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .map
                .get(&ext.to_lowercase())
                .map(String::as_str)
                .unwrap_or(OTHER_CATEGORY),
            None => OTHER_CATEGORY,
        }
    }

    /// Classify a path by its file name
    pub fn classify_path(&self, path: &Path) -> &str {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.classify(name))
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for ExtensionTable {
    fn default() -> Self {
        Self::default_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        let table = ExtensionTable::default_table();
        assert_eq!(table.classify("report.pdf"), "documents");
        assert_eq!(table.classify("photo.jpg"), "images");
        assert_eq!(table.classify("song.mp3"), "audio");
        assert_eq!(table.classify("data.csv"), "spreadsheets");
        assert_eq!(table.classify("main.rs"), "code");
    }

    #[test]
    fn test_classification_ignores_file_name() {
        let table = ExtensionTable::default_table();
        assert_eq!(table.classify("a.pdf"), table.classify("completely_different.pdf"));
    }

    #[test]
    fn test_case_insensitive_extension() {
        let table = ExtensionTable::default_table();
        assert_eq!(table.classify("report.PDF"), "documents");
        assert_eq!(table.classify("photo.JPeG"), "images");
    }

    #[test]
    fn test_unknown_extension_is_other() {
        let table = ExtensionTable::default_table();
        assert_eq!(table.classify("blob.xyz"), OTHER_CATEGORY);
    }

    #[test]
    fn test_no_extension_is_other() {
        let table = ExtensionTable::default_table();
        assert_eq!(table.classify("README"), OTHER_CATEGORY);
        assert_eq!(table.classify(".bashrc"), OTHER_CATEGORY);
    }

    #[test]
    fn test_dotted_config_entries_accepted() {
        let table = ExtensionTable::from_categories([("docs", vec![".pdf", "txt"])]);
        assert_eq!(table.classify("a.pdf"), "docs");
        assert_eq!(table.classify("a.txt"), "docs");
    }

    #[test]
    fn test_first_registration_wins() {
        let table = ExtensionTable::from_categories([
            ("documents", vec!["pdf"]),
            ("scans", vec!["pdf"]),
        ]);
        assert_eq!(table.classify("a.pdf"), "documents");
        assert_eq!(table.len(), 1);
    }
}
