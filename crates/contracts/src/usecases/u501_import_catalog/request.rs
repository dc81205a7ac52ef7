use serde::{Deserialize, Serialize};

/// Shape of an uploaded import file, chosen once from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    /// Comma-delimited text, first row is the header
    TabularText,
    /// JSON array of key/value records
    ObjectArray,
    /// Workbook, first sheet only, first row is the header
    Spreadsheet,
}

impl ImportFormat {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &["csv", "json", "xlsx", "xls"];

    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim().trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "csv" => Some(ImportFormat::TabularText),
            "json" => Some(ImportFormat::ObjectArray),
            "xlsx" | "xls" => Some(ImportFormat::Spreadsheet),
            _ => None,
        }
    }

    /// Extension of a file name, without the dot
    pub fn extension_of(file_name: &str) -> &str {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_selected_by_extension_only() {
        assert_eq!(ImportFormat::from_extension("CSV"), Some(ImportFormat::TabularText));
        assert_eq!(ImportFormat::from_extension(".json"), Some(ImportFormat::ObjectArray));
        assert_eq!(ImportFormat::from_extension("xls"), Some(ImportFormat::Spreadsheet));
        assert_eq!(ImportFormat::from_extension("xlsx"), Some(ImportFormat::Spreadsheet));
        assert_eq!(ImportFormat::from_extension("txt"), None);
        assert_eq!(ImportFormat::from_extension(""), None);
    }

    #[test]
    fn test_extension_of_takes_last_segment() {
        assert_eq!(ImportFormat::extension_of("stock.2024.xlsx"), "xlsx");
        assert_eq!(ImportFormat::extension_of("README"), "");
    }
}
