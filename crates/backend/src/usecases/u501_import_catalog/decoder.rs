use super::error::ImportError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use contracts::usecases::u501_import_catalog::ImportFormat;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Cursor;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One decoded data row: header name -> cell text. Empty cells are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImportRow {
    /// 1-based position among the file's data rows
    pub row: usize,
    fields: HashMap<String, String>,
}

impl RawImportRow {
    pub fn new(row: usize, fields: HashMap<String, String>) -> Self {
        Self { row, fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Decodes an uploaded file into rows. The format is picked from the
/// extension alone; contents are never sniffed.
pub fn decode(bytes: &[u8], extension: &str) -> Result<Vec<RawImportRow>, ImportError> {
    let format = ImportFormat::from_extension(extension)
        .ok_or_else(|| ImportError::UnsupportedFormat(extension.to_string()))?;

    let rows = match format {
        ImportFormat::TabularText => decode_tabular(bytes)?,
        ImportFormat::ObjectArray => decode_object_array(bytes)?,
        ImportFormat::Spreadsheet => decode_spreadsheet(bytes)?,
    };

    if rows.is_empty() {
        return Err(ImportError::EmptyDataset);
    }
    tracing::debug!("Decoded {} rows as {:?}", rows.len(), format);
    Ok(rows)
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

fn decode_tabular(bytes: &[u8]) -> Result<Vec<RawImportRow>, ImportError> {
    let text = std::str::from_utf8(strip_bom(bytes))
        .map_err(|e| ImportError::MalformedInput(format!("file is not valid UTF-8: {}", e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::MalformedInput(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::MalformedInput(e.to_string()))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(rows_from_grid(header, records))
}

fn decode_object_array(bytes: &[u8]) -> Result<Vec<RawImportRow>, ImportError> {
    let value: Value = serde_json::from_slice(strip_bom(bytes))
        .map_err(|e| ImportError::MalformedInput(format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(ImportError::MalformedInput(
            "expected a JSON array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => {
                let fields = map
                    .into_iter()
                    .filter_map(|(key, value)| json_cell(value).map(|text| (key, text)))
                    .collect();
                Ok(RawImportRow::new(i + 1, fields))
            }
            other => Err(ImportError::MalformedInput(format!(
                "element {} is not a record: {}",
                i + 1,
                other
            ))),
        })
        .collect()
}

/// Scalars become their text, null is absent, nested values keep their JSON form
fn json_cell(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn decode_spreadsheet(bytes: &[u8]) -> Result<Vec<RawImportRow>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::MalformedInput(format!("cannot open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::MalformedInput("workbook has no sheets".to_string()))?
        .map_err(|e| ImportError::MalformedInput(format!("cannot read first sheet: {}", e)))?;

    let mut grid = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect::<Vec<String>>());

    let Some(header) = grid.next() else {
        return Ok(Vec::new());
    };
    Ok(rows_from_grid(header, grid))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Zips each record with the header. Records with only blank cells are
/// dropped, extra cells past the header are ignored.
fn rows_from_grid<I>(header: Vec<String>, records: I) -> Vec<RawImportRow>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    records
        .into_iter()
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .enumerate()
        .map(|(i, cells)| {
            let fields = header
                .iter()
                .zip(cells)
                .filter(|(key, value)| !key.is_empty() && !value.trim().is_empty())
                .map(|(key, value)| (key.clone(), value))
                .collect();
            RawImportRow::new(i + 1, fields)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows_keyed_by_header() {
        let csv = "name,price,category\nDell XPS,45000,Laptops\nHP Mouse,,Accessories\n";
        let rows = decode(csv.as_bytes(), "csv").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].get("name"), Some("Dell XPS"));
        assert_eq!(rows[0].get("price"), Some("45000"));
        assert_eq!(rows[1].get("price"), None);
        assert_eq!(rows[1].get("category"), Some("Accessories"));
    }

    #[test]
    fn test_csv_skips_blank_lines_and_bom() {
        let csv = "\u{FEFF}name,condition\n\nA,new\n , \nB,refurbished\n";
        let rows = decode(csv.as_bytes(), "CSV").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].get("condition"), Some("refurbished"));
    }

    #[test]
    fn test_csv_short_and_quoted_records() {
        let csv = "name,specs,price\n\"Lenovo, T480\",\"<p>i5</p>\"\nX\n";
        let rows = decode(csv.as_bytes(), "csv").unwrap();

        assert_eq!(rows[0].get("name"), Some("Lenovo, T480"));
        assert_eq!(rows[0].get("specs"), Some("<p>i5</p>"));
        assert_eq!(rows[0].get("price"), None);
        assert_eq!(rows[1].get("name"), Some("X"));
    }

    #[test]
    fn test_csv_header_only_is_empty_dataset() {
        let result = decode(b"name,price\n", "csv");
        assert!(matches!(result, Err(ImportError::EmptyDataset)));
    }

    #[test]
    fn test_csv_invalid_utf8_is_malformed() {
        let result = decode(&[b'n', b'a', 0xFF, b'\n', 0xFE], "csv");
        assert!(matches!(result, Err(ImportError::MalformedInput(_))));
    }

    #[test]
    fn test_json_scalars_become_text() {
        let json = r#"[
            {"name": "Dell", "price": 45000, "category": "Laptops", "image": null},
            {"name": "HP", "price": "1200.50", "featured": true}
        ]"#;
        let rows = decode(json.as_bytes(), "json").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("price"), Some("45000"));
        assert_eq!(rows[0].get("image"), None);
        assert_eq!(rows[1].get("price"), Some("1200.50"));
        assert_eq!(rows[1].get("featured"), Some("true"));
    }

    #[test]
    fn test_json_must_be_array_of_records() {
        assert!(matches!(
            decode(br#"{"name": "Dell"}"#, "json"),
            Err(ImportError::MalformedInput(_))
        ));
        assert!(matches!(
            decode(br#"[{"name": "Dell"}, 5]"#, "json"),
            Err(ImportError::MalformedInput(_))
        ));
        assert!(matches!(
            decode(b"[{\"name\": ", "json"),
            Err(ImportError::MalformedInput(_))
        ));
        assert!(matches!(decode(b"[]", "json"), Err(ImportError::EmptyDataset)));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let result = decode(b"name\nA\n", "txt");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_mislabeled_workbook_is_malformed() {
        let result = decode(b"name,price\nA,1\n", "xlsx");
        assert!(matches!(result, Err(ImportError::MalformedInput(_))));
    }

    fn two_sheet_workbook() -> Vec<u8> {
        use rust_xlsxwriter::Workbook;

        let mut workbook = Workbook::new();
        let stock = workbook.add_worksheet();
        stock.write_string(0, 0, "name").unwrap();
        stock.write_string(0, 1, "price").unwrap();
        stock.write_string(0, 2, "category").unwrap();
        stock.write_string(1, 0, "Dell 3420").unwrap();
        stock.write_number(1, 1, 45000.0).unwrap();
        stock.write_string(1, 2, "Laptops").unwrap();
        stock.write_string(3, 0, "HP").unwrap();
        stock.write_number(3, 1, 1200.5).unwrap();

        let archive = workbook.add_worksheet();
        archive.write_string(0, 0, "name").unwrap();
        archive.write_string(1, 0, "Old stock").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_workbook_reads_first_sheet_only() {
        let rows = decode(&two_sheet_workbook(), "xlsx").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Dell 3420"));
        assert_eq!(rows[0].get("price"), Some("45000"));
        assert_eq!(rows[0].get("category"), Some("Laptops"));
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].get("name"), Some("HP"));
        assert_eq!(rows[1].get("price"), Some("1200.5"));
        assert_eq!(rows[1].get("category"), None);
        assert!(rows.iter().all(|r| r.get("name") != Some("Old stock")));
    }

    #[test]
    fn test_grid_ignores_cells_without_header() {
        let rows = rows_from_grid(
            vec!["name".into(), " ".into()],
            vec![vec!["A".into(), "orphan".into(), "extra".into()]],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[0].get(""), None);
    }
}
