use super::decoder::RawImportRow;
use crate::shared::rich_text::sanitize_markup;
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_product::{ProductCondition, ProductDraft, RichText};
use contracts::usecases::u501_import_catalog::{RowError, RowErrorKind};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Maps one decoded row to a product draft, or rejects the row
pub fn normalize(
    row: &RawImportRow,
    name_to_id: &HashMap<String, CategoryId>,
) -> Result<ProductDraft, RowError> {
    let name = non_blank(row.get("name")).ok_or_else(|| RowError {
        row: row.row,
        kind: RowErrorKind::MissingRequiredField("name".to_string()),
    })?;

    let specs = match non_blank(row.get("specs")) {
        Some(markup) => RichText::new(sanitize_markup(markup)),
        None => RichText::empty(),
    };

    let category_id = non_blank(row.get("category"))
        .and_then(|category| name_to_id.get(&Category::match_key(category)).copied());

    Ok(ProductDraft {
        name: name.to_string(),
        specs,
        price: parse_price(row.get("price")),
        condition: row
            .get("condition")
            .map(ProductCondition::from_loose)
            .unwrap_or_default(),
        category_id,
        image_url: non_blank(row.get("image_url")).map(str::to_string),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Decimal price; unparsable or negative values count as unknown
pub fn parse_price(raw: Option<&str>) -> Option<Decimal> {
    let text = non_blank(raw)?;
    let value = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()?;
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    Some(value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawImportRow {
        let fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawImportRow::new(7, fields)
    }

    #[test]
    fn test_full_row() {
        let laptops = CategoryId::new_v4();
        let map = HashMap::from([("laptops".to_string(), laptops)]);
        let draft = normalize(
            &row(&[
                ("name", "  Dell 3420 "),
                ("specs", "<p>i5 <script>x()</script></p>"),
                ("price", " 45000 "),
                ("condition", "Refurbished"),
                ("category", "LAPTOPS"),
                ("image_url", "https://img/1.jpg"),
                ("stock", "12"),
            ]),
            &map,
        )
        .unwrap();

        assert_eq!(draft.name, "Dell 3420");
        assert_eq!(draft.specs.markup(), "<p>i5 </p>");
        assert_eq!(draft.price, Some(Decimal::new(45000, 0)));
        assert_eq!(draft.condition, ProductCondition::Refurbished);
        assert_eq!(draft.category_id, Some(laptops));
        assert_eq!(draft.image_url.as_deref(), Some("https://img/1.jpg"));
    }

    #[test]
    fn test_defaults_for_sparse_row() {
        let draft = normalize(&row(&[("name", "Mouse"), ("category", "Unknown")]), &HashMap::new())
            .unwrap();

        assert!(draft.specs.is_empty());
        assert_eq!(draft.price, None);
        assert_eq!(draft.condition, ProductCondition::New);
        assert_eq!(draft.category_id, None);
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn test_missing_name_is_row_error() {
        let error = normalize(&row(&[("name", "   "), ("price", "10")]), &HashMap::new())
            .unwrap_err();
        assert_eq!(error.row, 7);
        assert_eq!(error.kind, RowErrorKind::MissingRequiredField("name".into()));

        assert!(normalize(&row(&[("price", "10")]), &HashMap::new()).is_err());
    }

    #[test]
    fn test_unknown_condition_defaults_to_new() {
        let draft = normalize(&row(&[("name", "A"), ("condition", "used")]), &HashMap::new())
            .unwrap();
        assert_eq!(draft.condition, ProductCondition::New);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(Some("1200.50")), Some(Decimal::new(120050, 2)));
        assert_eq!(parse_price(Some("4.5e4")), Some(Decimal::new(45000, 0)));
        assert_eq!(parse_price(Some("0")), Some(Decimal::ZERO));
        assert_eq!(parse_price(Some("-5")), None);
        assert_eq!(parse_price(Some("45,000")), None);
        assert_eq!(parse_price(Some("call us")), None);
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_price(None), None);
    }
}
