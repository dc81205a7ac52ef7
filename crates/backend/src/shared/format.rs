use rust_decimal::Decimal;

pub const CONTACT_FOR_PRICE: &str = "Contact for Price";

/// Formats a count with thousands separators
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Storefront price label: rupee amount with Indian digit grouping
/// (`₹1,23,456.5`), or "Contact for Price" when the price is unknown.
pub fn price_label(price: Option<Decimal>) -> String {
    let Some(price) = price else {
        return CONTACT_FOR_PRICE.to_string();
    };

    let text = price.round_dp(2).normalize().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut label = format!("₹{}", group_indian(&integer));
    if let Some(fraction) = fraction {
        label.push('.');
        label.push_str(&fraction);
    }
    label
}

/// 1234567 -> 12,34,567: last three digits, then pairs
fn group_indian(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{}{},{}", sign, groups.join(","), tail)
}
