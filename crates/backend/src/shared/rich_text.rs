use contracts::domain::a002_product::RichText;

// ============================================================================
// Rich-text specifications
// ============================================================================

/// Sanitizes product specification markup.
///
/// Keeps the tags produced by the admin rich-text editor; drops scripts,
/// event handler attributes and `javascript:` URIs.
pub fn sanitize_markup(html: &str) -> String {
    ammonia::Builder::new()
        .tags(maplit::hashset![
            "p", "br", "span", "strong", "em", "b", "i", "u", "s",
            "h1", "h2", "h3", "h4", "blockquote", "pre", "code",
            "ul", "ol", "li", "sub", "sup", "a",
        ])
        .generic_attributes(maplit::hashset!["class", "title"])
        .clean(html)
        .to_string()
}

/// Plain-text projection of rich text: tags removed, entities decoded,
/// whitespace collapsed.
pub fn plain_text(specs: &RichText) -> String {
    markup_to_text(specs.markup())
}

pub fn markup_to_text(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    // keep words of adjacent blocks apart: "<p>8GB</p><p>SSD</p>" -> "8GB SSD"
    let spaced = markup.replace("</", " </").replace("<br", " <br");

    let stripped = ammonia::Builder::empty()
        .clean_content_tags(maplit::hashset!["script", "style"])
        .clean(&spaced)
        .to_string();

    let decoded = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of the plain text, with an ellipsis when cut
pub fn summary(specs: &RichText, max_chars: usize) -> String {
    let text = plain_text(specs);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
