//! Parsing of the entity-declaration comment blocks in the dictionary header
//!
//! The header carries blocks of the form
//!
//! ```text
//! <!-- <dial> (dialect) entities -->
//! <!ENTITY hob "Hokkaido-ben">
//! <!ENTITY ksb "Kansai-ben">
//! ```
//!
//! terminated by the next comment marker line. The declarations are recorded
//! as metadata in an [`crate::model::EntityTable`]; they are never expanded
//! into field values.

/// Parse a category declaration from a comment line
///
/// Returns the tag code named inside `<...>` and a human-readable category
/// name (the parenthesized text when present, otherwise the code). Comment
/// lines without an embedded `<name>` marker are structural noise.
pub fn parse_category_header(line: &str) -> Option<(String, String)> {
    let inner = line.trim().strip_prefix("<!--")?;
    let inner = inner.strip_suffix("-->").unwrap_or(inner).trim();

    let start = inner.find('<')?;
    let end = inner[start..].find('>')? + start;
    let code = inner[start + 1..end].trim();
    if code.is_empty() {
        return None;
    }

    let name = match (inner.find('('), inner.find(')')) {
        (Some(open), Some(close)) if close > open => inner[open + 1..close].trim(),
        _ => code,
    };

    Some((code.to_string(), name.to_string()))
}

/// Parse one `<!ENTITY code "expansion">` declaration line
pub fn parse_entity_decl(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix("<!ENTITY ")?;
    let rest = rest.strip_suffix('>').unwrap_or(rest);

    let (code, expansion) = rest.split_once(' ')?;
    let expansion = expansion
        .trim()
        .trim_matches('"');

    Some((code.to_string(), expansion.to_string()))
}

/// True for lines that open a comment block
pub fn is_comment(line: &str) -> bool {
    line.contains("<!--")
}

/// True for lines that close a comment block
pub fn closes_comment(line: &str) -> bool {
    line.contains("-->")
}
