//! `?search=` parameter handling for case-insensitive prefix matching.

/// Split a search string into terms on whitespace and commas.
///
/// NUL characters are stripped because PostgreSQL rejects them in text.
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .replace('\0', "")
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build an `ILIKE` pattern matching values that start with `term`.
///
/// `%`, `_` and `\` are escaped so they match literally.
pub fn prefix_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 1);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
