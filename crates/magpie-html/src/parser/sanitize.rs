//! Tag and attribute name sanitization.
//!
//! Real-world markup carries names the output tree must not take at face
//! value: namespace prefixes and `xmlns` declarations (which XML-aware
//! consumers would interpret structurally), names starting with digits,
//! comments embedded inside tags, and duplicate attributes. The functions
//! here normalize all of that. They are pure apart from the caller-owned
//! `xmlns` rename counter, which is local to one parse call.

use magpie_dom::Attribute;

use crate::lexer::RawAttribute;

/// Normalize a raw tag name.
///
/// Strips a single leading `?` (processing-instruction marker, as in
/// `<?xml`), then drops any namespace prefix by keeping only the substring
/// after the last `:`.
#[must_use]
pub fn clean_tag_name(raw: &str) -> String {
    let name = raw.strip_prefix('?').unwrap_or(raw);
    match name.rfind(':') {
        Some(idx) => name[idx + 1..].to_string(),
        None => name.to_string(),
    }
}

/// Normalize a raw attribute name, or drop the attribute entirely.
///
/// Returns `None` for names that are empty or start with a digit. An
/// `xmlns` declaration (matched case-insensitively) is renamed to
/// `xmlns_<counter>`, incrementing the counter; an `xmlns:<ns>` prefix
/// becomes `xmlns_<ns>`. Everything else gets a single trailing `"`
/// trimmed and any remaining `:` replaced with `_`, so no attribute can
/// act as a namespace declaration downstream.
#[must_use]
pub fn clean_attribute_name(raw: &str, xmlns_counter: &mut usize) -> Option<String> {
    if raw.is_empty() || raw.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if raw.eq_ignore_ascii_case("xmlns") {
        let name = format!("xmlns_{xmlns_counter}");
        *xmlns_counter += 1;
        return Some(name);
    }
    let renamed = match raw.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("xmlns:") => {
            format!("xmlns_{}", &raw[6..])
        }
        _ => raw.to_string(),
    };
    let trimmed = renamed.strip_suffix('"').unwrap_or(&renamed);
    Some(trimmed.replace(':', "_"))
}

/// Collapse duplicate attributes, failing on conflicting values.
///
/// Groups by (already sanitized) name. A group whose values are all
/// identical collapses to one attribute, re-appended at the end of the
/// list; a group with differing values returns the conflicting name as
/// the error.
///
/// # Errors
///
/// Returns the name of the first attribute that appeared more than once
/// with differing values.
pub fn resolve_duplicates(attrs: Vec<Attribute>) -> Result<Vec<Attribute>, String> {
    let mut duplicated: Vec<String> = Vec::new();
    for (i, attr) in attrs.iter().enumerate() {
        if attrs[..i].iter().any(|a| a.name == attr.name) && !duplicated.contains(&attr.name) {
            duplicated.push(attr.name.clone());
        }
    }
    if duplicated.is_empty() {
        return Ok(attrs);
    }
    for name in &duplicated {
        let mut values = attrs.iter().filter(|a| &a.name == name).map(|a| &a.value);
        let first = values.next();
        if values.any(|v| Some(v) != first) {
            return Err(name.clone());
        }
    }
    let mut resolved: Vec<Attribute> = attrs
        .iter()
        .filter(|a| !duplicated.contains(&a.name))
        .cloned()
        .collect();
    for name in &duplicated {
        if let Some(survivor) = attrs.iter().find(|a| &a.name == name) {
            resolved.push(survivor.clone());
        }
    }
    Ok(resolved)
}

/// Sanitize a tag's raw attribute list.
///
/// Applies, in order: the inline-comment defense (a slot named `<!--`
/// skips everything up to and including the first slot named `--` or
/// `-->`, since a comment embedded inside a tag lexes as attributes), the
/// lone-`?` skip (the trailing `?` of `<?xml ... ?>`), per-name cleanup
/// via [`clean_attribute_name`], and duplicate resolution.
///
/// # Errors
///
/// Returns the conflicting attribute name if duplicates carry differing
/// values.
pub fn sanitize_attributes(
    raw: &[RawAttribute],
    xmlns_counter: &mut usize,
) -> Result<Vec<Attribute>, String> {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let attr = &raw[i];
        if attr.name == "<!--" {
            while i < raw.len() && !matches!(raw[i].name.as_str(), "--" | "-->") {
                i += 1;
            }
            i += 1; // past the close marker, when one exists
            continue;
        }
        if attr.name == "?" && attr.value.is_empty() {
            i += 1;
            continue;
        }
        if let Some(name) = clean_attribute_name(&attr.name, xmlns_counter) {
            cleaned.push(Attribute {
                name,
                value: attr.value.clone(),
            });
        }
        i += 1;
    }
    resolve_duplicates(cleaned)
}

/// Classify an unnamed raw tag into a placeholder element name.
///
/// The lexer reports doctypes, bracket-conditional comments, template
/// directives, and short comments as tags with an empty name; this looks
/// at the raw source form and names the placeholder to emit. `None` means
/// the form is unrecognized and the token should be discarded.
#[must_use]
pub fn classify_unnamed(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw
        .get(..9)
        .is_some_and(|p| p.eq_ignore_ascii_case("<!doctype"))
    {
        return Some("doctype");
    }
    // e.g. "<![if !supportEmptyParas]>"
    if raw.starts_with("<![") && raw.ends_with("]>") {
        return Some("removed_conditional_block");
    }
    // e.g. "<%@ Page Language=... %>"
    if raw.starts_with("<%") && raw.ends_with("%>") {
        return Some("removed_server_directive");
    }
    // e.g. "<!-Extra_Images->"
    if raw.starts_with("<!-") && raw.ends_with("->") {
        return Some("removed_short_comment");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_priority_is_doctype_first() {
        // "<!-...->" also matches the short-comment shape; doctype wins.
        assert_eq!(classify_unnamed("<!DOCTYPE html>"), Some("doctype"));
        assert_eq!(
            classify_unnamed("<![if !vml]>"),
            Some("removed_conditional_block")
        );
        assert_eq!(
            classify_unnamed("<%@ Register %>"),
            Some("removed_server_directive")
        );
        assert_eq!(
            classify_unnamed("<!-Extra_Images->"),
            Some("removed_short_comment")
        );
        assert_eq!(classify_unnamed("<br <br"), None);
        assert_eq!(classify_unnamed(""), None);
    }
}
