//! Character reference lookup tables.
//!
//! The full HTML standard defines 2,231 named entities; we carry the common
//! ones plus the legacy no-semicolon forms. The lexer matches the longest
//! alphanumeric run after `&`, tries it with the trailing semicolon first,
//! then falls back to the legacy form, and finally leaves the `&` literal.

use std::collections::HashMap;
use std::sync::LazyLock;

/// The named character reference table.
/// Maps entity names (without the leading '&') to their replacement strings.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant entities
        ("amp;", "&"),
        ("amp", "&"), // Legacy (no semicolon)
        ("lt;", "<"),
        ("lt", "<"), // Legacy
        ("gt;", ">"),
        ("gt", ">"), // Legacy
        ("quot;", "\""),
        ("quot", "\""), // Legacy
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"), // Legacy
        // Common punctuation and symbols
        ("copy;", "\u{00A9}"),   // ©
        ("reg;", "\u{00AE}"),    // ®
        ("trade;", "\u{2122}"),  // ™
        ("sect;", "\u{00A7}"),   // §
        ("para;", "\u{00B6}"),   // ¶
        ("mdash;", "\u{2014}"),  // —
        ("ndash;", "\u{2013}"),  // –
        ("hellip;", "\u{2026}"), // …
        ("bull;", "\u{2022}"),   // •
        ("middot;", "\u{00B7}"), // ·
        ("dagger;", "\u{2020}"), // †
        ("lsquo;", "\u{2018}"),  // '
        ("rsquo;", "\u{2019}"),  // '
        ("ldquo;", "\u{201C}"),  // "
        ("rdquo;", "\u{201D}"),  // "
        ("laquo;", "\u{00AB}"),  // «
        ("raquo;", "\u{00BB}"),  // »
        // Currency
        ("cent;", "\u{00A2}"),  // ¢
        ("pound;", "\u{00A3}"), // £
        ("euro;", "\u{20AC}"),  // €
        ("yen;", "\u{00A5}"),   // ¥
        // Math symbols
        ("times;", "\u{00D7}"),  // ×
        ("divide;", "\u{00F7}"), // ÷
        ("plusmn;", "\u{00B1}"), // ±
        ("minus;", "\u{2212}"),  // −
        ("ne;", "\u{2260}"),     // ≠
        ("le;", "\u{2264}"),     // ≤
        ("ge;", "\u{2265}"),     // ≥
        ("deg;", "\u{00B0}"),    // °
        ("micro;", "\u{00B5}"),  // µ
        ("frac12;", "\u{00BD}"), // ½
        ("frac14;", "\u{00BC}"), // ¼
        ("frac34;", "\u{00BE}"), // ¾
        ("sup2;", "\u{00B2}"),   // ²
        ("sup3;", "\u{00B3}"),   // ³
        ("radic;", "\u{221A}"),  // √
        ("infin;", "\u{221E}"),  // ∞
        // Arrows
        ("larr;", "\u{2190}"), // ←
        ("rarr;", "\u{2192}"), // →
        ("uarr;", "\u{2191}"), // ↑
        ("darr;", "\u{2193}"), // ↓
        ("harr;", "\u{2194}"), // ↔
        // Greek letters (commonly used)
        ("alpha;", "\u{03B1}"),
        ("beta;", "\u{03B2}"),
        ("gamma;", "\u{03B3}"),
        ("delta;", "\u{03B4}"),
        ("theta;", "\u{03B8}"),
        ("lambda;", "\u{03BB}"),
        ("mu;", "\u{03BC}"),
        ("pi;", "\u{03C0}"),
        ("sigma;", "\u{03C3}"),
        ("omega;", "\u{03C9}"),
        ("Delta;", "\u{0394}"),
        ("Omega;", "\u{03A9}"),
        // Accented characters (common)
        ("Agrave;", "\u{00C0}"),
        ("Aacute;", "\u{00C1}"),
        ("Acirc;", "\u{00C2}"),
        ("Atilde;", "\u{00C3}"),
        ("Auml;", "\u{00C4}"),
        ("Aring;", "\u{00C5}"),
        ("AElig;", "\u{00C6}"),
        ("Ccedil;", "\u{00C7}"),
        ("Egrave;", "\u{00C8}"),
        ("Eacute;", "\u{00C9}"),
        ("Ntilde;", "\u{00D1}"),
        ("Ouml;", "\u{00D6}"),
        ("Uuml;", "\u{00DC}"),
        ("agrave;", "\u{00E0}"),
        ("aacute;", "\u{00E1}"),
        ("acirc;", "\u{00E2}"),
        ("atilde;", "\u{00E3}"),
        ("auml;", "\u{00E4}"),
        ("aring;", "\u{00E5}"),
        ("aelig;", "\u{00E6}"),
        ("ccedil;", "\u{00E7}"),
        ("egrave;", "\u{00E8}"),
        ("eacute;", "\u{00E9}"),
        ("ecirc;", "\u{00EA}"),
        ("euml;", "\u{00EB}"),
        ("igrave;", "\u{00EC}"),
        ("iacute;", "\u{00ED}"),
        ("ntilde;", "\u{00F1}"),
        ("ograve;", "\u{00F2}"),
        ("oacute;", "\u{00F3}"),
        ("ocirc;", "\u{00F4}"),
        ("ouml;", "\u{00F6}"),
        ("oslash;", "\u{00F8}"),
        ("ugrave;", "\u{00F9}"),
        ("uacute;", "\u{00FA}"),
        ("uuml;", "\u{00FC}"),
        ("szlig;", "\u{00DF}"),
        // Invisible and spacing characters
        ("ensp;", "\u{2002}"),
        ("emsp;", "\u{2003}"),
        ("thinsp;", "\u{2009}"),
        ("shy;", "\u{00AD}"),
        ("zwnj;", "\u{200C}"),
        ("zwj;", "\u{200D}"),
    ])
});

/// The reduced table used when full entity decoding is off but
/// mini-entity decoding is on: just the markup-significant five.
static MINI_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp;", "&"),
        ("amp", "&"),
        ("lt;", "<"),
        ("lt", "<"),
        ("gt;", ">"),
        ("gt", ">"),
        ("quot;", "\""),
        ("quot", "\""),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"),
    ])
});

/// Look up a named character reference in the full table.
///
/// The entity name should NOT include the leading '&' but SHOULD include
/// the trailing ';' when trying the semicolon form.
#[must_use]
pub fn lookup_entity(entity_name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(entity_name).copied()
}

/// Look up a named character reference in the mini table.
#[must_use]
pub fn lookup_mini_entity(entity_name: &str) -> Option<&'static str> {
    MINI_ENTITIES.get(entity_name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolon_and_legacy_forms_resolve() {
        assert_eq!(lookup_entity("amp;"), Some("&"));
        assert_eq!(lookup_entity("amp"), Some("&"));
        assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
    }

    #[test]
    fn unknown_entity_is_none() {
        assert_eq!(lookup_entity("notarealentity;"), None);
    }

    #[test]
    fn mini_table_is_a_strict_subset() {
        assert_eq!(lookup_mini_entity("lt;"), Some("<"));
        assert_eq!(lookup_mini_entity("copy;"), None);
        assert!(lookup_entity("copy;").is_some());
    }
}
