//! Noise filtering for mined specification candidates.
//!
//! Product pages ship their theme's CSS inline often enough that a naive
//! key/value miner happily reports `margin: 12px` as a product spec. The
//! CSS detector rejects those, with one carve-out: a *physical* measurement
//! (`Width: 24 in`) always survives, even when its key collides with a CSS
//! property name.

use std::sync::LazyLock;

use regex::Regex;

/// Common layout/style property names. Anchored, full-key match.
static CSS_PROP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^(
            width|height|min-width|max-width|min-height|max-height
            |margin(-(top|right|bottom|left))?
            |padding(-(top|right|bottom|left))?
            |color|background(-color|-image|-size)?
            |font(-size|-family|-weight|-style)?
            |border(-\w+)*
            |display|position|top|left|right|bottom|z-index
            |opacity|float|clear|overflow(-[xy])?
            |flex(-\w+)?|grid(-\w+)*|gap
            |line-height|letter-spacing|word-spacing
            |text-(align|transform|decoration|indent)
            |transform|transition|animation(-\w+)?
            |box-shadow|box-sizing|cursor|visibility|vertical-align|white-space
        )$",
    )
    .expect("valid CSS property regex")
});

/// Unit-bearing CSS value shapes: `12px`, `50%`, `1.5em`, `calc(...)`,
/// `var(--x)`, `!important`, hex colors, `rgb(...)`.
static CSS_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
            (^|[\s:(])-?\d+(\.\d+)?(px|vw|vh|em|rem|pt|ch|ex)\b
            |\d(\.\d+)?%($|[\s;])
            |calc\(
            |var\(--
            |!important
            |^\#[0-9a-f]{3,8}$
            |rgba?\(
        ",
    )
    .expect("valid CSS value regex")
});

/// Physical measurement shapes: a numeral followed by a real-world unit.
/// `24 in`, `183cm`, `6'`, `7 ft`, `72\"`, `250 lbs`.
static PHYSICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?ix)
            \d+(\.\d+)?\s*
            ( "|”|''|'
             |in\b|inch(es)?\b
             |cm\b|mm\b
             |ft\b|feet\b|foot\b
             |lbs?\b|pounds?\b|kg\b
             |gal(lons?)?\b|liters?\b|litres?\b
            )
        "#,
    )
    .expect("valid physical measurement regex")
});

/// Vocabulary gate for specification pairs mined out of free-text prose.
/// A prose `Key: Value` line only becomes a spec when the key talks about
/// something a product spec would.
static SPEC_VOCAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)\b(
            capacity|persons?|people|seater|seating
            |heaters?|heating|stoves?|fuel
            |power|voltage|volts?|watt(age)?s?|amp(erage|s)?|phase|electrical|breaker
            |dimensions?|size|width|height|depth|length|diameter|footprint
            |weight
            |materials?|wood|cedar|hemlock|spruce|pine|glass|steel
            |doors?|windows?|bench(es)?|roof|floor|walls?
            |temperature|humidity
            |warrant(y|ies)
            |assembly|installation
            |model|sku|type|style
            |lighting|chromotherapy|controls?|wi-?fi|bluetooth
        )\b",
    )
    .expect("valid spec vocabulary regex")
});

/// True when a mined `(key, value)` pair looks like CSS styling rather than
/// a product specification.
///
/// A value matching a physical-measurement shape is never noise, even when
/// the key is a CSS property name (`width: 24 in` is a real spec).
#[must_use]
pub fn is_css_noise(key: &str, value: &str) -> bool {
    if PHYSICAL_RE.is_match(value) {
        return false;
    }
    CSS_PROP_RE.is_match(key.trim()) || CSS_VALUE_RE.is_match(value.trim())
}

/// True when `key` belongs to the specifications vocabulary used to gate
/// prose-mined pairs.
#[must_use]
pub fn is_spec_vocab_key(key: &str) -> bool {
    SPEC_VOCAB_RE.is_match(key)
}

/// Longest plausible specification key, in characters and words.
const MAX_KEY_LEN: usize = 64;
const MAX_KEY_WORDS: usize = 8;

/// Splits a `"Key: Value"` / `"Key – Value"` / `"Key - Value"` line into a
/// trimmed pair. Returns `None` when the line has no separator, either side
/// is empty, or the key side is too long to be a label.
#[must_use]
pub fn split_kv(line: &str) -> Option<(String, String)> {
    // First matching separator wins; the en/em dash forms require
    // surrounding context to avoid splitting hyphenated words.
    let (key, value) = split_once_any(line)?;
    let key = key.trim().trim_end_matches(':').trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    if key.len() > MAX_KEY_LEN || key.split_whitespace().count() > MAX_KEY_WORDS {
        return None;
    }
    Some((key.to_owned(), value.to_owned()))
}

fn split_once_any(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':');
    let en_dash = line.find(" – ");
    let em_dash = line.find(" — ");
    let hyphen = line.find(" - ");

    let mut best: Option<(usize, usize)> = None; // (byte index, separator len)
    for cand in [
        colon.map(|i| (i, ':'.len_utf8())),
        en_dash.map(|i| (i, " – ".len())),
        em_dash.map(|i| (i, " — ".len())),
        hyphen.map(|i| (i, " - ".len())),
    ]
    .into_iter()
    .flatten()
    {
        best = match best {
            Some(b) if b.0 <= cand.0 => Some(b),
            _ => Some(cand),
        };
    }

    let (idx, sep_len) = best?;
    Some((&line[..idx], &line[idx + sep_len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_css_key_with_css_value() {
        assert!(is_css_noise("margin", "12px"));
        assert!(is_css_noise("padding-top", "1.5em"));
        assert!(is_css_noise("z-index", "100"));
    }

    #[test]
    fn rejects_css_value_under_innocent_key() {
        assert!(is_css_noise("container", "calc(100% - 20px)"));
        assert!(is_css_noise("accent", "#ff6600"));
        assert!(is_css_noise("tint", "rgba(0, 0, 0, 0.5)"));
    }

    #[test]
    fn physical_measurement_survives_css_looking_key() {
        assert!(!is_css_noise("width", "24 in"));
        assert!(!is_css_noise("height", "75\""));
        assert!(!is_css_noise("Height", "190 cm"));
        assert!(!is_css_noise("depth", "6 ft"));
        assert!(!is_css_noise("weight", "250 lbs"));
    }

    #[test]
    fn ordinary_spec_pair_is_not_noise() {
        assert!(!is_css_noise("Capacity", "2 Person"));
        assert!(!is_css_noise("Voltage", "240V"));
        assert!(!is_css_noise("Material", "Canadian Hemlock"));
    }

    #[test]
    fn css_percentage_value_is_noise() {
        assert!(is_css_noise("humidity-bar", "50%;"));
    }

    #[test]
    fn vocab_accepts_spec_keys() {
        assert!(is_spec_vocab_key("Capacity"));
        assert!(is_spec_vocab_key("Heater Power"));
        assert!(is_spec_vocab_key("Exterior Dimensions"));
        assert!(is_spec_vocab_key("warranty period"));
    }

    #[test]
    fn vocab_rejects_prose_keys() {
        assert!(!is_spec_vocab_key("Our promise to you"));
        assert!(!is_spec_vocab_key("Note"));
        assert!(!is_spec_vocab_key("https"));
    }

    #[test]
    fn split_kv_colon() {
        assert_eq!(
            split_kv("Capacity: 2 Person"),
            Some(("Capacity".to_owned(), "2 Person".to_owned()))
        );
    }

    #[test]
    fn split_kv_en_dash() {
        assert_eq!(
            split_kv("Voltage – 240V"),
            Some(("Voltage".to_owned(), "240V".to_owned()))
        );
    }

    #[test]
    fn split_kv_prefers_earliest_separator() {
        // "Heater: 6kW - included" must split at the colon, not the hyphen.
        assert_eq!(
            split_kv("Heater: 6kW - included"),
            Some(("Heater".to_owned(), "6kW - included".to_owned()))
        );
    }

    #[test]
    fn split_kv_rejects_separator_free_text() {
        assert!(split_kv("Just a plain sentence").is_none());
    }

    #[test]
    fn split_kv_rejects_empty_sides() {
        assert!(split_kv(": value only").is_none());
        assert!(split_kv("Key only:").is_none());
    }

    #[test]
    fn split_kv_rejects_overlong_key() {
        let line = format!("{} : value", "word ".repeat(12));
        assert!(split_kv(&line).is_none());
    }

    #[test]
    fn split_kv_does_not_split_hyphenated_words() {
        assert!(split_kv("far-infrared sauna blanket").is_none());
    }
}
