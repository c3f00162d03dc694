//! Utility functions for visualization: locale mapping and tick label formatting.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Decimal places needed to tell ticks `step` apart (0 for whole steps).
pub fn tick_precision(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Format a tick value with the locale's grouping and decimal separators.
///
/// Decimals come from float formatting; only the integer part is grouped, so
/// any precision is safe.
pub fn format_tick(v: f64, precision: usize, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let digits = format!("{:.*}", precision, v.abs());
    let (int_str, frac_str) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut out = String::new();
    if v < 0.0 && digits.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        out.push('−');
    }
    match int_str.parse::<u64>() {
        Ok(n) => out.push_str(&n.to_formatted_string(locale)),
        Err(_) => out.push_str(int_str),
    }
    if !frac_str.is_empty() {
        out.push(dec_sep);
        out.push_str(frac_str);
    }
    out
}
