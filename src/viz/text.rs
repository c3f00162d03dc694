//! Text measurement and truncation.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    (text.chars().count() as f64 * font_px * 0.60).ceil()
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: f64, max_px: f64) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let mut next = out.clone();
        next.push(ch);
        next.push('…');
        if estimate_text_width_px(&next, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    if out.is_empty() {
        return String::new();
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("France", 10.0, 100.0), "France");
    }

    #[test]
    fn long_text_gets_one_ellipsis() {
        // 6px per char at 10px font: 60px fits 10 glyphs including the ellipsis.
        let t = truncate_to_width("Bosnia and Herzegovina", 10.0, 60.0);
        assert_eq!(t, "Bosnia an…");
        assert!(estimate_text_width_px(&t, 10.0) <= 60.0);
    }
}
