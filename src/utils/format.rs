use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a percentage with one decimal, e.g. "4.0%"
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Format a number of hours, trimming a trailing ".0"
pub fn format_hours(hours: f64) -> String {
    if hours == hours.floor() {
        format!("{}", hours as i64)
    } else {
        format!("{:.1}", hours)
    }
}

/// "45 min" or "45-50 min"
pub fn format_minutes_range(min: u32, max: u32) -> String {
    if min == max {
        format!("{} min", min)
    } else {
        format!("{}-{} min", min, max)
    }
}

/// Create a simple ASCII progress bar from a 0..=1 ratio
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `width` terminal columns, ending in "…" when cut.
/// Newlines are flattened to spaces.
pub fn truncate_width(s: &str, width: usize) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    if flat.width() <= width {
        return flat;
    }
    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad `s` with spaces to `width` terminal columns.
pub fn pad_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_and_hours() {
        assert_eq!(format_percent(4.0), "4.0%");
        assert_eq!(format_percent(100.0 / 3.0), "33.3%");
        assert_eq!(format_hours(18.0), "18");
        assert_eq!(format_hours(20.0 + 5.0 / 6.0), "20.8");
        assert_eq!(format_minutes_range(45, 50), "45-50 min");
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(2.0, 3), "███");
        assert_eq!(progress_bar(-1.0, 2), "░░");
    }

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_width("short", 10), "short");
        assert_eq!(truncate_width("abcdefgh", 5), "abcd…");
        // each CJK char is two columns wide
        assert_eq!(truncate_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_width("a\nb", 5), "a b");
        assert_eq!(pad_width("日本", 6), "日本  ");
    }
}
