use unicode_width::UnicodeWidthChar;

/// Formats a count with thousands separators: `1234567` -> `1,234,567`.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Compact form for axis labels: `950`, `1.2k`, `3.4M`.
pub fn format_compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{}", value.round() as u64)
    }
}

/// `-` for a missing metric.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Cuts `text` to at most `width` display columns, ending with `…` when cut.
/// Newlines are flattened to spaces.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let total: usize = flat.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return flat;
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in flat.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width - 1 {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
