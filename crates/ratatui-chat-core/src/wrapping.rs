//! Word wrapping and measurement for bubble text.
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Wraps `text` to lines of at most `width` display columns.
///
/// Lines break at whitespace or after common punctuation; a word wider than `width` is split
/// hard. Explicit newlines are kept, and an empty text still yields one (empty) line.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let max_cols = width.max(1) as usize;
    let mut out: Vec<String> = Vec::new();

    for raw in text.split('\n') {
        let raw = normalize_tabs(raw.trim_end_matches('\r'));
        if raw.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_cols = 0usize;
        let mut last_soft_idx: Option<usize> = None;

        for ch in raw.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if line_cols.saturating_add(w) > max_cols {
                if let Some(split) = last_soft_idx.take() {
                    let (prefix, rest) = line.split_at(split);
                    out.push(prefix.trim_end().to_string());
                    line = rest.trim_start().to_string();
                    line_cols = UnicodeWidthStr::width(line.as_str());
                }
                // The carried word may still leave no room for a wide char.
                if line_cols.saturating_add(w) > max_cols && !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                    line_cols = 0;
                }
            }

            if line.is_empty() && ch.is_whitespace() {
                continue;
            }

            if ch.is_whitespace() {
                last_soft_idx = Some(line.len());
            } else if matches!(
                ch,
                ',' | ';' | '.' | ':' | ')' | ']' | '}' | '|' | '/' | '?' | '!' | '-'
            ) {
                last_soft_idx = Some(line.len() + ch.len_utf8());
            }

            line.push(ch);
            line_cols = UnicodeWidthStr::width(line.as_str());
        }

        out.push(line.trim_end().to_string());
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Width of the widest wrapped line and the number of lines.
pub fn measure_text(text: &str, width: u16) -> (u16, u32) {
    let lines = wrap_text(text, width);
    let w = lines
        .iter()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16;
    (w, lines.len().min(u32::MAX as usize) as u32)
}

fn normalize_tabs(s: &str) -> String {
    if s.contains('\t') {
        s.replace('\t', "    ")
    } else {
        s.to_string()
    }
}
