//! Small filename helpers shared by the download and naming steps.

/// Make a string safe to use as a file name: filesystem-hostile characters
/// and spaces become underscores, runs of underscores collapse, and the
/// result is trimmed and truncated to `max_length`.
pub fn sanitize_filename(name: &str, max_length: usize) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let replace = matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' | '_');
        if replace {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let mut out: String = out.trim_matches('_').chars().take(max_length).collect();
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Zero-pad a track number to `width` digits.
pub fn format_track_number(n: u32, width: usize) -> String {
    format!("{n:0width$}")
}

/// Prefix width for a playlist of `total` items. Never less than two so the
/// inventory scan can rely on the two-or-more-digit convention.
pub fn digit_width(total: usize) -> usize {
    total.to_string().len().max(2)
}
