/// One row of a context window around a resolved line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRow {
    /// 1-based line number in the file.
    pub line_number: usize,
    pub text: String,
    pub is_center: bool,
}

/// Window of `radius` lines on each side of `center_line`, clipped to
/// `[1, lines.len()]`. Pure; printing is the caller's job.
pub fn render_context(lines: &[&str], center_line: usize, radius: usize) -> Vec<ContextRow> {
    if lines.is_empty() || center_line < 1 {
        return Vec::new();
    }

    let start = center_line.saturating_sub(radius).max(1);
    let end = (center_line + radius).min(lines.len());

    let mut rows = Vec::new();
    for n in start..=end {
        rows.push(ContextRow {
            line_number: n,
            text: lines[n - 1].to_string(),
            is_center: n == center_line,
        });
    }
    rows
}
