//! Legend label truncation and padding.

/// Visible width, in characters, that legend labels are fitted to.
pub const LEGEND_LABEL_WIDTH: usize = 16;

const HEAD_CHARS: usize = 6;
const ELLIPSIS: &str = "...";

/// Fit a series name to the legend column.
///
/// Names longer than 16 characters keep their first 6 and last 9 characters
/// around `...`; shorter names are right-padded with spaces to 16. Applying it
/// to its own output returns the same label.
pub fn truncate_label(text: &str) -> String {
    let len = text.chars().count();
    if len > LEGEND_LABEL_WIDTH {
        let tail = LEGEND_LABEL_WIDTH - (HEAD_CHARS + 1);
        let head: String = text.chars().take(HEAD_CHARS).collect();
        let last: String = text.chars().skip(len - tail).collect();
        format!("{head}{ELLIPSIS}{last}")
    } else {
        let mut out = String::with_capacity(text.len() + LEGEND_LABEL_WIDTH - len);
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', LEGEND_LABEL_WIDTH - len));
        out
    }
}
