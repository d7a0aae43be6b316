//! Whitespace normalization applied to every rendered stack.

/// Trim every line and drop the ones left empty, joining the rest with `\n`.
///
/// Indentation is not preserved. The result carries no trailing newline.
pub fn normalize(rendered: &str) -> String {
    rendered
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
