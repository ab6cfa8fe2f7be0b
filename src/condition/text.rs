//! Small string helpers around raw condition text

/// Remove a surrounding `${{ ... }}` wrapper, if present, and trim.
pub fn strip_expression_wrapper(expression: &str) -> &str {
    let expr = expression.trim();
    match expr
        .strip_prefix("${{")
        .and_then(|rest| rest.strip_suffix("}}"))
    {
        Some(inner) => inner.trim(),
        None => expr,
    }
}

/// Collapse newlines, tabs and runs of spaces so a multi-line expression
/// compares equal to its single-line form.
pub fn normalize_for_comparison(expression: &str) -> String {
    expression.split_whitespace().collect::<Vec<_>>().join(" ")
}
