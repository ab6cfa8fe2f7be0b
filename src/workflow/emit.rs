// SPDX-License-Identifier: MIT

//! Placement of rendered conditions into YAML job definitions

use crate::condition::{break_long_expression, needs_wrapping, ConditionNode, WrapConfig};

/// Write `if: |` followed by every rendered line, each prefixed by `indent`
pub fn render_condition_as_if(
    out: &mut String,
    condition: &ConditionNode,
    key_indent: &str,
    indent: &str,
) {
    out.push_str(&format!("{}if: |\n", key_indent));
    for line in condition.render().split('\n') {
        out.push_str(&format!("{}{}\n", indent, line));
    }
}

/// Write a job's `if:` inline, or as a folded block when it is multi-line
/// or longer than the configured width. An empty condition writes nothing.
pub fn write_job_if(
    out: &mut String,
    condition: &str,
    key_indent: &str,
    indent: &str,
    config: &WrapConfig,
) {
    if condition.is_empty() {
        return;
    }

    if !needs_wrapping(condition, config) {
        out.push_str(&format!("{}if: {}\n", key_indent, condition));
        return;
    }

    out.push_str(&format!("{}if: >\n", key_indent));
    let lines: Vec<String> = if condition.contains('\n') {
        condition
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        break_long_expression(condition, config)
    };
    for line in lines {
        out.push_str(&format!("{}{}\n", indent, line.trim()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::builders::{disjunction, event_type_equals, expression_with_description};

    #[test]
    fn test_render_condition_as_if() {
        let condition = disjunction(
            true,
            vec![
                expression_with_description("github.event_name == 'issues'", "Issues"),
                event_type_equals("push"),
            ],
        );
        let mut out = String::new();
        render_condition_as_if(&mut out, &condition, "    ", "      ");
        assert_eq!(
            out,
            "    if: |\n      # Issues\n      github.event_name == 'issues' ||\n      github.event_name == 'push'\n"
        );
    }

    #[test]
    fn test_short_condition_inline() {
        let mut out = String::new();
        write_job_if(
            &mut out,
            "github.event_name == 'push'",
            "    ",
            "      ",
            &WrapConfig::default(),
        );
        assert_eq!(out, "    if: github.event_name == 'push'\n");
    }

    #[test]
    fn test_empty_condition_writes_nothing() {
        let mut out = String::new();
        write_job_if(&mut out, "", "    ", "      ", &WrapConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_long_condition_folded() {
        let mut out = String::new();
        let condition =
            "github.event_name == 'issues' || github.event_name == 'push' || github.ref == 'main'";
        write_job_if(&mut out, condition, "    ", "      ", &WrapConfig::new(30, 15));
        assert_eq!(
            out,
            "    if: >\n      github.event_name == 'issues' ||\n      github.event_name == 'push' ||\n      github.ref == 'main'\n"
        );
    }

    #[test]
    fn test_multiline_condition_keeps_its_lines() {
        let mut out = String::new();
        write_job_if(&mut out, "a ||\n\n  b", "  ", "    ", &WrapConfig::default());
        assert_eq!(out, "  if: >\n    a ||\n    b\n");
    }
}
