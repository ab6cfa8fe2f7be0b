// SPDX-License-Identifier: MIT

//! Tree builders for recurring workflow conditions
//!
//! Everything here only assembles trees. Nothing renders or fails, so any
//! result can be nested inside another builder's output.

use super::ast::{CompareOp, ConditionNode};
use super::parser::parse;
use super::text::strip_expression_wrapper;
use crate::constants::{
    AGENT_JOB_NAME, EVENT_ACTION_PATH, EVENT_NAME_PATH, HEAD_REPO_FULL_NAME_PATH,
    ISSUE_LABELS_PATH, ISSUE_PULL_REQUEST_PATH, REF_PATH, REPOSITORY_PATH,
};
use crate::diagnostics::DiagnosticSink;

/// Events that can carry a reaction on the triggering item
const REACTION_EVENTS: [&str; 5] = [
    "issues",
    "issue_comment",
    "pull_request_review_comment",
    "discussion",
    "discussion_comment",
];

// ----------------------------------------------------------------------------
// Primitives
// ----------------------------------------------------------------------------

pub fn property_access(path: impl Into<String>) -> ConditionNode {
    ConditionNode::PropertyAccess(path.into())
}

pub fn string_literal(value: impl Into<String>) -> ConditionNode {
    ConditionNode::StringLiteral(value.into())
}

pub fn boolean_literal(value: bool) -> ConditionNode {
    ConditionNode::BooleanLiteral(value)
}

pub fn number_literal(raw: impl Into<String>) -> ConditionNode {
    ConditionNode::NumberLiteral(raw.into())
}

pub fn null_literal() -> ConditionNode {
    ConditionNode::expression("null")
}

pub fn expression_with_description(
    text: impl Into<String>,
    description: impl Into<String>,
) -> ConditionNode {
    ConditionNode::Expression {
        text: text.into(),
        description: Some(description.into()),
    }
}

pub fn and(left: ConditionNode, right: ConditionNode) -> ConditionNode {
    ConditionNode::And(Box::new(left), Box::new(right))
}

pub fn or(left: ConditionNode, right: ConditionNode) -> ConditionNode {
    ConditionNode::Or(Box::new(left), Box::new(right))
}

pub fn not(child: ConditionNode) -> ConditionNode {
    ConditionNode::Not(Box::new(child))
}

pub fn parentheses(child: ConditionNode) -> ConditionNode {
    ConditionNode::Parentheses(Box::new(child))
}

/// N-ary OR; `multiline` renders one term per line
pub fn disjunction(multiline: bool, terms: Vec<ConditionNode>) -> ConditionNode {
    ConditionNode::Disjunction { terms, multiline }
}

pub fn function_call(name: impl Into<String>, args: Vec<ConditionNode>) -> ConditionNode {
    ConditionNode::FunctionCall {
        name: name.into(),
        args,
    }
}

pub fn comparison(left: ConditionNode, op: CompareOp, right: ConditionNode) -> ConditionNode {
    ConditionNode::Comparison {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

pub fn equals(left: ConditionNode, right: ConditionNode) -> ConditionNode {
    comparison(left, CompareOp::Eq, right)
}

pub fn not_equals(left: ConditionNode, right: ConditionNode) -> ConditionNode {
    comparison(left, CompareOp::NotEq, right)
}

pub fn contains(array: ConditionNode, value: ConditionNode) -> ConditionNode {
    ConditionNode::Contains {
        array: Box::new(array),
        value: Box::new(value),
    }
}

pub fn ternary(
    condition: ConditionNode,
    if_true: ConditionNode,
    if_false: ConditionNode,
) -> ConditionNode {
    ConditionNode::Ternary {
        condition: Box::new(condition),
        if_true: Box::new(if_true),
        if_false: Box::new(if_false),
    }
}

// ----------------------------------------------------------------------------
// Domain rules
// ----------------------------------------------------------------------------

/// `github.event_name == '<event_type>'`
pub fn event_type_equals(event_type: &str) -> ConditionNode {
    equals(property_access(EVENT_NAME_PATH), string_literal(event_type))
}

/// `github.event.action == '<action>'`
pub fn action_equals(action: &str) -> ConditionNode {
    equals(property_access(EVENT_ACTION_PATH), string_literal(action))
}

/// `startsWith(github.ref, '<prefix>')`
pub fn ref_starts_with(prefix: &str) -> ConditionNode {
    function_call(
        "startsWith",
        vec![property_access(REF_PATH), string_literal(prefix)],
    )
}

/// `contains(github.event.issue.labels.*.name, '<label>')`
pub fn label_contains(label: &str) -> ConditionNode {
    contains(property_access(ISSUE_LABELS_PATH), string_literal(label))
}

/// Pull request head repository equals the base repository.
///
/// Forked pull requests run with a read-only token, so privileged jobs are
/// gated on this check.
pub fn not_from_fork() -> ConditionNode {
    equals(
        property_access(HEAD_REPO_FULL_NAME_PATH),
        property_access(REPOSITORY_PATH),
    )
}

/// Same-repository pull requests, plus forks matching any of `patterns`.
///
/// `org/*` matches by prefix, anything else must match the full name.
pub fn from_allowed_forks<S: AsRef<str>>(patterns: &[S]) -> ConditionNode {
    if patterns.is_empty() {
        return not_from_fork();
    }

    let mut terms = vec![not_from_fork()];
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let term = match pattern.strip_suffix('*').filter(|p| p.ends_with('/')) {
            Some(prefix) => function_call(
                "startsWith",
                vec![
                    property_access(HEAD_REPO_FULL_NAME_PATH),
                    string_literal(prefix),
                ],
            ),
            None => equals(
                property_access(HEAD_REPO_FULL_NAME_PATH),
                string_literal(pattern),
            ),
        };
        terms.push(term);
    }

    disjunction(false, terms)
}

/// Gate for a safe-output job.
///
/// `!cancelled()` keeps the job alive when the agent failed so errors can be
/// reported, while the skipped check stops it after a cancellation. With a
/// minimum count the job must run even with zero outputs, so the output-type
/// check is left out.
pub fn safe_output_type(output_type: &str, min: u32) -> ConditionNode {
    let not_cancelled = not(function_call("cancelled", vec![]));
    let agent_not_skipped = not_equals(
        property_access(format!("needs.{}.result", AGENT_JOB_NAME)),
        string_literal("skipped"),
    );
    let base = and(not_cancelled, agent_not_skipped);

    if min > 0 {
        return parentheses(base);
    }

    and(
        base,
        contains(
            property_access(format!("needs.{}.outputs.output_types", AGENT_JOB_NAME)),
            string_literal(output_type),
        ),
    )
}

/// Comment on a pull request: an issue comment whose issue is a PR, a
/// review comment, or a review.
pub fn pr_comment_condition() -> ConditionNode {
    let issue_comment_on_pr = and(
        event_type_equals("issue_comment"),
        not_equals(property_access(ISSUE_PULL_REQUEST_PATH), null_literal()),
    );

    disjunction(
        false,
        vec![
            issue_comment_on_pr,
            event_type_equals("pull_request_review_comment"),
            event_type_equals("pull_request_review"),
        ],
    )
}

/// Events on which the reaction job may add a reaction.
///
/// Pull requests from forks are excluded since their token cannot write
/// reactions.
pub fn reaction_condition() -> ConditionNode {
    let mut terms: Vec<ConditionNode> = REACTION_EVENTS
        .iter()
        .map(|event| event_type_equals(event))
        .collect();
    terms.push(and(event_type_equals("pull_request"), not_from_fork()));

    disjunction(false, terms)
}

/// AND a previously emitted raw condition with a newly built one.
///
/// The existing text is parsed so it composes structurally. If it does not
/// parse, it is kept as an opaque expression and a warning is recorded.
pub fn combine_with_existing(
    existing: &str,
    condition: ConditionNode,
    sink: &mut dyn DiagnosticSink,
) -> ConditionNode {
    let existing = strip_expression_wrapper(existing);
    if existing.is_empty() {
        return condition;
    }

    let existing_node = match parse(existing) {
        Ok(node) => node,
        Err(e) => {
            sink.warning(format!(
                "Could not parse existing condition '{}' ({}); keeping it verbatim",
                existing, e
            ));
            ConditionNode::expression(existing)
        }
    };

    and(existing_node, condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticLog, NullSink};

    #[test]
    fn test_event_type_equals() {
        assert_eq!(
            event_type_equals("issues").render(),
            "github.event_name == 'issues'"
        );
    }

    #[test]
    fn test_action_equals() {
        assert_eq!(
            action_equals("opened").render(),
            "github.event.action == 'opened'"
        );
    }

    #[test]
    fn test_ref_starts_with() {
        assert_eq!(
            ref_starts_with("refs/tags/").render(),
            "startsWith(github.ref, 'refs/tags/')"
        );
    }

    #[test]
    fn test_not_from_fork() {
        assert_eq!(
            not_from_fork().render(),
            "github.event.pull_request.head.repo.full_name == github.repository"
        );
    }

    #[test]
    fn test_label_contains() {
        assert_eq!(
            label_contains("bug").render(),
            "contains(github.event.issue.labels.*.name, 'bug')"
        );
    }

    #[test]
    fn test_allowed_forks_empty_is_not_from_fork() {
        let empty: [&str; 0] = [];
        assert_eq!(from_allowed_forks(&empty), not_from_fork());
    }

    #[test]
    fn test_allowed_forks_glob() {
        let node = from_allowed_forks(&["org/*"]);
        match &node {
            ConditionNode::Disjunction { terms, .. } => assert_eq!(terms.len(), 2),
            other => panic!("Expected Disjunction, got {:?}", other),
        }
        assert_eq!(
            node.render(),
            "github.event.pull_request.head.repo.full_name == github.repository || \
             startsWith(github.event.pull_request.head.repo.full_name, 'org/')"
        );
    }

    #[test]
    fn test_allowed_forks_exact_and_glob() {
        let node = from_allowed_forks(&["octo/repo".to_string(), "team/*".to_string()]);
        let rendered = node.render();
        assert!(rendered
            .contains("github.event.pull_request.head.repo.full_name == 'octo/repo'"));
        assert!(rendered
            .contains("startsWith(github.event.pull_request.head.repo.full_name, 'team/')"));
        assert_eq!(rendered.matches(" || ").count(), 2);
    }

    #[test]
    fn test_bare_star_is_exact_pattern() {
        // only `<owner>/*` is treated as a glob
        let node = from_allowed_forks(&["*"]);
        assert!(node
            .render()
            .ends_with("github.event.pull_request.head.repo.full_name == '*'"));
    }

    #[test]
    fn test_safe_output_without_minimum() {
        let rendered = safe_output_type("create_issue", 0).render();
        assert_eq!(
            rendered,
            "((!cancelled()) && (needs.agent.result != 'skipped')) && \
             (contains(needs.agent.outputs.output_types, 'create_issue'))"
        );
    }

    #[test]
    fn test_safe_output_with_minimum() {
        let node = safe_output_type("create_issue", 1);
        assert!(matches!(node, ConditionNode::Parentheses(_)));
        assert_eq!(
            node.render(),
            "((!cancelled()) && (needs.agent.result != 'skipped'))"
        );
    }

    #[test]
    fn test_pr_comment_condition() {
        assert_eq!(
            pr_comment_condition().render(),
            "(github.event_name == 'issue_comment') && (github.event.issue.pull_request != null) || \
             github.event_name == 'pull_request_review_comment' || \
             github.event_name == 'pull_request_review'"
        );
    }

    #[test]
    fn test_reaction_condition_terms() {
        match reaction_condition() {
            ConditionNode::Disjunction { terms, multiline } => {
                assert!(!multiline);
                assert_eq!(terms.len(), 6);
                assert!(terms[..5]
                    .iter()
                    .all(|t| matches!(t, ConditionNode::Comparison { .. })));
                assert!(matches!(terms[5], ConditionNode::And(..)));
            }
            other => panic!("Expected Disjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_builders_compose() {
        let node = and(
            not(label_contains("skip-ci")),
            or(event_type_equals("push"), reaction_condition()),
        );
        let rendered = node.render();
        assert!(rendered
            .starts_with("(!(contains(github.event.issue.labels.*.name, 'skip-ci'))) && "));
    }

    #[test]
    fn test_combine_with_empty_existing() {
        let mut sink = NullSink;
        let node = combine_with_existing("  ", event_type_equals("push"), &mut sink);
        assert_eq!(node, event_type_equals("push"));
    }

    #[test]
    fn test_combine_parses_existing() {
        let mut log = DiagnosticLog::new();
        let node = combine_with_existing(
            "${{ github.actor != 'bot' && !cancelled() }}",
            event_type_equals("push"),
            &mut log,
        );
        assert!(log.is_empty());
        assert_eq!(
            node.render(),
            "((github.actor != 'bot') && (!cancelled())) && (github.event_name == 'push')"
        );
    }

    #[test]
    fn test_combine_keeps_negated_call_form() {
        let node = combine_with_existing("!cancelled()", event_type_equals("push"), &mut NullSink);
        let direct = and(not(function_call("cancelled", vec![])), event_type_equals("push"));
        assert_eq!(node.render(), "(!cancelled()) && (github.event_name == 'push')");
        assert_eq!(node.render(), direct.render());
    }

    #[test]
    fn test_combine_falls_back_on_parse_error() {
        let mut log = DiagnosticLog::new();
        let node = combine_with_existing("(a == 'b'", event_type_equals("push"), &mut log);
        assert_eq!(log.warnings().count(), 1);
        assert_eq!(
            node.render(),
            "((a == 'b') && (github.event_name == 'push')"
        );
    }
}
