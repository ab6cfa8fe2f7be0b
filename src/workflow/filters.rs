// SPDX-License-Identifier: MIT

//! Trigger filters expressed as job conditions
//!
//! Each filter lets every other event through and only constrains the
//! event it is configured on.

use super::types::{EventTrigger, Triggers};
use crate::condition::builders::{
    and, boolean_literal, disjunction, equals, from_allowed_forks, not_equals, or, property_access,
    string_literal,
};
use crate::condition::ConditionNode;
use crate::constants::{
    EVENT_ACTION_PATH, EVENT_NAME_PATH, LABEL_NAME_PATH, PULL_REQUEST_DRAFT_PATH,
};
use crate::diagnostics::DiagnosticSink;

fn event_is_not(event: &str) -> ConditionNode {
    not_equals(property_access(EVENT_NAME_PATH), string_literal(event))
}

fn action_is_not(action: &str) -> ConditionNode {
    not_equals(property_access(EVENT_ACTION_PATH), string_literal(action))
}

/// `draft: true|false` on `pull_request`
pub fn draft_filter(pull_request: &EventTrigger) -> Option<ConditionNode> {
    let draft = pull_request.draft?;
    Some(or(
        event_is_not("pull_request"),
        equals(
            property_access(PULL_REQUEST_DRAFT_PATH),
            boolean_literal(draft),
        ),
    ))
}

/// `forks:` on `pull_request`; a `*` entry allows every fork
pub fn fork_filter(
    pull_request: &EventTrigger,
    sink: &mut dyn DiagnosticSink,
) -> Option<ConditionNode> {
    let forks = pull_request.forks.as_ref()?.to_vec();
    if forks.iter().any(|f| f == "*") {
        sink.info("forks contains '*'; pull requests from any fork are allowed".to_string());
        return None;
    }

    Some(or(event_is_not("pull_request"), from_allowed_forks(&forks)))
}

/// `names:` on labeled/unlabeled `issues` and `pull_request` triggers
pub fn label_filter(triggers: &Triggers, sink: &mut dyn DiagnosticSink) -> Option<ConditionNode> {
    let sections = [
        ("issues", triggers.issues.as_ref()),
        ("pull_request", triggers.pull_request.as_ref()),
    ];

    let mut conditions = Vec::new();
    for (event, trigger) in sections {
        let Some(trigger) = trigger else {
            continue;
        };
        if let Some(condition) = label_section_condition(event, trigger, sink) {
            conditions.push(condition);
        }
    }

    conditions.into_iter().reduce(and)
}

fn label_section_condition(
    event: &str,
    trigger: &EventTrigger,
    sink: &mut dyn DiagnosticSink,
) -> Option<ConditionNode> {
    let names = trigger.names.as_ref()?.to_vec();
    let labeled = trigger.has_type("labeled");
    let unlabeled = trigger.has_type("unlabeled");

    if !labeled && !unlabeled {
        sink.warning(format!(
            "{}.names is ignored without 'labeled' or 'unlabeled' in {}.types",
            event, event
        ));
        return None;
    }
    if names.is_empty() {
        return None;
    }

    let mut matches: Vec<ConditionNode> = names
        .iter()
        .map(|name| equals(property_access(LABEL_NAME_PATH), string_literal(name.as_str())))
        .collect();
    let label_match = if matches.len() == 1 {
        matches.remove(0)
    } else {
        disjunction(false, matches)
    };

    let other_action = match (labeled, unlabeled) {
        (true, true) => and(action_is_not("labeled"), action_is_not("unlabeled")),
        (true, false) => action_is_not("labeled"),
        _ => action_is_not("unlabeled"),
    };

    Some(or(event_is_not(event), or(other_action, label_match)))
}
