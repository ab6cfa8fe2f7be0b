// SPDX-License-Identifier: MIT

//! Context paths and defaults shared by the condition builders.

/// Name of the main agent job that safe-output jobs depend on
pub const AGENT_JOB_NAME: &str = "agent";

/// Lines longer than this are reflowed by the line wrapper
pub const MAX_EXPRESSION_LINE_LENGTH: usize = 120;

/// A line is flushed at the next logical operator once it grows past this
pub const EXPRESSION_BREAK_THRESHOLD: usize = 100;

pub const EVENT_NAME_PATH: &str = "github.event_name";
pub const EVENT_ACTION_PATH: &str = "github.event.action";
pub const REPOSITORY_PATH: &str = "github.repository";
pub const HEAD_REPO_FULL_NAME_PATH: &str = "github.event.pull_request.head.repo.full_name";
pub const PULL_REQUEST_DRAFT_PATH: &str = "github.event.pull_request.draft";
pub const ISSUE_LABELS_PATH: &str = "github.event.issue.labels.*.name";
pub const ISSUE_PULL_REQUEST_PATH: &str = "github.event.issue.pull_request";
pub const LABEL_NAME_PATH: &str = "github.event.label.name";
pub const REF_PATH: &str = "github.ref";
