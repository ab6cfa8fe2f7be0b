// SPDX-License-Identifier: MIT

//! Job condition expressions
//!
//! This module builds, parses, renders and line-wraps the boolean
//! expressions placed in a job's `if:`. Typical conditions look like:
//! - `github.event_name == 'issues'`
//! - `(!cancelled()) && (needs.agent.result != 'skipped')`
//! - `contains(github.event.issue.labels.*.name, 'bug')`

mod ast;
pub mod builders;
mod parser;
mod render;
mod text;
mod visit;
mod wrap;


pub use ast::{CompareOp, ConditionNode, NodeKind};
pub use parser::parse;
pub use text::{normalize_for_comparison, strip_expression_wrapper};
pub use visit::visit_expressions;
pub use wrap::{break_at_parentheses, break_long_expression, needs_wrapping, WrapConfig};
