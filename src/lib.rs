// SPDX-License-Identifier: MIT

//! Condition-expression compiler for generated CI pipelines.
//!
//! Builds, parses, renders and line-wraps the boolean `if:` expressions that
//! gate whether a generated job runs.

pub mod condition;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod workflow;

pub use condition::{parse, CompareOp, ConditionNode, NodeKind, WrapConfig};
pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink, LogSink, NullSink, Severity};
pub use error::{GatekeeperError, ParseError};
