// SPDX-License-Identifier: MIT

//! Compiles workflow frontmatter into job conditions

use super::emit::write_job_if;
use super::filters::{draft_filter, fork_filter, label_filter};
use super::types::Frontmatter;
use crate::condition::builders::{and, combine_with_existing, reaction_condition, safe_output_type};
use crate::condition::{ConditionNode, WrapConfig};
use crate::diagnostics::DiagnosticSink;

pub const ACTIVATION_JOB_NAME: &str = "activation";
pub const REACTION_JOB_NAME: &str = "add_reaction";

/// Condition attached to one generated job
#[derive(Debug, Clone, PartialEq)]
pub struct JobCondition {
    pub job: String,
    pub condition: ConditionNode,
}

/// All job conditions of a workflow, in emission order
#[derive(Debug, Clone)]
pub struct CompiledConditions {
    pub jobs: Vec<JobCondition>,
    wrap: WrapConfig,
}

impl CompiledConditions {
    pub fn get(&self, job: &str) -> Option<&ConditionNode> {
        self.jobs
            .iter()
            .find(|j| j.job == job)
            .map(|j| &j.condition)
    }

    /// Rendered condition of `job`
    pub fn rendered(&self, job: &str) -> Option<String> {
        self.get(job).map(ConditionNode::render)
    }

    /// A `jobs:` block carrying only the `if:` of each job
    pub fn to_yaml(&self) -> String {
        let mut out = String::from("jobs:\n");
        for job in &self.jobs {
            out.push_str(&format!("  {}:\n", job.job));
            write_job_if(&mut out, &job.condition.render(), "    ", "      ", &self.wrap);
        }
        out
    }
}

pub struct ConditionCompiler {
    wrap: WrapConfig,
}

impl ConditionCompiler {
    pub fn new(wrap: WrapConfig) -> Self {
        Self { wrap }
    }

    pub fn compile(
        &self,
        frontmatter: &Frontmatter,
        sink: &mut dyn DiagnosticSink,
    ) -> CompiledConditions {
        let mut jobs = Vec::new();

        if let Some(condition) = self.activation_condition(frontmatter, sink) {
            jobs.push(JobCondition {
                job: ACTIVATION_JOB_NAME.to_string(),
                condition,
            });
        }

        if let Some(reaction) = &frontmatter.reaction {
            log::debug!("Adding reaction job for '{}'", reaction);
            jobs.push(JobCondition {
                job: REACTION_JOB_NAME.to_string(),
                condition: reaction_condition(),
            });
        }

        for (kind, config) in &frontmatter.safe_outputs {
            let output_type = kind.replace('-', "_");
            let min = config.as_ref().map(|c| c.min).unwrap_or(0);
            jobs.push(JobCondition {
                job: format!("safe_outputs_{}", output_type),
                condition: safe_output_type(&output_type, min),
            });
        }

        log::info!("Compiled conditions for {} jobs", jobs.len());
        CompiledConditions {
            jobs,
            wrap: self.wrap,
        }
    }

    /// User `if`, then the draft, fork and label filters, ANDed in order
    fn activation_condition(
        &self,
        frontmatter: &Frontmatter,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<ConditionNode> {
        let mut filters = Vec::new();
        if let Some(triggers) = frontmatter.triggers() {
            if let Some(pull_request) = &triggers.pull_request {
                filters.extend(draft_filter(pull_request));
                filters.extend(fork_filter(pull_request, sink));
            }
            filters.extend(label_filter(triggers, sink));
        }

        let filters = filters.into_iter().reduce(and);
        let existing = frontmatter.if_condition.as_deref().unwrap_or("");

        match filters {
            Some(condition) => Some(combine_with_existing(existing, condition, sink)),
            None if existing.trim().is_empty() => None,
            None => Some(ConditionNode::expression(
                crate::condition::strip_expression_wrapper(existing),
            )),
        }
    }
}

impl Default for ConditionCompiler {
    fn default() -> Self {
        Self::new(WrapConfig::default())
    }
}
