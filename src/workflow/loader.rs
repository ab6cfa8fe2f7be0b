//! Workflow loader - frontmatter extraction and parsing
//!
//! Workflows are Markdown files with a `---` delimited YAML header. A bare
//! YAML document is accepted too.

use super::types::Frontmatter;
use crate::error::GatekeeperError;
use std::fs;
use std::path::Path;

/// Loads workflow frontmatter from files or strings
pub struct WorkflowLoader;

impl WorkflowLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the frontmatter of a workflow file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Frontmatter, GatekeeperError> {
        let path = path.as_ref();
        log::debug!("Loading workflow from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_frontmatter(&content)
    }

    /// Parse frontmatter from a Markdown document or a bare YAML document
    pub fn parse_frontmatter(content: &str) -> Result<Frontmatter, GatekeeperError> {
        let yaml = match extract_frontmatter_block(content)? {
            Some(block) => block,
            None => content.to_string(),
        };

        if yaml.trim().is_empty() {
            return Ok(Frontmatter::default());
        }

        let frontmatter: Frontmatter = serde_yaml::from_str(&yaml)?;
        Ok(frontmatter)
    }
}

impl Default for WorkflowLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// The YAML between the opening and closing `---` lines, if the document
/// starts with one
fn extract_frontmatter_block(content: &str) -> Result<Option<String>, GatekeeperError> {
    let mut lines = content.trim_start().lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return Ok(None);
    }

    let mut block = Vec::new();
    for line in lines {
        if line.trim_end() == "---" {
            return Ok(Some(block.join("\n")));
        }
        block.push(line);
    }

    Err(GatekeeperError::frontmatter(
        "frontmatter block is missing its closing '---'",
    ))
}
