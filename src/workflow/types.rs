// SPDX-License-Identifier: MIT

//! YAML schema types for workflow frontmatter
//!
//! Only the parts that influence job conditions are modelled; unknown keys
//! are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Workflow frontmatter
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Frontmatter {
    /// Trigger configuration
    pub on: Option<OnConfig>,
    /// User-authored activation condition, with or without `${{ }}`
    #[serde(rename = "if")]
    pub if_condition: Option<String>,
    /// Reaction to add to the triggering item (e.g. `eyes`)
    pub reaction: Option<String>,
    /// Safe output kinds, keyed by kebab-case name
    #[serde(default, rename = "safe-outputs")]
    pub safe_outputs: BTreeMap<String, Option<SafeOutputConfig>>,
}

impl Frontmatter {
    /// The event map, when `on` is given in map form
    pub fn triggers(&self) -> Option<&Triggers> {
        match &self.on {
            Some(OnConfig::Triggers(triggers)) => Some(triggers),
            _ => None,
        }
    }
}

/// `on:` as a single event, a list of events, or a map of event sections
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OnConfig {
    Event(String),
    Events(Vec<String>),
    Triggers(Triggers),
}

/// Event sections relevant to job conditions
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Triggers {
    pub pull_request: Option<EventTrigger>,
    pub issues: Option<EventTrigger>,
}

/// Settings of one event section
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EventTrigger {
    /// Activity types, e.g. `opened`, `labeled`
    #[serde(default)]
    pub types: Vec<String>,
    /// Label names for labeled/unlabeled filtering
    pub names: Option<StringOrList>,
    /// Only draft (`true`) or only non-draft (`false`) pull requests
    pub draft: Option<bool>,
    /// Forks allowed to trigger the workflow
    pub forks: Option<StringOrList>,
}

impl EventTrigger {
    pub fn has_type(&self, activity: &str) -> bool {
        self.types.iter().any(|t| t == activity)
    }
}

/// A single string or an array of strings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s.clone()],
            StringOrList::Many(v) => v.clone(),
        }
    }
}

/// Per-kind safe output settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SafeOutputConfig {
    /// Minimum number of outputs the agent must produce
    #[serde(default)]
    pub min: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_or_list_one() {
        assert_eq!(StringOrList::One("a/*".to_string()).to_vec(), vec!["a/*"]);
    }

    #[test]
    fn test_string_or_list_many() {
        let list = StringOrList::Many(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.to_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_has_type() {
        let trigger = EventTrigger {
            types: vec!["opened".to_string(), "labeled".to_string()],
            ..Default::default()
        };
        assert!(trigger.has_type("labeled"));
        assert!(!trigger.has_type("unlabeled"));
    }
}
