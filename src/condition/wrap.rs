// SPDX-License-Identifier: MIT

//! Line wrapping for long rendered conditions
//!
//! Two passes: break after `&&`/`||` once a line grows past the threshold,
//! then split any line that is still too long after a balanced `)` that is
//! followed by an operator. Quoted literals are copied whole and never
//! split.

use super::parser::quoted_end;
use crate::constants::{EXPRESSION_BREAK_THRESHOLD, MAX_EXPRESSION_LINE_LENGTH};
use crate::error::GatekeeperError;
use serde::Deserialize;

/// Wrapping limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Lines longer than this are reflowed
    pub max_line_length: usize,
    /// A line is flushed at the next operator once longer than this
    pub break_threshold: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            max_line_length: MAX_EXPRESSION_LINE_LENGTH,
            break_threshold: EXPRESSION_BREAK_THRESHOLD,
        }
    }
}

impl WrapConfig {
    pub fn new(max_line_length: usize, break_threshold: usize) -> Self {
        Self {
            max_line_length,
            break_threshold,
        }
    }

    /// Defaults, overridden by `GATEKEEPER_MAX_LINE_LENGTH` and
    /// `GATEKEEPER_BREAK_THRESHOLD` when set
    pub fn from_env() -> Result<Self, GatekeeperError> {
        let mut config = Self::default();
        if let Some(value) = read_env_usize("GATEKEEPER_MAX_LINE_LENGTH")? {
            config.max_line_length = value;
        }
        if let Some(value) = read_env_usize("GATEKEEPER_BREAK_THRESHOLD")? {
            config.break_threshold = value;
        }
        Ok(config)
    }
}

fn read_env_usize(name: &str) -> Result<Option<usize>, GatekeeperError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| GatekeeperError::config(format!("{} must be a number: {}", name, e))),
        Err(_) => Ok(None),
    }
}

/// Whether an expression must be emitted as a block rather than inline
pub fn needs_wrapping(expression: &str, config: &WrapConfig) -> bool {
    expression.contains('\n') || expression.len() > config.max_line_length
}

fn is_operator_at(chars: &[char], i: usize) -> bool {
    i + 1 < chars.len()
        && ((chars[i] == '&' && chars[i + 1] == '&') || (chars[i] == '|' && chars[i + 1] == '|'))
}

fn skip_blanks(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && (chars[i] == ' ' || chars[i] == '\t') {
        i += 1;
    }
    i
}

/// Break a long expression into lines at logical operators, falling back
/// to parenthesis boundaries for lines that stay too long.
pub fn break_long_expression(expression: &str, config: &WrapConfig) -> Vec<String> {
    if expression.len() <= config.max_line_length {
        return vec![expression.to_string()];
    }

    log::debug!("Breaking long expression: length={}", expression.len());

    let chars: Vec<char> = expression.chars().collect();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\'' || chars[i] == '"' {
            let end = quoted_end(&chars, i);
            current.extend(&chars[i..end]);
            i = end;
            continue;
        }

        if is_operator_at(&chars, i) {
            current.extend(&chars[i..i + 2]);
            i += 2;
            if current.trim().len() > config.break_threshold {
                lines.push(current.trim().to_string());
                current.clear();
                i = skip_blanks(&chars, i);
            }
            continue;
        }

        current.push(chars[i]);
        i += 1;
    }

    if !current.trim().is_empty() {
        lines.push(current.trim().to_string());
    }

    lines
        .into_iter()
        .flat_map(|line| {
            if line.len() > config.max_line_length {
                break_at_parentheses(&line, config)
            } else {
                vec![line]
            }
        })
        .collect()
}

/// Split a line after a top-level `)` followed by `&&` or `||`.
pub fn break_at_parentheses(expression: &str, config: &WrapConfig) -> Vec<String> {
    if expression.len() <= config.max_line_length {
        return vec![expression.to_string()];
    }

    let chars: Vec<char> = expression.chars().collect();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == '\'' || ch == '"' {
            let end = quoted_end(&chars, i);
            current.extend(&chars[i..end]);
            i = end;
            continue;
        }

        current.push(ch);
        i += 1;

        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && current.trim().len() > config.break_threshold {
                    let op = skip_blanks(&chars, i);
                    if is_operator_at(&chars, op) {
                        current.extend(&chars[i..op + 2]);
                        lines.push(current.trim().to_string());
                        current.clear();
                        i = skip_blanks(&chars, op + 2);
                    }
                }
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim().to_string());
    }

    lines
}
