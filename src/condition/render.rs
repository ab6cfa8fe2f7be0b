// SPDX-License-Identifier: MIT

//! Rendering of condition trees into the target expression syntax
//!
//! Binary AND/OR always parenthesize both operands. The downstream
//! evaluator has quirks around redundant parentheses, so that output shape
//! must stay stable.

use super::ast::ConditionNode;
use super::parser::quoted_end;
use std::fmt::{self, Write};

impl ConditionNode {
    /// Render the tree to its textual expression
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionNode::Expression { text, .. } => f.write_str(text),
            ConditionNode::And(left, right) => write!(f, "({}) && ({})", left, right),
            ConditionNode::Or(left, right) => write!(f, "({}) || ({})", left, right),
            // `!(fn())` is read as an object literal downstream
            ConditionNode::Not(child) => match child.as_ref() {
                ConditionNode::FunctionCall { .. } => write!(f, "!{}", child),
                ConditionNode::Expression { text, .. } if is_single_call(text) => {
                    write!(f, "!{}", text.trim())
                }
                _ => write!(f, "!({})", child),
            },
            ConditionNode::Parentheses(child) => write!(f, "({})", child),
            ConditionNode::Disjunction { terms, multiline } => {
                render_disjunction(f, terms, *multiline)
            }
            ConditionNode::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                write_args(f, args)?;
                f.write_char(')')
            }
            ConditionNode::PropertyAccess(path) => f.write_str(path),
            ConditionNode::StringLiteral(value) => write!(f, "'{}'", value),
            ConditionNode::BooleanLiteral(value) => write!(f, "{}", value),
            ConditionNode::NumberLiteral(raw) => f.write_str(raw),
            ConditionNode::Comparison { left, op, right } => {
                write!(f, "{} {} {}", left, op, right)
            }
            ConditionNode::Ternary {
                condition,
                if_true,
                if_false,
            } => write!(f, "{} ? {} : {}", condition, if_true, if_false),
            ConditionNode::Contains { array, value } => {
                write!(f, "contains({}, {})", array, value)
            }
        }
    }
}

/// Opaque text that is exactly one call, like `cancelled()` or
/// `startsWith(github.ref, 'v')`
fn is_single_call(text: &str) -> bool {
    let chars: Vec<char> = text.trim().chars().collect();
    let Some(open) = chars.iter().position(|&c| c == '(') else {
        return false;
    };

    let name = &chars[..open];
    let is_ident = |c: &char| c.is_ascii_alphanumeric() || *c == '_';
    if !name.first().is_some_and(|c| c.is_ascii_alphabetic() || *c == '_')
        || !name.iter().all(is_ident)
    {
        return false;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '\'' | '"' => {
                i = quoted_end(&chars, i);
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == chars.len() - 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    false
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[ConditionNode]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

fn render_disjunction(
    f: &mut fmt::Formatter<'_>,
    terms: &[ConditionNode],
    multiline: bool,
) -> fmt::Result {
    match terms {
        [] => Ok(()),
        [only] => write!(f, "{}", only),
        _ if multiline => {
            let last = terms.len() - 1;
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    f.write_char('\n')?;
                }
                if let ConditionNode::Expression {
                    description: Some(description),
                    ..
                } = term
                {
                    if !description.is_empty() {
                        writeln!(f, "# {}", description)?;
                    }
                }
                write!(f, "{}", term)?;
                if i < last {
                    f.write_str(" ||")?;
                }
            }
            Ok(())
        }
        _ => {
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    f.write_str(" || ")?;
                }
                write!(f, "{}", term)?;
            }
            Ok(())
        }
    }
}
