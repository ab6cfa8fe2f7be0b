// SPDX-License-Identifier: MIT

use super::ast::ConditionNode;

/// Call `visitor` for every opaque `Expression` leaf reachable through the
/// logical combinators, left to right.
///
/// Comparisons, function calls and the other structured nodes are complete
/// expressions on their own and are not descended into. The walk stops at
/// the first error.
pub fn visit_expressions<E, F>(node: &ConditionNode, visitor: &mut F) -> Result<(), E>
where
    F: FnMut(&str) -> Result<(), E>,
{
    match node {
        ConditionNode::Expression { text, .. } => visitor(text),
        ConditionNode::And(left, right) | ConditionNode::Or(left, right) => {
            visit_expressions(left, visitor)?;
            visit_expressions(right, visitor)
        }
        ConditionNode::Not(child) | ConditionNode::Parentheses(child) => {
            visit_expressions(child, visitor)
        }
        ConditionNode::Disjunction { terms, .. } => {
            for term in terms {
                visit_expressions(term, visitor)?;
            }
            Ok(())
        }
        ConditionNode::FunctionCall { .. }
        | ConditionNode::PropertyAccess(_)
        | ConditionNode::StringLiteral(_)
        | ConditionNode::BooleanLiteral(_)
        | ConditionNode::NumberLiteral(_)
        | ConditionNode::Comparison { .. }
        | ConditionNode::Ternary { .. }
        | ConditionNode::Contains { .. } => Ok(()),
    }
}
