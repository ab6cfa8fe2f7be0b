// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for condition expressions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A node in a condition expression tree
///
/// Every node owns its children. Trees are built bottom-up and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionNode {
    /// Opaque, already-rendered fragment
    Expression {
        text: String,
        /// Emitted as a `#` comment line by multiline disjunctions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Logical AND
    And(Box<ConditionNode>, Box<ConditionNode>),
    /// Logical OR
    Or(Box<ConditionNode>, Box<ConditionNode>),
    /// Logical NOT
    Not(Box<ConditionNode>),
    /// Forced grouping
    Parentheses(Box<ConditionNode>),
    /// N-ary OR
    Disjunction {
        terms: Vec<ConditionNode>,
        #[serde(default)]
        multiline: bool,
    },
    /// `name(arg, ...)`
    FunctionCall {
        name: String,
        args: Vec<ConditionNode>,
    },
    /// Context reference such as `github.event.action`
    PropertyAccess(String),
    StringLiteral(String),
    BooleanLiteral(bool),
    /// Raw numeric text, rendered verbatim
    NumberLiteral(String),
    Comparison {
        left: Box<ConditionNode>,
        op: CompareOp,
        right: Box<ConditionNode>,
    },
    /// `condition ? if_true : if_false`
    Ternary {
        condition: Box<ConditionNode>,
        if_true: Box<ConditionNode>,
        if_false: Box<ConditionNode>,
    },
    /// Sugar for `contains(array, value)`
    Contains {
        array: Box<ConditionNode>,
        value: Box<ConditionNode>,
    },
}

/// Discriminant of a [`ConditionNode`], without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Expression,
    And,
    Or,
    Not,
    Parentheses,
    Disjunction,
    FunctionCall,
    PropertyAccess,
    StringLiteral,
    BooleanLiteral,
    NumberLiteral,
    Comparison,
    Ternary,
    Contains,
}

impl NodeKind {
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Expression,
        NodeKind::And,
        NodeKind::Or,
        NodeKind::Not,
        NodeKind::Parentheses,
        NodeKind::Disjunction,
        NodeKind::FunctionCall,
        NodeKind::PropertyAccess,
        NodeKind::StringLiteral,
        NodeKind::BooleanLiteral,
        NodeKind::NumberLiteral,
        NodeKind::Comparison,
        NodeKind::Ternary,
        NodeKind::Contains,
    ];
}

impl ConditionNode {
    /// Opaque expression without a description
    pub fn expression(text: impl Into<String>) -> Self {
        ConditionNode::Expression {
            text: text.into(),
            description: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            ConditionNode::Expression { .. } => NodeKind::Expression,
            ConditionNode::And(..) => NodeKind::And,
            ConditionNode::Or(..) => NodeKind::Or,
            ConditionNode::Not(_) => NodeKind::Not,
            ConditionNode::Parentheses(_) => NodeKind::Parentheses,
            ConditionNode::Disjunction { .. } => NodeKind::Disjunction,
            ConditionNode::FunctionCall { .. } => NodeKind::FunctionCall,
            ConditionNode::PropertyAccess(_) => NodeKind::PropertyAccess,
            ConditionNode::StringLiteral(_) => NodeKind::StringLiteral,
            ConditionNode::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            ConditionNode::NumberLiteral(_) => NodeKind::NumberLiteral,
            ConditionNode::Comparison { .. } => NodeKind::Comparison,
            ConditionNode::Ternary { .. } => NodeKind::Ternary,
            ConditionNode::Contains { .. } => NodeKind::Contains,
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// ==
    #[serde(rename = "==")]
    Eq,
    /// !=
    #[serde(rename = "!=")]
    NotEq,
    /// <
    #[serde(rename = "<")]
    Lt,
    /// >
    #[serde(rename = ">")]
    Gt,
    /// <=
    #[serde(rename = "<=")]
    Lte,
    /// >=
    #[serde(rename = ">=")]
    Gte,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::NotEq),
            "<" => Ok(CompareOp::Lt),
            ">" => Ok(CompareOp::Gt),
            "<=" => Ok(CompareOp::Lte),
            ">=" => Ok(CompareOp::Gte),
            other => Err(format!("Unknown comparison operator: {}", other)),
        }
    }
}
