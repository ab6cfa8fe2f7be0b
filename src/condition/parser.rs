//! Condition expression parser
//!
//! Re-ingests a raw condition string so it can be combined with newly built
//! trees. Grammar, lowest precedence first:
//!
//! ```text
//! or      := and ('||' and)*
//! and     := unary ('&&' unary)*
//! unary   := '!' unary | primary
//! primary := '(' or ')' | literal
//! ```
//!
//! A literal is any run of text up to a top-level `&&`, `||`, bare `!` or
//! unmatched `)`. It may contain balanced parentheses (function calls) and
//! quoted strings, and becomes an opaque `Expression` node.

use super::ast::ConditionNode;
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Literal,
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    value: String,
    pos: usize,
}

impl Token {
    fn new(kind: TokenKind, value: impl Into<String>, pos: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            pos,
        }
    }
}

/// Parse a condition expression string into a tree
pub fn parse(input: &str) -> Result<ConditionNode, ParseError> {
    log::debug!("Parsing expression: {}", input);

    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens = tokenize(input).inspect_err(|e| {
        log::debug!("Failed to tokenize expression: {}", e);
    })?;
    let token_count = tokens.len();

    let mut parser = ExpressionParser { tokens, pos: 0 };
    let result = parser.parse_or().inspect_err(|e| {
        log::debug!("Failed to parse expression: {}", e);
    })?;

    let trailing = parser.current();
    if trailing.kind != TokenKind::Eof {
        return Err(ParseError::UnexpectedToken {
            token: trailing.value.clone(),
            position: trailing.pos,
        });
    }

    log::debug!("Parsed expression with {} tokens", token_count);
    Ok(result)
}

/// Index one past the quoted segment opening at `start`.
///
/// Backslash escapes the next character. An unterminated quote runs to the
/// end of input.
pub(crate) fn quoted_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == quote {
            return i + 1;
        }
        if chars[i] == '\\' && i + 1 < chars.len() {
            i += 2;
        } else {
            i += 1;
        }
    }
    chars.len()
}

fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

fn is_pair(chars: &[char], i: usize, pair: &str) -> bool {
    let mut expected = pair.chars();
    match (expected.next(), expected.next()) {
        (Some(a), Some(b)) => chars.get(i) == Some(&a) && chars.get(i + 1) == Some(&b),
        _ => false,
    }
}

/// `!` that is logical NOT rather than the start of `!=`
fn is_bare_not(chars: &[char], i: usize) -> bool {
    chars[i] == '!' && chars.get(i + 1) != Some(&'=')
}

fn tokenize(expression: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if is_pair(&chars, i, "&&") {
            tokens.push(Token::new(TokenKind::And, "&&", i));
            i += 2;
        } else if is_pair(&chars, i, "||") {
            tokens.push(Token::new(TokenKind::Or, "||", i));
            i += 2;
        } else if is_bare_not(&chars, i) {
            tokens.push(Token::new(TokenKind::Not, "!", i));
            i += 1;
        } else if ch == '(' {
            tokens.push(Token::new(TokenKind::LeftParen, "(", i));
            i += 1;
        } else if ch == ')' {
            tokens.push(Token::new(TokenKind::RightParen, ")", i));
            i += 1;
        } else {
            let start = i;
            i = scan_literal(&chars, i);
            let literal: String = chars[start..i].iter().collect();
            let literal = literal.trim();
            // unreachable: scan_literal always consumes a non-space char
            if literal.is_empty() {
                return Err(ParseError::EmptyLiteral { position: start });
            }
            tokens.push(Token::new(TokenKind::Literal, literal, start));
        }
    }

    tokens.push(Token::new(TokenKind::Eof, "", chars.len()));
    Ok(tokens)
}

/// End index of the literal starting at `start`
fn scan_literal(chars: &[char], start: usize) -> usize {
    let mut i = start;
    let mut depth = 0usize;

    while i < chars.len() {
        let ch = chars[i];

        if is_quote(ch) {
            i = quoted_end(chars, i);
            continue;
        }

        match ch {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            // closes an enclosing group
            ')' => break,
            _ if depth == 0
                && (is_pair(chars, i, "&&") || is_pair(chars, i, "||") || is_bare_not(chars, i)) =>
            {
                break
            }
            _ => {}
        }
        i += 1;
    }

    i
}

struct ExpressionParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExpressionParser {
    fn current(&self) -> &Token {
        // tokenize always ends with Eof and advance never passes it
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn parse_or(&mut self) -> Result<ConditionNode, ParseError> {
        let mut left = self.parse_and()?;
        while self.current().kind == TokenKind::Or {
            self.advance();
            let right = self.parse_and()?;
            left = ConditionNode::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ConditionNode, ParseError> {
        let mut left = self.parse_unary()?;
        while self.current().kind == TokenKind::And {
            self.advance();
            let right = self.parse_unary()?;
            left = ConditionNode::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ConditionNode, ParseError> {
        if self.current().kind == TokenKind::Not {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(ConditionNode::Not(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<ConditionNode, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_or()?;
                let closing = self.current();
                if closing.kind != TokenKind::RightParen {
                    return Err(ParseError::MissingClosingParen {
                        token: closing.value.clone(),
                        position: closing.pos,
                    });
                }
                self.advance();
                Ok(expr)
            }
            TokenKind::Literal => {
                self.advance();
                Ok(ConditionNode::expression(token.value))
            }
            TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
            | TokenKind::RightParen
            | TokenKind::Eof => Err(ParseError::UnexpectedToken {
                token: token.value,
                position: token.pos,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(text: &str) -> ConditionNode {
        ConditionNode::expression(text)
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_parse_single_literal() {
        assert_eq!(
            parse("github.event_name == 'push'").unwrap(),
            expr("github.event_name == 'push'")
        );
    }

    #[test]
    fn test_parse_and() {
        let parsed = parse("a == 'x' && b > 5").unwrap();
        assert_eq!(
            parsed,
            ConditionNode::And(Box::new(expr("a == 'x'")), Box::new(expr("b > 5")))
        );
    }

    #[test]
    fn test_parse_or() {
        let parsed = parse("a || b").unwrap();
        assert_eq!(
            parsed,
            ConditionNode::Or(Box::new(expr("a")), Box::new(expr("b")))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let parsed = parse("a || b && c").unwrap();
        assert_eq!(
            parsed,
            ConditionNode::Or(
                Box::new(expr("a")),
                Box::new(ConditionNode::And(Box::new(expr("b")), Box::new(expr("c"))))
            )
        );
    }

    #[test]
    fn test_parentheses_group() {
        let parsed = parse("(a || b) && c").unwrap();
        assert_eq!(parsed.render(), "((a) || (b)) && (c)");
    }

    #[test]
    fn test_left_associative_chains() {
        let parsed = parse("a && b && c").unwrap();
        assert_eq!(parsed.render(), "((a) && (b)) && (c)");
    }

    #[test]
    fn test_parse_not() {
        assert_eq!(parse("!a").unwrap(), ConditionNode::Not(Box::new(expr("a"))));
        assert_eq!(
            parse("!!a").unwrap(),
            ConditionNode::Not(Box::new(ConditionNode::Not(Box::new(expr("a")))))
        );
        assert_eq!(parse("!(a || b)").unwrap().render(), "!((a) || (b))");
    }

    #[test]
    fn test_not_equals_is_not_negation() {
        assert_eq!(kinds("a != b"), vec![TokenKind::Literal, TokenKind::Eof]);
        assert_eq!(parse("a != 'b'").unwrap(), expr("a != 'b'"));
    }

    #[test]
    fn test_function_call_is_one_literal() {
        let parsed = parse("contains(github.event.issue.labels.*.name, 'bug') && x").unwrap();
        assert_eq!(
            parsed,
            ConditionNode::And(
                Box::new(expr("contains(github.event.issue.labels.*.name, 'bug')")),
                Box::new(expr("x"))
            )
        );
    }

    #[test]
    fn test_quotes_hide_operators() {
        let parsed = parse("a == 'x && y' && b").unwrap();
        assert_eq!(
            parsed,
            ConditionNode::And(Box::new(expr("a == 'x && y'")), Box::new(expr("b")))
        );
    }

    #[test]
    fn test_quotes_hide_parens_and_escapes() {
        let parsed = parse(r#"a == "it's (\" || \")" || b"#).unwrap();
        assert_eq!(
            parsed,
            ConditionNode::Or(
                Box::new(expr(r#"a == "it's (\" || \")""#)),
                Box::new(expr("b"))
            )
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("a && (b)").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![0, 2, 5, 6, 7, 8]);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   \n\t"), Err(ParseError::Empty));
    }

    #[test]
    fn test_missing_closing_paren() {
        assert_eq!(
            parse("(a && b"),
            Err(ParseError::MissingClosingParen {
                token: String::new(),
                position: 7
            })
        );
    }

    #[test]
    fn test_unmatched_closing_paren() {
        assert_eq!(
            parse("a)"),
            Err(ParseError::UnexpectedToken {
                token: ")".to_string(),
                position: 1
            })
        );
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(
            parse("(a) (b)"),
            Err(ParseError::UnexpectedToken {
                token: "(".to_string(),
                position: 4
            })
        );
    }

    #[test]
    fn test_dangling_operators() {
        assert!(matches!(
            parse("a &&"),
            Err(ParseError::UnexpectedToken { position: 4, .. })
        ));
        assert!(matches!(
            parse("&&&&"),
            Err(ParseError::UnexpectedToken { position: 0, .. })
        ));
        assert!(matches!(
            parse("a &&&& b"),
            Err(ParseError::UnexpectedToken { position: 4, .. })
        ));
        assert!(matches!(
            parse("|| a"),
            Err(ParseError::UnexpectedToken { position: 0, .. })
        ));
    }
}
