pub mod ast;
pub mod parser;
pub mod error;

pub use ast::{BinaryOp, Equation, Expr, Span, UnaryOp};
pub use error::ParseError;

use chumsky::Parser;
use chumsky::Stream;
use lexer::token::Token;

fn token_stream(source: &str) -> Stream<'static, Token, Span, std::vec::IntoIter<(Token, Span)>> {
    let end = source.len()..source.len();
    Stream::from_iter(end, lexer::lex_spanned(source).into_iter())
}

/// Parse a full expression: arithmetic, powers, calls and matrix literals.
pub fn parse_expression(source: &str) -> Result<Expr, Vec<ParseError>> {
    parser::expression().parse(token_stream(source))
}

/// Parse `lhs = rhs` (or a bare expression, meaning `= 0`).
pub fn parse_equation(source: &str) -> Result<Equation, Vec<ParseError>> {
    parser::equation().parse(token_stream(source))
}

/// Parse the keypad grammar: decimal numbers, `+ - * /`, unary minus and
/// parentheses. Identifiers, calls, powers and lists are rejected.
pub fn parse_arithmetic(source: &str) -> Result<Expr, Vec<ParseError>> {
    parser::arithmetic().parse(token_stream(source))
}

#[cfg(test)]
mod tests;
