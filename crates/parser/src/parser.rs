use crate::ast::{BinaryOp, Equation, Expr, UnaryOp};
use chumsky::prelude::*;
use lexer::token::Token;

/// A complete expression, consuming all input.
pub fn expression() -> impl Parser<Token, Expr, Error = Simple<Token>> {
    expr_parser().then_ignore(end())
}

/// `lhs = rhs`, or a bare expression standing for `expr = 0`.
pub fn equation() -> impl Parser<Token, Equation, Error = Simple<Token>> {
    expr_parser()
        .then(just(Token::Eq).ignore_then(expr_parser()).or_not())
        .then_ignore(end())
        .map(|(lhs, rhs)| Equation {
            lhs,
            rhs: rhs.unwrap_or_else(|| Expr::number("0")),
        })
}

/// The keypad grammar. Only numbers, the four operators, negation and
/// grouping exist here, so nothing else typed into the buffer can evaluate.
pub fn arithmetic() -> impl Parser<Token, Expr, Error = Simple<Token>> {
    recursive::<Token, Expr, _, _, Simple<Token>>(|expr| {
        let number = select! { Token::Number(n) => Expr::Number(n) };

        let atom = number.or(expr.delimited_by(just(Token::LParen), just(Token::RParen)));

        let unary = just(Token::Minus)
            .repeated()
            .then(atom)
            .foldr(|_, expr| negate(expr));

        binary_levels(unary.boxed())
    })
    .then_ignore(end())
}

fn expr_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    recursive::<Token, Expr, _, _, Simple<Token>>(|expr| {
        let number = select! { Token::Number(n) => Expr::Number(n) };

        let arguments = expr
            .clone()
            .separated_by(just(Token::Comma))
            .delimited_by(just(Token::LParen), just(Token::RParen));

        // IMPORTANT: call must come BEFORE the bare identifier,
        // otherwise det(A) parses as `det` with an orphaned (A)
        let call = select! { Token::Identifier(name) => name }
            .then(arguments)
            .map(|(func, args)| Expr::Call { func, args });

        let identifier = select! { Token::Identifier(name) => Expr::Identifier(name) };

        // Matrix rows: [[1,2],[3,4]]
        let list = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(Expr::List);

        let atom = number
            .or(call)
            .or(identifier)
            .or(list)
            .or(expr.delimited_by(just(Token::LParen), just(Token::RParen)))
            .boxed();

        // Prefix signs bind looser than '^' (-x^2 is -(x^2)); '^' is right associative
        // and its exponent may carry its own sign (2^-1).
        let unary = recursive::<Token, Expr, _, _, Simple<Token>>(|unary| {
            let power = atom
                .then(just(Token::Caret).ignore_then(unary).or_not())
                .map(|(base, exponent)| match exponent {
                    Some(exponent) => Expr::Binary {
                        op: BinaryOp::Pow,
                        lhs: Box::new(base),
                        rhs: Box::new(exponent),
                    },
                    None => base,
                });

            just(Token::Minus)
                .to(true)
                .or(just(Token::Plus).to(false))
                .repeated()
                .then(power)
                .foldr(|negative, expr| if negative { negate(expr) } else { expr })
        });

        binary_levels(unary.boxed())
    })
}

/// Product and sum levels shared by both grammars.
fn binary_levels(
    unary: BoxedParser<'static, Token, Expr, Simple<Token>>,
) -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    let product = unary
        .clone()
        .then(
            just(Token::Star)
                .to(BinaryOp::Mul)
                .or(just(Token::Slash).to(BinaryOp::Div))
                .then(unary)
                .repeated(),
        )
        .foldl(|lhs, (op, rhs)| Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
        .boxed();

    product
        .clone()
        .then(
            just(Token::Plus)
                .to(BinaryOp::Add)
                .or(just(Token::Minus).to(BinaryOp::Sub))
                .then(product)
                .repeated(),
        )
        .foldl(|lhs, (op, rhs)| Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
        .boxed()
}

fn negate(expr: Expr) -> Expr {
    Expr::Unary {
        op: UnaryOp::Negate,
        expr: Box::new(expr),
    }
}
