// crates/parser/src/ast.rs

pub type Span = std::ops::Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOp {
    Negate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Source text of the literal, read exactly by the engine
    Number(String),

    Identifier(String),

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Call {
        func: String,
        args: Vec<Expr>,
    },

    // Bracketed list; a list of lists is a matrix literal
    List(Vec<Expr>),
}

/// `lhs = rhs`. A bare expression parses as `expr = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Expr {
    pub fn number(text: &str) -> Expr {
        Expr::Number(text.to_string())
    }

    pub fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }
}
