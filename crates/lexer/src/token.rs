use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\n\r\f]+")] // Ignore spaces, tabs and line breaks automatically
pub enum Token {
    // --- Literals ---

    // Identifiers: variables and function names (ex: "x", "theta", "det")
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Numbers keep their source text so the engine can read them exactly
    // (ex: 42, 3.14, .5, 2.)
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    // --- Operators ---
    #[token("+")]
    Plus,

    #[token("-")]
    #[token("−")]
    Minus,

    #[token("*")]
    #[token("×")]
    Star,

    #[token("/")]
    #[token("÷")]
    Slash,

    #[token("^")]
    #[token("**")]
    Caret,

    #[token("=")]
    Eq,

    #[token(",")]
    Comma,

    // --- Delimiters ---
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket, // Matrix rows

    #[token("]")]
    RBracket,

    // Placeholder for characters the lexer could not recognize
    Error,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(text) => write!(f, "{}", text),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Eq => write!(f, "="),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Error => write!(f, "invalid character"),
        }
    }
}
