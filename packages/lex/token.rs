// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use std::fmt;

macro_rules! token_kinds {
    ($($(#[$meta:meta])* $variant:ident => $name:literal),* $(,)?) => {
        /// Type of a [`Token`]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($(#[$meta])* $variant),*
        }
        impl TokenKind {
            /// The display name of the kind, such as `IDENTIFIER`
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),*
                }
            }
        }
    };
}

token_kinds! {
    Public => "PUBLIC",
    Sealed => "SEALED",
    Abstract => "ABSTRACT",
    Class => "CLASS",
    Extends => "EXTENDS",
    Static => "STATIC",
    /// `mut`
    Mutable => "MUTABLE",
    /// `func`
    Function => "FUNCTION",
    Constructor => "CONSTRUCTOR",
    Operator => "OPERATOR",
    New => "NEW",
    Asm => "ASM",
    If => "IF",
    Constexpr => "CONSTEXPR",
    Else => "ELSE",
    While => "WHILE",
    For => "FOR",
    Foreach => "FOREACH",
    In => "IN",
    Switch => "SWITCH",
    Case => "CASE",
    Default => "DEFAULT",
    Break => "BREAK",
    Return => "RETURN",
    /// Char, hex, octal, binary, float or decimal literal
    Val => "VAL",
    /// Name, optionally with a `[]` suffix
    Identifier => "IDENTIFIER",
    /// Double-quoted string, quotes included
    Quote => "QUOTE",
    LBrace => "LBRACE",
    RBrace => "RBRACE",
    LParen => "LPAREN",
    RParen => "RPAREN",
    LBracket => "LBRACKET",
    RBracket => "RBRACKET",
    Leq => "LEQ",
    Lt => "LT",
    Geq => "GEQ",
    Gt => "GT",
    Neq => "NEQ",
    Eq => "EQ",
    Not => "NOT",
    And => "AND",
    Or => "OR",
    Set => "SET",
    SetAdd => "SET_ADD",
    SetSub => "SET_SUB",
    SetMult => "SET_MULT",
    SetDiv => "SET_DIV",
    SetMod => "SET_MOD",
    Inc => "INC",
    Dec => "DEC",
    Add => "ADD",
    Sub => "SUB",
    Mult => "MULT",
    Div => "DIV",
    Mod => "MOD",
    BitAnd => "BIT_AND",
    BitOr => "BIT_OR",
    BitXor => "BIT_XOR",
    BitNot => "BIT_NOT",
    BitLshift => "BIT_LSHIFT",
    BitRshift => "BIT_RSHIFT",
    Comma => "COMMA",
    Dot => "DOT",
    Colon => "COLON",
    Semicolon => "SEMICOLON",
}

impl TokenKind {
    /// Look up the keyword kind for a whole word
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word.as_bytes() {
            b"public" => Self::Public,
            b"sealed" => Self::Sealed,
            b"abstract" => Self::Abstract,
            b"class" => Self::Class,
            b"extends" => Self::Extends,
            b"static" => Self::Static,
            b"mut" => Self::Mutable,
            b"func" => Self::Function,
            b"constructor" => Self::Constructor,
            b"operator" => Self::Operator,
            b"new" => Self::New,
            b"asm" => Self::Asm,
            b"if" => Self::If,
            b"constexpr" => Self::Constexpr,
            b"else" => Self::Else,
            b"while" => Self::While,
            b"for" => Self::For,
            b"foreach" => Self::Foreach,
            b"in" => Self::In,
            b"switch" => Self::Switch,
            b"case" => Self::Case,
            b"default" => Self::Default,
            b"break" => Self::Break,
            b"return" => Self::Return,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operators and punctuation. Two-character operators come first so
/// they win over their one-character prefixes
pub(crate) static PUNCTUATION: &[(&str, TokenKind)] = &[
    ("<=", TokenKind::Leq),
    ("<<", TokenKind::BitLshift),
    (">=", TokenKind::Geq),
    (">>", TokenKind::BitRshift),
    ("!=", TokenKind::Neq),
    ("==", TokenKind::Eq),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("+=", TokenKind::SetAdd),
    ("-=", TokenKind::SetSub),
    ("*=", TokenKind::SetMult),
    ("/=", TokenKind::SetDiv),
    ("%=", TokenKind::SetMod),
    ("++", TokenKind::Inc),
    ("--", TokenKind::Dec),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("!", TokenKind::Not),
    ("=", TokenKind::Set),
    ("+", TokenKind::Add),
    ("-", TokenKind::Sub),
    ("*", TokenKind::Mult),
    ("/", TokenKind::Div),
    ("%", TokenKind::Mod),
    ("&", TokenKind::BitAnd),
    ("|", TokenKind::BitOr),
    ("^", TokenKind::BitXor),
    ("~", TokenKind::BitNot),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
    (";", TokenKind::Semicolon),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, '{}')", self.kind, self.content)
    }
}
