// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Tokenize the whole input
pub fn tokenize(text: &str) -> cu::Result<Vec<Token>> {
    let mut lexer = Lexer::new(text);
    let mut tokens = vec![];
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
