// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

pub mod ast;
mod parser;

pub use parser::Parser;

/// Parse a source file holding one class
pub fn parse(text: &str) -> cu::Result<ast::Class> {
    let mut parser = Parser::new(text);
    let class = parser.parse_class()?;
    parser.finish()?;
    Ok(class)
}
