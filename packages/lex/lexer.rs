// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use std::collections::VecDeque;

use crate::token::{PUNCTUATION, Token, TokenKind};

/// Streaming tokenizer with look-ahead.
///
/// Peeked tokens are held in a queue and handed out again by the next
/// call to [`next_token`](Self::next_token), so peeking never skips input
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    held: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            held: VecDeque::new(),
        }
    }

    /// Get the next token, or `None` at the end of input
    pub fn next_token(&mut self) -> cu::Result<Option<Token>> {
        if let Some(token) = self.held.pop_front() {
            return Ok(Some(token));
        }
        self.scan()
    }

    /// Get up to `n` tokens. Fewer are returned if the input ends
    pub fn next_tokens(&mut self, n: usize) -> cu::Result<Vec<Token>> {
        let mut tokens = Vec::with_capacity(n);
        for _ in 0..n {
            match self.next_token()? {
                Some(token) => tokens.push(token),
                None => break,
            }
        }
        Ok(tokens)
    }

    /// Look at the next token without consuming it
    pub fn peek_next(&mut self) -> cu::Result<Option<Token>> {
        Ok(self.peek_tokens(1)?.pop())
    }

    /// Look at up to `n` tokens without consuming them
    pub fn peek_tokens(&mut self, n: usize) -> cu::Result<Vec<Token>> {
        self.fill(n)?;
        Ok(self.held.iter().take(n).cloned().collect())
    }

    /// Kind of the token `n` places ahead (0 is the next token), without
    /// consuming anything
    pub fn peek_kind(&mut self, n: usize) -> cu::Result<Option<TokenKind>> {
        self.fill(n + 1)?;
        Ok(self.held.get(n).map(|t| t.kind))
    }

    fn fill(&mut self, n: usize) -> cu::Result<()> {
        while self.held.len() < n {
            match self.scan()? {
                Some(token) => self.held.push_back(token),
                None => break,
            }
        }
        Ok(())
    }

    /// Discard the next token
    pub fn pop_token(&mut self) -> cu::Result<()> {
        self.pop_tokens(1)
    }

    /// Discard the next `n` tokens
    pub fn pop_tokens(&mut self, n: usize) -> cu::Result<()> {
        for _ in 0..n {
            if self.next_token()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    fn scan(&mut self) -> cu::Result<Option<Token>> {
        loop {
            let rest = &self.text[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match self.comment_len() {
                Some(len) => self.pos += len,
                None => break,
            }
        }

        let Some((kind, len)) = self.match_token() else {
            let (line, column) = self.line_column();
            let snippet: String = self.text[self.pos..]
                .chars()
                .take_while(|c| !c.is_whitespace())
                .take(16)
                .collect();
            cu::bail!("unexpected input at line {line}, column {column}: '{snippet}'");
        };

        let content = &self.text[self.pos..self.pos + len];
        self.pos += len;
        cu::trace!("next: {kind} {content} {}", self.pos);
        Ok(Some(Token::new(kind, content)))
    }

    /// Length of a comment at the current position.
    ///
    /// Line comments run through the newline (or to the end of input).
    /// Block comments must close on the same line they open
    fn comment_len(&self) -> Option<usize> {
        let rest = &self.text[self.pos..];
        if rest.starts_with("//") {
            return Some(rest.find('\n').map_or(rest.len(), |i| i + 1));
        }
        // closes at the first `*/`, so code between two comments on one line is kept
        let body = rest.strip_prefix("/*")?;
        let line = body.find('\n').map_or(body, |i| &body[..i]);
        line.find("*/").map(|close| close + 4)
    }

    fn match_token(&self) -> Option<(TokenKind, usize)> {
        let rest = &self.text[self.pos..];
        if let Some(len) = self.value_len() {
            return Some((TokenKind::Val, len));
        }
        if let Some(len) = word_len(rest) {
            let word = &rest[..len];
            if let Some(kind) = TokenKind::keyword(word) {
                return Some((kind, len));
            }
            let len = if rest[len..].starts_with("[]") {
                len + 2
            } else {
                len
            };
            return Some((TokenKind::Identifier, len));
        }
        if let Some(body) = rest.strip_prefix('"') {
            let close = body.find('"')?;
            return Some((TokenKind::Quote, close + 2));
        }
        PUNCTUATION
            .iter()
            .find(|(p, _)| rest.starts_with(p))
            .map(|(p, kind)| (*kind, p.len()))
    }

    /// Length of a literal value at the current position.
    /// The first form that matches wins
    fn value_len(&self) -> Option<usize> {
        let rest = &self.text[self.pos..];
        if let Some(len) = char_literal_len(rest) {
            return Some(len);
        }
        let bounded = |len: usize| self.is_boundary(self.pos + len).then_some(len);
        let radix = radix_literal_len(rest, "0x", |c| c.is_ascii_hexdigit(), 8)
            .or_else(|| radix_literal_len(rest, "0o", |c| matches!(c, b'0'..=b'7'), 22))
            .or_else(|| radix_literal_len(rest, "0b", |c| matches!(c, b'0' | b'1'), 64));
        if let Some(len) = radix.and_then(bounded) {
            return Some(len);
        }

        let int = digit_run(rest);
        let after_dot = rest[int..]
            .strip_prefix('.')
            .map(|frac| (int + 1, digit_run(frac)));
        if let Some((dot_end, frac)) = after_dot {
            // `1.` and `1.5`, falling back to a bare `1.` before the digits
            if int > 0 {
                if let Some(len) = bounded(dot_end + frac) {
                    return Some(len);
                }
                if frac > 0 {
                    if let Some(len) = bounded(dot_end) {
                        return Some(len);
                    }
                }
            }
            // `.5` and `1.5`
            if frac > 0 {
                if let Some(len) = bounded(dot_end + frac) {
                    return Some(len);
                }
            }
        }
        if int > 0 {
            return bounded(int);
        }
        None
    }

    /// Whether a word boundary is at byte `pos`
    fn is_boundary(&self, pos: usize) -> bool {
        let before = self.text[..pos].chars().next_back().is_some_and(is_word_char);
        let after = self.text[pos..].chars().next().is_some_and(is_word_char);
        before != after
    }

    /// 1-based line and column of the current position
    fn line_column(&self) -> (usize, usize) {
        let before = &self.text[..self.pos];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(i) => before[i + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, column)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length of an identifier-like word, which starts with an ASCII letter or `_`
fn word_len(s: &str) -> Option<usize> {
    let first = s.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let len = s
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(s.len(), |(i, _)| i);
    Some(len)
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// `'c'` or `'\c'`, where `c` is anything but a newline
fn char_literal_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('\'')?;
    let quoted_char = |body: &str| {
        let c = body.chars().next().filter(|c| *c != '\n')?;
        body[c.len_utf8()..]
            .starts_with('\'')
            .then_some(c.len_utf8() + 1)
    };
    if let Some(escaped) = body.strip_prefix('\\') {
        if let Some(len) = quoted_char(escaped) {
            return Some(len + 2);
        }
    }
    quoted_char(body).map(|len| len + 1)
}

/// Prefixed literal with 1 to `max_digits` digits. The word boundary
/// is checked by the caller
fn radix_literal_len(
    s: &str,
    prefix: &str,
    is_digit: impl Fn(u8) -> bool,
    max_digits: usize,
) -> Option<usize> {
    let digits = s.strip_prefix(prefix)?;
    let count = digits.bytes().take_while(|b| is_digit(*b)).count();
    if count == 0 || count > max_digits {
        return None;
    }
    Some(prefix.len() + count)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        crate::tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn contents(text: &str) -> Vec<String> {
        crate::tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| t.content)
            .collect()
    }

    #[test]
    fn test_next_single() {
        let mut lexer = Lexer::new("public sealed");
        assert_eq!(
            lexer.next_token().unwrap(),
            Some(Token::new(TokenKind::Public, "public"))
        );
        assert_eq!(
            lexer.next_token().unwrap(),
            Some(Token::new(TokenKind::Sealed, "sealed"))
        );
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn test_next_multiple() {
        let mut lexer = Lexer::new("public sealed abstract");
        let tokens = lexer.next_tokens(2).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Public);
        assert_eq!(tokens[1].kind, TokenKind::Sealed);

        let tokens = lexer.next_tokens(2).unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Abstract, "abstract")]);
    }

    #[test]
    fn test_peek_single() {
        let mut lexer = Lexer::new("public sealed abstract");
        let peek = lexer.peek_next().unwrap();
        assert_eq!(peek, lexer.next_token().unwrap());

        let peek = lexer.peek_next().unwrap();
        lexer.pop_token().unwrap();
        assert_eq!(peek, Some(Token::new(TokenKind::Sealed, "sealed")));

        let peek = lexer.peek_next().unwrap();
        assert_eq!(peek, lexer.peek_next().unwrap());
        assert_eq!(peek.map(|t| t.kind), Some(TokenKind::Abstract));
    }

    #[test]
    fn test_peek_multiple() {
        let mut lexer = Lexer::new("public sealed abstract public");
        let peeks = lexer.peek_tokens(2).unwrap();
        assert_eq!(peeks, lexer.next_tokens(2).unwrap());

        let peeks = lexer.peek_tokens(2).unwrap();
        assert_eq!(peeks, lexer.peek_tokens(2).unwrap());
        assert_eq!(Some(peeks[0].clone()), lexer.peek_next().unwrap());
        assert_eq!(peeks[0].kind, TokenKind::Abstract);
        assert_eq!(peeks[1].kind, TokenKind::Public);

        lexer.pop_tokens(2).unwrap();
        assert_eq!(lexer.peek_next().unwrap(), None);
    }

    #[test]
    fn test_peek_kind() {
        let mut lexer = Lexer::new("x = 1");
        assert_eq!(lexer.peek_kind(1).unwrap(), Some(TokenKind::Set));
        assert_eq!(lexer.peek_kind(0).unwrap(), Some(TokenKind::Identifier));
        assert_eq!(lexer.peek_kind(3).unwrap(), None);
        assert_eq!(lexer.next_tokens(5).unwrap().len(), 3);
    }

    #[test]
    fn test_peek_past_end() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.peek_tokens(5).unwrap().len(), 2);
        assert_eq!(lexer.next_tokens(5).unwrap().len(), 2);
        lexer.pop_tokens(3).unwrap();
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[rstest]
    #[case("public", TokenKind::Public)]
    #[case("mut", TokenKind::Mutable)]
    #[case("func", TokenKind::Function)]
    #[case("constructor", TokenKind::Constructor)]
    #[case("operator", TokenKind::Operator)]
    #[case("constexpr", TokenKind::Constexpr)]
    #[case("foreach", TokenKind::Foreach)]
    #[case("publicity", TokenKind::Identifier)]
    #[case("in_place", TokenKind::Identifier)]
    #[case("_x1", TokenKind::Identifier)]
    fn test_words(#[case] text: &str, #[case] kind: TokenKind) {
        assert_eq!(kinds(text), vec![kind]);
    }

    #[test]
    fn test_class_declaration() {
        use TokenKind::*;
        assert_eq!(
            kinds("public abstract class ChildClass extends ParentClass {}"),
            vec![Public, Abstract, Class, Identifier, Extends, Identifier, LBrace, RBrace]
        );
    }

    #[test]
    fn test_operator_overload() {
        use TokenKind::*;
        assert_eq!(
            kinds("i32 func operator +() {}"),
            vec![Identifier, Function, Operator, Add, LParen, RParen, LBrace, RBrace]
        );
    }

    #[test]
    fn test_values() {
        let text = "0x0 0x01234567 0x89ABCDEF 0o0 0o0123456701234567012345 0b0 \
            0b0000000000111111111100000000001111111111000000000011111111110011 \
            0 123456789 0.0 123.456789 .5 'a' '\\n'";
        let tokens = crate::tokenize(text).unwrap();
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Val));
        let expected: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(contents(text), expected);
    }

    #[rstest]
    #[case("0z0")]
    #[case("0x")]
    #[case("0xFFFFFFFFFF")]
    #[case("0xwsldjdas")]
    #[case("0o")]
    #[case("0o7777777777777777777777777")]
    #[case("0o012abc")]
    #[case("0b")]
    #[case("0b00000000001111111111000000000011111111110000000000111111111100001111")]
    #[case("0b012345")]
    fn test_bad_values(#[case] text: &str) {
        assert!(Lexer::new(text).next_token().is_err());
    }

    #[test]
    fn test_float_then_dot() {
        use TokenKind::*;
        assert_eq!(kinds("1. x"), vec![Val, Dot, Identifier]);
        assert_eq!(contents("1.x"), vec!["1.", "x"]);
    }

    #[test]
    fn test_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("= += -= *= /= %= ++ --"),
            vec![Set, SetAdd, SetSub, SetMult, SetDiv, SetMod, Inc, Dec]
        );
        assert_eq!(
            kinds("== ! && || <= < >= > !="),
            vec![Eq, Not, And, Or, Leq, Lt, Geq, Gt, Neq]
        );
        assert_eq!(
            kinds("+ - * / % & | ^ ~ << >>"),
            vec![Add, Sub, Mult, Div, Mod, BitAnd, BitOr, BitXor, BitNot, BitLshift, BitRshift]
        );
    }

    #[test]
    fn test_array_access() {
        use TokenKind::*;
        assert_eq!(kinds("arr1[0]"), vec![Identifier, LBracket, Val, RBracket]);
        assert_eq!(contents("i32[] values"), vec!["i32[]", "values"]);
    }

    #[test]
    fn test_quote() {
        let tokens = crate::tokenize("asm {\"mov rax, 1\"}").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2], Token::new(TokenKind::Quote, "\"mov rax, 1\""));
        assert!(Lexer::new("\"unterminated").next_token().is_err());
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        assert_eq!(kinds("a // comment\nb"), vec![Identifier, Identifier]);
        assert_eq!(kinds("a // comment at the end"), vec![Identifier]);
        assert_eq!(kinds("a /* x */ b /* y */"), vec![Identifier, Identifier]);
        assert_eq!(kinds("/**/c"), vec![Identifier]);
        // block comments do not span lines
        assert_eq!(kinds("a /*\n*/"), vec![Identifier, Div, Mult, Mult, Div]);
    }

    #[test]
    fn test_member_access() {
        assert_eq!(contents("someClass.someVar"), vec!["someClass", ".", "someVar"]);
    }

    #[test]
    fn test_error_position() {
        let mut lexer = Lexer::new("a\n  b #oops");
        lexer.next_tokens(2).unwrap();
        let error = lexer.next_token().unwrap_err().to_string();
        assert!(error.contains("line 2, column 5"), "{error}");
        assert!(error.contains("#oops"), "{error}");
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::SetAdd, "+=");
        assert_eq!(token.to_string(), "Token(SET_ADD, '+=')");
    }
}
