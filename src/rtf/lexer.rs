//! RTF lexer/tokenizer.
//!
//! This module implements a single-pass lexer that scans RTF source text
//! left to right with one character of lookahead for escape disambiguation.
//! Literal runs and command words are borrowed from the source, so
//! tokenization allocates nothing beyond the token vector itself.

use super::error::{RtfError, RtfResult};
use memchr::{memchr2, memchr3};

/// One lexical unit together with the byte offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind and payload
    pub kind: TokenKind<'a>,
    /// Byte offset of the first character of the token in the source
    pub offset: usize,
}

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Opening brace
    GroupOpen,
    /// Closing brace
    GroupClose,
    /// Command word following a backslash; a numeric suffix is part of the
    /// word (`\picw150` lexes as the single word `picw150`)
    Command(&'a str),
    /// Maximal run of plain text
    Literal(&'a str),
    /// Escaped character with the escape stripped
    EscapedChar(char),
    /// `\uN?` escape carrying the decimal code point
    UnicodeEscape(u32),
    /// `\*` annotation marker; the tree builder drops the command it spans
    Comment,
}

/// RTF lexer.
pub struct Lexer<'a> {
    /// Source input
    input: &'a str,
    /// Current position in bytes
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenize the entire input.
    pub fn tokenize(mut self) -> RtfResult<Vec<Token<'a>>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_line_breaks();
            if self.pos >= self.input.len() {
                break;
            }

            let offset = self.pos;
            let kind = match self.current_byte() {
                b'{' => {
                    self.pos += 1;
                    TokenKind::GroupOpen
                },
                b'}' => {
                    self.pos += 1;
                    TokenKind::GroupClose
                },
                b'\\' => self.lex_escape(offset)?,
                _ => self.lex_literal(),
            };
            tokens.push(Token { kind, offset });
        }

        Ok(tokens)
    }

    /// Lex the construct introduced by a backslash.
    ///
    /// One character of lookahead decides between an escaped special, the
    /// `\*` annotation marker, a `\uN?` Unicode escape, an escaped delimiter,
    /// and an ordinary command word.
    fn lex_escape(&mut self, offset: usize) -> RtfResult<TokenKind<'a>> {
        self.pos += 1; // skip '\'

        let Some(next) = self.peek_byte() else {
            return Err(RtfError::MalformedEscape { offset });
        };

        match next {
            b'\\' | b'{' | b'}' => {
                self.pos += 1;
                Ok(TokenKind::EscapedChar(next as char))
            },
            b'*' => {
                self.pos += 1;
                Ok(TokenKind::Comment)
            },
            // A backslash directly followed by a delimiter escapes the
            // delimiter itself (deliberate simplification of full RTF).
            b' ' | b';' => {
                self.pos += 1;
                Ok(TokenKind::EscapedChar(next as char))
            },
            b'\r' | b'\n' => {
                self.consume_line_break();
                Ok(TokenKind::EscapedChar('\n'))
            },
            b'u' if self.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.lex_unicode_escape(offset)
            },
            b if b.is_ascii_alphanumeric() => Ok(self.lex_command_word()),
            _ => Err(RtfError::MalformedEscape { offset }),
        }
    }

    /// Lex `\uN?` or fall back to a command word when the digit run is not
    /// terminated by `?`.
    ///
    /// Position is at the `u`, which is known to be followed by a digit.
    fn lex_unicode_escape(&mut self, offset: usize) -> RtfResult<TokenKind<'a>> {
        let digit_start = self.pos + 1;
        let mut digit_end = digit_start;
        while self
            .input
            .as_bytes()
            .get(digit_end)
            .is_some_and(u8::is_ascii_digit)
        {
            digit_end += 1;
        }

        if self.input.as_bytes().get(digit_end) != Some(&b'?') {
            // `\u123x` and friends are ordinary command words.
            return Ok(self.lex_command_word());
        }

        let code = self.input[digit_start..digit_end]
            .parse::<u32>()
            .map_err(|_| RtfError::MalformedUnicodeEscape { offset })?;
        if char::from_u32(code).is_none() {
            return Err(RtfError::MalformedUnicodeEscape { offset });
        }

        self.pos = digit_end + 1; // past the '?'
        Ok(TokenKind::UnicodeEscape(code))
    }

    /// Lex a command word: a maximal alphanumeric run, consuming a single
    /// trailing delimiter (`;`, line break, or one space) if present.
    fn lex_command_word(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        while self.peek_byte().is_some_and(|b| b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];

        match self.peek_byte() {
            Some(b' ') | Some(b';') => self.pos += 1,
            Some(b'\r') | Some(b'\n') => self.consume_line_break(),
            _ => {},
        }

        TokenKind::Command(word)
    }

    /// Lex a literal run: everything up to the next `\`, `{`, `}`, or line
    /// break. Spaces and tabs inside the run are content.
    fn lex_literal(&mut self) -> TokenKind<'a> {
        let rest = &self.input.as_bytes()[self.pos..];
        let special = memchr3(b'\\', b'{', b'}', rest).unwrap_or(rest.len());
        let end = memchr2(b'\r', b'\n', &rest[..special]).unwrap_or(special);

        let run = &self.input[self.pos..self.pos + end];
        self.pos += end;
        TokenKind::Literal(run)
    }

    /// Get the byte at the current position.
    #[inline]
    fn current_byte(&self) -> u8 {
        self.input.as_bytes()[self.pos]
    }

    /// Peek the byte at the current position without advancing.
    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Peek the byte `ahead` positions past the current one.
    #[inline]
    fn peek_byte_at(&self, ahead: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + ahead).copied()
    }

    /// Consume one line break, treating CRLF as a single break.
    #[inline]
    fn consume_line_break(&mut self) {
        if self.peek_byte() == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek_byte() == Some(b'\n') {
            self.pos += 1;
        }
    }

    /// Skip line breaks between tokens; they are formatting noise.
    #[inline]
    fn skip_line_breaks(&mut self) {
        while matches!(self.peek_byte(), Some(b'\r') | Some(b'\n')) {
            self.pos += 1;
        }
    }
}
